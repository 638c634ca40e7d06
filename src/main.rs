use std::{process, sync::Arc, time::Duration};

use clap::Parser;
use folio::{
    application::{authors::AuthorService, books::BookService, repos::{AuthorsRepo, BooksRepo}},
    cache::CacheStore,
    config::{self, CliArgs, LoadError},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{HttpState, build_router},
        telemetry,
    },
};
use thiserror::Error;
use tracing::{dispatcher, error, info, warn};

#[derive(Debug, Error)]
enum BootError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_boot_error(&error);
        process::exit(1);
    }
}

fn report_boot_error(error: &BootError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "failed to start");
        return;
    }
    eprintln!("folio failed to start: {error}");
}

async fn run() -> Result<(), BootError> {
    let args = CliArgs::parse();
    let settings = config::load(&args)?;
    telemetry::init(&settings.logging)?;

    let url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database.url is required"))?;
    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(|err| InfraError::database(err.to_string()))?;
    PostgresRepositories::ensure_schema(&pool)
        .await
        .map_err(|err| InfraError::database(err.to_string()))?;
    let repos = Arc::new(PostgresRepositories::new(pool));

    let cache = Arc::new(CacheStore::new(settings.cache.ttl));
    let authors_repo: Arc<dyn AuthorsRepo> = repos.clone();
    let books_repo: Arc<dyn BooksRepo> = repos.clone();
    let authors = AuthorService::new(authors_repo, cache.clone());
    let books = BookService::new(books_repo, authors.clone(), cache);

    let router = build_router(HttpState { authors, books });

    let listener = tokio::net::TcpListener::bind(settings.server.addr).await?;
    info!(addr = %settings.server.addr, "folio listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await?;

    info!("folio stopped");
    Ok(())
}

async fn shutdown_signal(drain_deadline: Duration) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, draining connections");
    tokio::spawn(async move {
        tokio::time::sleep(drain_deadline).await;
        warn!("drain deadline elapsed, exiting");
        process::exit(0);
    });
}
