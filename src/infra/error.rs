use thiserror::Error;

/// Bootstrap failures: everything that can go wrong before the router
/// serves its first request.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {message}")]
    Database { message: String },
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_subsystem() {
        assert_eq!(
            InfraError::database("pool exhausted").to_string(),
            "database error: pool exhausted"
        );
        assert_eq!(
            InfraError::configuration("database.url is required").to_string(),
            "configuration error: database.url is required"
        );
        assert_eq!(
            InfraError::telemetry("subscriber already set").to_string(),
            "telemetry initialization failed: subscriber already set"
        );
    }
}
