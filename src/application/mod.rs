//! Application services and the contracts they are built from.

pub mod authors;
pub mod books;
pub mod error;
pub mod repos;
pub mod validate;
