//! Identifier validation and the repository behind the handlers.

mod postgres;
mod repository;
mod validation;
pub use postgres::PgRepository;
pub use repository::Repository;
pub use validation::IdValidator;
