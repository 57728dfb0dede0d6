use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database not available")]
    DatabaseUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
