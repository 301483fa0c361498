use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Organization '{0}' already exists")]
    DuplicateOrgName(String),

    #[error("Admin email '{0}' is already registered")]
    DuplicateAdminEmail(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Other(String),
}
