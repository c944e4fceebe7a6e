use chrono::NaiveDate;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::warn;

/// Error types raised by the entity factories and the access policy
#[derive(Error, Debug)]
pub enum ModelError {
    /// A required input was absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An end date precedes its start date
    #[error("End date {end} precedes start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    /// The caller may not perform the operation
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Password(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ModelError {
    /// Translates a failed insert into [`ModelError::Conflict`] when the
    /// storage engine reports a unique constraint violation.
    pub(crate) fn from_insert(err: DbErr, conflict: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                let message = conflict();
                warn!(%detail, "{}", message);
                ModelError::Conflict(message)
            }
            _ => ModelError::Database(err),
        }
    }
}

/// Returns the trimmed value, or `MissingField(field)` when it is absent or blank.
pub(crate) fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ModelError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ModelError::MissingField(field)),
    }
}
