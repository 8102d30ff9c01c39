//! Custom error types for the common library
//!
//! This module defines the typed error taxonomy for database access. Callers
//! match on the variant instead of inspecting driver messages.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A row the operation expected to exist is missing
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A referenced row does not exist
    #[error("Foreign key constraint violated{}", constraint_suffix(.constraint))]
    ForeignKeyViolation { constraint: Option<String> },
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

impl DatabaseError {
    /// Shorthand for [`DatabaseError::NotFound`]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) if db_err.is_foreign_key_violation() => {
                DatabaseError::ForeignKeyViolation {
                    constraint: db_err.constraint().map(str::to_owned),
                }
            }
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
                DatabaseError::Connection(err)
            }
            _ => DatabaseError::Query(err),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
