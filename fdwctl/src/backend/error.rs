//! Errors for DDL execution.

use thiserror::Error;

/// A statement the database rejected: SQLSTATE code, server message, and
/// the statement that was being executed when the error surfaced.
#[derive(Debug, Clone, Error)]
#[error("error code: {code}, message: {message}, SQL: {statement}")]
pub struct ExecutionError {
    pub code: String,
    pub message: String,
    pub statement: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Execution(ExecutionError),

    #[error("{0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("server \"{0}\" has no import_foreign_schema configuration")]
    MissingImportForeignSchema(String),
}

impl Error {
    /// Point the error at the statement that was in flight, for failures
    /// that surface at commit time.
    pub(crate) fn with_statement(mut self, sql: &str) -> Self {
        if let Error::Execution(ref mut err) = self {
            err.statement = sql.to_string();
        }

        self
    }
}
