use std::path::PathBuf;

use miette::Diagnostic;
use schemata_db::DatabaseError;
use schemata_source::ProjectError;
use thiserror::Error;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    #[error("Failed {operation} {path}")]
    #[diagnostic(code(schemata::cli::io_error))]
    IoError {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} file(s) could not be resolved")]
    #[diagnostic(
        code(schemata::cli::unresolved),
        help("Each unresolved file is listed above with the type name it is missing")
    )]
    Unresolved { count: usize },

    #[error("A project already exists at {0}")]
    #[diagnostic(code(schemata::cli::project_exists))]
    ProjectExists(PathBuf),

    #[error("Internal error: {0}")]
    #[diagnostic(code(schemata::cli::internal_error))]
    InternalError(String),
}

/// Convert IO errors with context
pub fn convert_io_error(error: std::io::Error, path: PathBuf, operation: &str) -> CliError {
    CliError::IoError {
        path,
        operation: operation.to_string(),
        source: error,
    }
}
