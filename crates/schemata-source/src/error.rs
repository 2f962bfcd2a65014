use std::path::PathBuf;
use thiserror::Error;
use miette::Diagnostic;

/// Errors that can occur while loading a project
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// The project directory does not exist
    #[error("Path does not exist: {0}")]
    #[diagnostic(
        code("PROJECT-001"),
        help("Make sure the path exists and has proper permissions")
    )]
    PathNotFound(PathBuf),

    /// No `schemata.toml` was found while searching upwards
    #[error("No schemata.toml found in {0} or any parent directory")]
    #[diagnostic(
        code("PROJECT-002"),
        help("Run `schemata new <path>` to create a project, or pass the project directory explicitly")
    )]
    ConfigNotFound(PathBuf),

    /// Error reading the project configuration file
    #[error("Error reading project configuration {path}: {message}")]
    #[diagnostic(code("PROJECT-003"), help("Check file permissions"))]
    ConfigReadError { path: PathBuf, message: String },

    /// Error parsing the project configuration
    #[error("Invalid project configuration {path}: {message}")]
    #[diagnostic(
        code("PROJECT-004"),
        help("Check your schemata.toml syntax against the documented sections `[project]` and `[resolve]`")
    )]
    ConfigParseError { path: PathBuf, message: String },

    /// The configured source directory is missing
    #[error("Source directory does not exist: {0}")]
    #[diagnostic(
        code("PROJECT-005"),
        help("Create the directory or change `source_dir` in schemata.toml")
    )]
    SourceDirNotFound(PathBuf),

    /// A schema file or directory could not be read
    #[error("Error reading {path}: {message}")]
    #[diagnostic(code("PROJECT-006"))]
    SourceReadError { path: PathBuf, message: String },
}
