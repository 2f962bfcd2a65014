use miette::{Diagnostic, NamedSource};
use schemata_resolve::ResolveError;
use schemata_source::{Project, ProjectError};
use schemata_syntax::SyntaxError;
use thiserror::Error;

/// Errors that abort a resolution run.
#[derive(Debug, Error, Diagnostic)]
pub enum DatabaseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    #[error("Failed to parse {path}")]
    #[diagnostic(
        code(schemata_db::parse_error),
        help("Fix the schema; files with errors other than unknown type names are not retried")
    )]
    Parse {
        path: String,
        #[source_code]
        src: NamedSource<String>,
        #[source]
        #[diagnostic_source]
        source: SyntaxError,
    },

    #[error("File {0} was discovered more than once")]
    #[diagnostic(code(schemata_db::duplicate_file))]
    DuplicateFile(String),
}

impl DatabaseError {
    /// Attaches the failing file's text so the parse error renders in context.
    pub(crate) fn from_resolve(err: ResolveError<SyntaxError>, project: &Project) -> Self {
        match err {
            ResolveError::Fatal { path, source } => {
                let text = project.file(&path).map(|f| f.contents().to_string()).unwrap_or_default();
                DatabaseError::Parse {
                    src: NamedSource::new(&path, text),
                    path,
                    source,
                }
            }
            ResolveError::DuplicatePath(path) => DatabaseError::DuplicateFile(path),
        }
    }
}

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
