use thiserror::Error;
use miette::Diagnostic;

/// Errors that stop the resolution loop.
///
/// A file that merely cannot be resolved is not an error; it ends up in
/// [`crate::Resolution::unresolved`].
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError<E: std::error::Error + 'static> {
    /// The parser reported a failure that retrying cannot fix.
    #[error("Failed to process {path}: {source}")]
    #[diagnostic(code(schemata_resolve::fatal))]
    Fatal {
        path: String,
        #[source]
        source: E,
    },

    /// Two input files share a path, so they cannot be told apart.
    #[error("File {0} was supplied more than once")]
    #[diagnostic(
        code(schemata_resolve::duplicate_path),
        help("Every input file needs a distinct path")
    )]
    DuplicatePath(String),
}

impl<E: std::error::Error + 'static> ResolveError<E> {
    /// The path of the file the error concerns.
    pub fn path(&self) -> &str {
        match self {
            ResolveError::Fatal { path, .. } => path,
            ResolveError::DuplicatePath(path) => path,
        }
    }
}

/// Per-file findings reported once the loop has reached its fixed point.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolutionDiagnostic {
    /// The file was still waiting on a name when no work was left.
    #[error("Could not resolve {path}: `{missing}` is never defined")]
    #[diagnostic(
        code(schemata_resolve::unresolved),
        help("Define `{missing}` in one of the project's files, or break the circular reference that needs it")
    )]
    PermanentlyUnresolved {
        /// The file that never resolved.
        path: String,
        /// The name its last attempt was missing.
        missing: String,
    },

    /// The file declares the same type name more than once.
    #[error("{path} declares `{name}` more than once")]
    #[diagnostic(
        code(schemata_resolve::self_duplicate),
        severity(Warning),
        help("`{name}` is hidden from this file's own lookups; rename one of the declarations")
    )]
    SelfDuplicateName {
        /// The file containing the repeated declaration.
        path: String,
        /// The repeated name.
        name: String,
    },
}
