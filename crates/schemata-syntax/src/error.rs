use thiserror::Error;
use miette::{Diagnostic, SourceSpan};

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid JSON: {message}")]
    #[diagnostic(code(schemata_syntax::invalid_json))]
    InvalidJson {
        message: String,
        #[label("error occurred here")]
        span: Option<SourceSpan>,
    },

    #[error("Invalid schema: {message}")]
    #[diagnostic(code(schemata_syntax::invalid_schema))]
    InvalidSchema { message: String },

    #[error("Invalid name `{name}`")]
    #[diagnostic(
        code(schemata_syntax::invalid_name),
        help("Names are dot-separated identifiers matching [A-Za-z_][A-Za-z0-9_]* and may not be a primitive type name")
    )]
    InvalidName { name: String },

    /// A reference to a named type that is neither defined earlier in the
    /// file nor among the known types. The only recoverable error.
    #[error("Undefined name: `{name}`")]
    #[diagnostic(code(schemata_syntax::undefined_name))]
    UndefinedName {
        /// Full name that was looked up
        name: String,
        /// The name as written, when it differs from `name`
        unqualified: Option<String>,
    },
}

impl SyntaxError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SyntaxError::InvalidSchema { message: message.into() }
    }

    /// Whether the error may go away once more types are known.
    pub fn is_undefined_name(&self) -> bool {
        matches!(self, SyntaxError::UndefinedName { .. })
    }
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
