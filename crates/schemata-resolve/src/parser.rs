//! The contract between the engine and the schema-language parser.

use crate::file::FileRecord;
use indexmap::IndexMap;
use schemata_source::SourceFile;
use std::fmt;

/// A name an attempt needed but could not find among the visible types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedReference {
    /// The name as the parser tried to look it up
    pub name: String,
    /// Other spellings that would also have satisfied the lookup, e.g. the
    /// unqualified form of a namespaced name
    pub alternatives: Vec<String>,
}

impl UnresolvedReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternatives: Vec::new(),
        }
    }

    pub fn with_alternative(mut self, name: impl Into<String>) -> Self {
        self.alternatives.push(name.into());
        self
    }

    /// Whether a type called `name` becoming known could satisfy this reference.
    pub fn is_satisfied_by(&self, name: &str) -> bool {
        self.name == name || self.alternatives.iter().any(|alt| alt == name)
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not defined", self.name)
    }
}

/// Result of attempting one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<D, E> {
    /// The file resolved. Holds every type it defined, which may be none.
    Resolved(IndexMap<String, D>),
    /// The file refers to a type that is not visible yet.
    Deferred(UnresolvedReference),
    /// The file is broken in a way retrying cannot fix.
    Fatal(E),
}

/// A parser for one schema language.
///
/// The engine calls [`FileParser::declared_names`] once per file before the
/// loop starts and [`FileParser::attempt`] every time the file is tried.
/// Attempts must be pure with respect to their inputs: given the same file
/// and the same visible types they must produce the same outcome.
pub trait FileParser {
    /// The resolved form of a named type.
    type Definition: Clone;
    /// Unrecoverable parse failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Names of every type the file declares, in declaration order, with
    /// repeats kept. No cross-file resolution happens here.
    fn declared_names(&mut self, source: &SourceFile) -> Result<Vec<String>, Self::Error>;

    /// Tries to resolve `file` given the currently visible types.
    fn attempt(
        &mut self,
        file: &FileRecord,
        visible: &IndexMap<String, Self::Definition>,
    ) -> Outcome<Self::Definition, Self::Error>;
}
