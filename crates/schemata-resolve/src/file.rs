use crate::parser::UnresolvedReference;
use fxhash::FxHashSet;
use schemata_source::SourceFile;

/// Index of a file inside one engine. Stable for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    pub(crate) fn new(index: usize) -> Self {
        FileId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a file currently sits in the resolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileState {
    /// Queued for an attempt
    Pending,
    /// Failed on a missing name, waiting for another file to resolve
    Deferred,
    /// Resolved; never attempted again
    Done,
}

/// A file as seen by the engine.
#[derive(Debug, Clone)]
pub struct FileRecord {
    source: SourceFile,
    self_duplicates: FxHashSet<String>,
    pending_error: Option<UnresolvedReference>,
}

impl FileRecord {
    /// Creates a record from the file and the names it declares.
    pub fn new<I, S>(source: SourceFile, declared_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let self_duplicates = Self::compute_self_duplicates(declared_names);
        Self {
            source,
            self_duplicates,
            pending_error: None,
        }
    }

    /// Every name that occurs more than once in `declared_names`.
    pub fn compute_self_duplicates<I, S>(declared_names: I) -> FxHashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut duplicates = FxHashSet::default();
        for name in declared_names {
            let name = name.as_ref();
            if !seen.insert(name.to_string()) {
                duplicates.insert(name.to_string());
            }
        }
        duplicates
    }

    /// Diagnostic path of the file; also its identity.
    pub fn path(&self) -> &str {
        self.source.location()
    }

    pub fn contents(&self) -> &str {
        self.source.contents()
    }

    /// Names this file declares more than once. Fixed at construction.
    pub fn self_duplicates(&self) -> &FxHashSet<String> {
        &self.self_duplicates
    }

    pub fn has_pending_error(&self) -> bool {
        self.pending_error.is_some()
    }

    /// The reference that made the latest attempt fail, while deferred.
    pub fn pending_error(&self) -> Option<&UnresolvedReference> {
        self.pending_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.pending_error = None;
    }

    pub(crate) fn set_error(&mut self, reference: UnresolvedReference) {
        self.pending_error = Some(reference);
    }
}
