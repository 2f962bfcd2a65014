//! The fixed-point driver.

use crate::error::{ResolutionDiagnostic, ResolveError};
use crate::file::{FileId, FileRecord, FileState};
use crate::parser::{FileParser, Outcome};
use crate::registry::TypeRegistry;
use fxhash::FxHashMap;
use indexmap::IndexSet;
use schemata_source::SourceFile;
use std::collections::VecDeque;

/// Which deferred files go back into the queue after a file resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequeuePolicy {
    /// Every deferred file, in the order it was deferred.
    #[default]
    All,
    /// Only files whose last missing name was among the names just merged.
    Targeted,
}

/// Trace record of a single loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub path: String,
    pub result: AttemptResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// The file resolved, defining `names`; `released` were moved from the
    /// deferred set back to the pending queue.
    Resolved { names: Vec<String>, released: Vec<String> },
    /// The file was deferred waiting on `missing`.
    Deferred { missing: String },
}

/// Drives files through `Pending -> (Deferred -> Pending)* -> Done`.
///
/// Single-threaded and deterministic: for a given input order and parser the
/// sequence of attempts is always the same.
pub struct ResolutionEngine<P: FileParser> {
    parser: P,
    registry: TypeRegistry<P::Definition>,
    files: Vec<FileRecord>,
    states: Vec<FileState>,
    by_path: FxHashMap<String, FileId>,
    pending: VecDeque<FileId>,
    deferred: IndexSet<FileId>,
    processed_count: usize,
    policy: RequeuePolicy,
}

impl<P: FileParser> ResolutionEngine<P> {
    /// Creates an engine over prebuilt records, queued in the given order.
    pub fn new(parser: P, files: Vec<FileRecord>) -> Result<Self, ResolveError<P::Error>> {
        let mut by_path = FxHashMap::default();
        for (index, file) in files.iter().enumerate() {
            if by_path.insert(file.path().to_string(), FileId::new(index)).is_some() {
                return Err(ResolveError::DuplicatePath(file.path().to_string()));
            }
        }

        let pending = (0..files.len()).map(FileId::new).collect();
        let states = vec![FileState::Pending; files.len()];

        Ok(Self {
            parser,
            registry: TypeRegistry::new(),
            files,
            states,
            by_path,
            pending,
            deferred: IndexSet::new(),
            processed_count: 0,
            policy: RequeuePolicy::default(),
        })
    }

    /// Creates an engine from discovered sources, asking the parser for each
    /// file's declared names to find its self-duplicates.
    pub fn from_sources<I>(mut parser: P, sources: I) -> Result<Self, ResolveError<P::Error>>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut files = Vec::new();
        for source in sources {
            let declared = parser
                .declared_names(&source)
                .map_err(|source_err| ResolveError::Fatal {
                    path: source.location().to_string(),
                    source: source_err,
                })?;
            let record = FileRecord::new(source, declared);
            if !record.self_duplicates().is_empty() {
                log::debug!(
                    "{} declares {} name(s) more than once",
                    record.path(),
                    record.self_duplicates().len()
                );
            }
            files.push(record);
        }
        Self::new(parser, files)
    }

    pub fn with_requeue_policy(mut self, policy: RequeuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// True while files are waiting in the pending queue.
    pub fn is_work_remaining(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    pub fn registry(&self) -> &TypeRegistry<P::Definition> {
        &self.registry
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.by_path.get(path).map(|id| &self.files[id.index()])
    }

    pub fn state_of(&self, path: &str) -> Option<FileState> {
        self.by_path.get(path).map(|id| self.states[id.index()])
    }

    /// Paths currently queued, front first.
    pub fn pending_paths(&self) -> Vec<&str> {
        self.pending.iter().map(|id| self.files[id.index()].path()).collect()
    }

    /// Paths currently deferred, in deferral order.
    pub fn deferred_paths(&self) -> Vec<&str> {
        self.deferred.iter().map(|id| self.files[id.index()].path()).collect()
    }

    /// Runs one iteration of the loop.
    ///
    /// Returns `Ok(None)` once the pending queue is empty.
    pub fn step(&mut self) -> Result<Option<Attempt>, ResolveError<P::Error>> {
        let Some(id) = self.pending.pop_front() else {
            return Ok(None);
        };
        debug_assert_eq!(self.states[id.index()], FileState::Pending);

        let file = &self.files[id.index()];
        let visible = self.registry.visible_types(file.self_duplicates());
        log::trace!("Attempting {} with {} visible type(s)", file.path(), visible.len());

        let outcome = self.parser.attempt(file, &visible);
        let path = file.path().to_string();

        match outcome {
            Outcome::Resolved(types) => {
                let names: Vec<String> = types.keys().cloned().collect();
                for (name, definition) in types {
                    self.registry.merge(&name, &path, definition);
                }
                self.files[id.index()].clear_error();
                self.processed_count += 1;
                let released = self.release_deferred(&names);
                self.states[id.index()] = FileState::Done;

                log::debug!(
                    "Resolved {} ({} type(s)), released {} deferred file(s)",
                    path,
                    names.len(),
                    released.len()
                );
                Ok(Some(Attempt {
                    path,
                    result: AttemptResult::Resolved { names, released },
                }))
            }
            Outcome::Deferred(reference) => {
                log::debug!("Deferred {}: {}", path, reference);
                let missing = reference.name.clone();
                self.files[id.index()].set_error(reference);
                self.deferred.insert(id);
                self.states[id.index()] = FileState::Deferred;
                Ok(Some(Attempt {
                    path,
                    result: AttemptResult::Deferred { missing },
                }))
            }
            Outcome::Fatal(source) => {
                log::debug!("Fatal error in {}", path);
                Err(ResolveError::Fatal { path, source })
            }
        }
    }

    /// Loops until no pending work is left and returns the final state.
    pub fn run(mut self) -> Result<Resolution<P::Definition>, ResolveError<P::Error>> {
        while self.is_work_remaining() {
            self.step()?;
        }
        Ok(self.finish())
    }

    /// Moves deferred files back into the pending queue according to the
    /// policy and returns their paths.
    fn release_deferred(&mut self, merged: &[String]) -> Vec<String> {
        let released: Vec<FileId> = match self.policy {
            RequeuePolicy::All => self.deferred.drain(..).collect(),
            RequeuePolicy::Targeted => {
                let files = &self.files;
                let wanted: Vec<FileId> = self
                    .deferred
                    .iter()
                    .copied()
                    .filter(|id| match files[id.index()].pending_error() {
                        Some(reference) => merged.iter().any(|name| reference.is_satisfied_by(name)),
                        None => true,
                    })
                    .collect();
                for id in &wanted {
                    self.deferred.shift_remove(id);
                }
                wanted
            }
        };

        released
            .into_iter()
            .map(|id| {
                self.states[id.index()] = FileState::Pending;
                self.pending.push_back(id);
                self.files[id.index()].path().to_string()
            })
            .collect()
    }

    fn finish(self) -> Resolution<P::Definition> {
        let unresolved: Vec<FileId> = self.deferred.into_iter().collect();
        log::info!(
            "Processed {} of {} file(s), {} type(s) known, {} unresolved",
            self.processed_count,
            self.files.len(),
            self.registry.len(),
            unresolved.len()
        );
        Resolution {
            registry: self.registry,
            processed_count: self.processed_count,
            files: self.files,
            unresolved,
        }
    }
}

/// What the engine knows once it has reached its fixed point.
#[derive(Debug, Clone)]
pub struct Resolution<D> {
    registry: TypeRegistry<D>,
    processed_count: usize,
    files: Vec<FileRecord>,
    unresolved: Vec<FileId>,
}

impl<D> Resolution<D> {
    pub fn registry(&self) -> &TypeRegistry<D> {
        &self.registry
    }

    /// Number of files that resolved.
    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    /// Every input file, in input order.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Files that were still deferred at the fixed point, in deferral order.
    pub fn unresolved(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.unresolved.iter().map(|id| &self.files[id.index()])
    }

    pub fn unresolved_paths(&self) -> Vec<&str> {
        self.unresolved().map(FileRecord::path).collect()
    }

    /// True when every file resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Diagnostics for the caller to report: self-duplicate warnings in input
    /// order, then one error per unresolved file.
    pub fn diagnostics(&self) -> Vec<ResolutionDiagnostic> {
        let mut diagnostics = Vec::new();

        for file in &self.files {
            let mut names: Vec<&String> = file.self_duplicates().iter().collect();
            names.sort();
            diagnostics.extend(names.into_iter().map(|name| ResolutionDiagnostic::SelfDuplicateName {
                path: file.path().to_string(),
                name: name.clone(),
            }));
        }

        diagnostics.extend(self.unresolved().map(|file| ResolutionDiagnostic::PermanentlyUnresolved {
            path: file.path().to_string(),
            missing: file
                .pending_error()
                .map(|reference| reference.name.clone())
                .unwrap_or_else(|| "<unknown>".to_string()),
        }));

        diagnostics
    }
}
