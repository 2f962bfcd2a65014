//! Incremental multi-pass type resolution for schema files.
//!
//! A project is a set of files, each of which may define named types and refer
//! to types defined in other files. Nothing tells us up front which file
//! depends on which, so the [`ResolutionEngine`] simply tries files in turn:
//!
//! 1. A file is attempted against every type resolved so far (minus the names
//!    the file itself declares more than once).
//! 2. If it resolves, its types are merged into the [`TypeRegistry`] and every
//!    deferred file goes back into the pending queue.
//! 3. If it needs a name nobody has defined yet, it is deferred.
//!
//! The loop stops when the pending queue is empty. Whatever is still deferred
//! at that point can never resolve and is reported in the [`Resolution`].
//!
//! The engine does not understand the schema language. Parsing is delegated to
//! a [`FileParser`], which only has to tell declared names apart and report
//! whether an attempt resolved, needs a missing name, or failed for good.

pub mod engine;
pub mod error;
pub mod file;
pub mod parser;
pub mod registry;

pub use engine::{Attempt, AttemptResult, RequeuePolicy, Resolution, ResolutionEngine};
pub use error::{ResolutionDiagnostic, ResolveError};
pub use file::{FileId, FileRecord, FileState};
pub use parser::{FileParser, Outcome, UnresolvedReference};
pub use registry::{TypeEntry, TypeRegistry};
