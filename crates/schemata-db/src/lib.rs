//! Orchestration for schemata.
//!
//! This crate loads a project, plugs the Avro schema parser into the
//! resolution engine and packages the outcome for reporting.

mod database;
mod error;
mod parser;

pub use database::{resolve_project, Compiler, ResolvedProject};
pub use error::{DatabaseError, DatabaseResult};
pub use parser::AvroParser;
