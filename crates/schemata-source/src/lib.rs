//! Source file management for schemata.
//!
//! This crate is responsible for:
//! - Reading the `schemata.toml` project configuration
//! - Discovering schema files below the configured source directory
//! - Giving every file a stable, project-relative location used in diagnostics
//!
//! Nothing here interprets file contents. The files are handed as-is to the
//! resolver, which decides when each one is parsed.

mod config;
mod error;
mod file;
mod path;
mod project;

pub use config::{default_extension, default_source_dir, ProjectConfig, ProjectInfo, RequeueMode, ResolveSettings};
pub use error::ProjectError;
pub use file::SourceFile;
pub use path::relative_location;
pub use project::{find_project_root, load_config, Project, CONFIG_FILE_NAME};
