use std::env;
use std::path::PathBuf;

use schemata_source::{find_project_root, ProjectError};

use crate::error::{convert_io_error, CliError};

/// Picks the project root for a command.
///
/// Without an explicit path the search starts in the current directory and
/// must find a `schemata.toml`. An explicit directory without one is used
/// as-is with the default configuration.
pub fn project_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(path) => match find_project_root(&path) {
            Ok(root) => Ok(root),
            Err(ProjectError::ConfigNotFound(_)) if path.is_dir() => Ok(path),
            Err(err) => Err(err.into()),
        },
        None => {
            let current_dir = env::current_dir()
                .map_err(|e| convert_io_error(e, PathBuf::from("."), "getting current directory"))?;
            Ok(find_project_root(&current_dir)?)
        }
    }
}
