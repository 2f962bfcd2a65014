use std::path::PathBuf;

use schemata_db::Compiler;

use crate::error::CliError;
use crate::utils::project_root;

pub fn handle_check(path: Option<PathBuf>) -> Result<(), CliError> {
    let root = project_root(path)?;
    println!("Checking project at: {}", root.display());

    let resolved = Compiler::new(root).resolve()?;

    for report in resolved.reports() {
        eprintln!("{:?}", report);
    }

    println!(
        "Resolved {} of {} file(s), {} type(s) defined.",
        resolved.processed_count(),
        resolved.file_count(),
        resolved.registry().len()
    );

    if resolved.is_complete() {
        Ok(())
    } else {
        Err(CliError::Unresolved {
            count: resolved.unresolved_paths().len(),
        })
    }
}
