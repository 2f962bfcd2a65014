use std::fs;
use std::path::{Path, PathBuf};

use schemata_source::{ProjectConfig, ProjectInfo, CONFIG_FILE_NAME};

use crate::error::{convert_io_error, CliError};

const EXAMPLE_SCHEMA: &str = r#"{
  "type": "record",
  "name": "Example",
  "namespace": "example",
  "fields": [
    {"name": "id", "type": "long"}
  ]
}
"#;

pub fn handle_new(path: PathBuf, source_dir: &str) -> Result<(), CliError> {
    println!("Creating project `{}`", path.display());
    create_project(&path, source_dir)?;
    println!("Created {} and {}/", CONFIG_FILE_NAME, source_dir);
    Ok(())
}

fn create_project(path: &Path, source_dir: &str) -> Result<(), CliError> {
    let config_path = path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(CliError::ProjectExists(path.to_path_buf()));
    }

    // 1. Create the schema directory, and the root along with it.
    let schema_dir = path.join(source_dir);
    fs::create_dir_all(&schema_dir).map_err(|e| convert_io_error(e, schema_dir.clone(), "creating directory"))?;

    // 2. Write schemata.toml
    let project_name = path
        .file_name()
        .map_or_else(|| "schemas".to_string(), |n| n.to_string_lossy().into_owned());
    let config = ProjectConfig {
        project: ProjectInfo {
            name: project_name,
            source_dir: source_dir.to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    let toml_content = toml::to_string_pretty(&config)
        .map_err(|e| CliError::InternalError(format!("Failed to serialize {}: {}", CONFIG_FILE_NAME, e)))?;
    fs::write(&config_path, toml_content).map_err(|e| convert_io_error(e, config_path.clone(), "writing"))?;

    // 3. Seed one schema so `schemata check` has something to do.
    let example_path = schema_dir.join(format!("example.{}", config.project.extension));
    if !example_path.exists() {
        fs::write(&example_path, EXAMPLE_SCHEMA).map_err(|e| convert_io_error(e, example_path, "writing"))?;
    }

    Ok(())
}
