use std::path::PathBuf;

use schemata_db::{Compiler, ResolvedProject};
use serde_json::{json, Map, Value};

use crate::error::CliError;
use crate::utils::project_root;

pub fn handle_types(path: Option<PathBuf>, as_json: bool) -> Result<(), CliError> {
    let root = project_root(path)?;
    let resolved = Compiler::new(root).resolve()?;

    if !resolved.is_complete() {
        log::warn!(
            "{} file(s) could not be resolved; run `schemata check` for details",
            resolved.unresolved_paths().len()
        );
    }

    if as_json {
        let rendered = serde_json::to_string_pretty(&types_json(&resolved))
            .map_err(|e| CliError::InternalError(format!("Failed to serialize types: {}", e)))?;
        println!("{}", rendered);
    } else {
        for line in types_table(&resolved) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn types_json(resolved: &ResolvedProject) -> Value {
    let mut types = Map::new();
    for entry in resolved.types() {
        let Some(schema) = entry.definition() else {
            continue;
        };
        types.insert(
            entry.name().to_string(),
            json!({
                "paths": entry.defining_paths().collect::<Vec<_>>(),
                "schema": schema.to_json(),
            }),
        );
    }
    Value::Object(types)
}

fn types_table(resolved: &ResolvedProject) -> Vec<String> {
    let entries = resolved.types();
    let width = entries.iter().map(|entry| entry.name().len()).max().unwrap_or(0);
    entries
        .into_iter()
        .filter_map(|entry| {
            let schema = entry.definition()?;
            let paths = entry.defining_paths().collect::<Vec<_>>().join(", ");
            Some(format!("{:width$}  {:<24}  {}", entry.name(), schema.to_string(), paths, width = width))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn resolve_fixture(root: &Path) -> ResolvedProject {
        let write = |relative: &str, contents: &str| {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        };
        write("schemata.toml", "[project]\nname = \"shop\"\nsource_dir = \"schemas\"\n");
        write(
            "schemas/id.avsc",
            r#"{"type": "fixed", "name": "Id", "namespace": "com.acme", "size": 16}"#,
        );
        write(
            "schemas/legacy/id.avsc",
            r#"{"type": "fixed", "name": "Id", "namespace": "com.acme", "size": 8}"#,
        );
        write(
            "schemas/user.avsc",
            r#"{"type": "record", "name": "User", "namespace": "com.acme", "fields": [{"name": "id", "type": "Id"}]}"#,
        );
        Compiler::new(root.to_path_buf()).resolve().unwrap()
    }

    #[test]
    fn json_lists_paths_and_schema_per_type() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_fixture(dir.path());

        let value = types_json(&resolved);
        let types = value.as_object().unwrap();
        assert_eq!(types.keys().collect::<Vec<_>>(), vec!["com.acme.Id", "com.acme.User"]);

        let id = &types["com.acme.Id"];
        assert_eq!(id["paths"], json!(["schemas/id.avsc", "schemas/legacy/id.avsc"]));
        assert_eq!(id["schema"]["type"], "fixed");
        assert_eq!(id["schema"]["size"], 8);

        let user = &types["com.acme.User"];
        assert_eq!(user["paths"], json!(["schemas/user.avsc"]));
        assert_eq!(user["schema"]["name"], "com.acme.User");
    }

    #[test]
    fn table_columns_line_up() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_fixture(dir.path());

        let lines = types_table(&resolved);
        assert_eq!(lines.len(), 2);

        let name_width = "com.acme.User".len();
        let schema_column = name_width + 2;
        let paths_column = schema_column + 24 + 2;
        assert!(lines[0].starts_with("com.acme.Id "));
        assert!(lines[1].starts_with("com.acme.User "));
        assert!(lines[0][schema_column..].starts_with("fixed com.acme.Id(8)"));
        assert!(lines[1][schema_column..].starts_with("record com.acme.User"));
        assert_eq!(&lines[0][paths_column..], "schemas/id.avsc, schemas/legacy/id.avsc");
        assert_eq!(&lines[1][paths_column..], "schemas/user.avsc");
    }
}
