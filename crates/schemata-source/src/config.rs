use serde::{Deserialize, Serialize};

/// Contents of a `schemata.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project information and source layout
    #[serde(default)]
    pub project: ProjectInfo,

    /// Tuning for the resolution loop
    #[serde(default)]
    pub resolve: ResolveSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Name of the project, only used for display
    #[serde(default)]
    pub name: String,

    /// Directory, relative to the project root, that is scanned for schema files
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// File extension (without the dot) of schema files
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_dir: default_source_dir(),
            extension: default_extension(),
        }
    }
}

pub fn default_source_dir() -> String {
    ".".to_string()
}

pub fn default_extension() -> String {
    "avsc".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ResolveSettings {
    /// Which deferred files are retried after a file resolves
    #[serde(default)]
    pub requeue: RequeueMode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequeueMode {
    /// Retry every deferred file
    #[default]
    All,
    /// Retry only files waiting on a name that just became known
    Targeted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.project.source_dir, ".");
        assert_eq!(config.project.extension, "avsc");
        assert_eq!(config.resolve.requeue, RequeueMode::All);
    }

    #[test]
    fn reads_all_sections() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [project]
            name = "events"
            source_dir = "schemas"
            extension = "json"

            [resolve]
            requeue = "targeted"
            "#,
        )
        .unwrap();
        assert_eq!(config.project.name, "events");
        assert_eq!(config.project.source_dir, "schemas");
        assert_eq!(config.project.extension, "json");
        assert_eq!(config.resolve.requeue, RequeueMode::Targeted);
    }

    #[test]
    fn rejects_unknown_requeue_mode() {
        let result = toml::from_str::<ProjectConfig>("[resolve]\nrequeue = \"sometimes\"\n");
        assert!(result.is_err());
    }
}
