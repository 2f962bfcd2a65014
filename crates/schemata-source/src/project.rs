use crate::{relative_location, ProjectConfig, ProjectError, SourceFile};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the configuration file marking a project root
pub const CONFIG_FILE_NAME: &str = "schemata.toml";

/// A loaded project: its root, configuration and discovered schema files.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
    files: Vec<SourceFile>,
}

impl Project {
    /// Loads the project rooted at `root`.
    ///
    /// A missing `schemata.toml` is not an error: the defaults are used and a
    /// warning is logged. Files are returned sorted by their relative location
    /// so that two runs over the same tree see the same input order.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let input = root.as_ref();
        let root = input
            .canonicalize()
            .map_err(|_| ProjectError::PathNotFound(input.to_path_buf()))?;

        let config = load_config(&root)?;
        let source_dir = root.join(&config.project.source_dir);
        if !source_dir.is_dir() {
            return Err(ProjectError::SourceDirNotFound(source_dir));
        }

        let mut paths = Vec::new();
        collect_source_files(&source_dir, &config.project.extension, &mut paths)?;

        let mut files = paths
            .into_iter()
            .map(|path| {
                let contents = fs::read_to_string(&path).map_err(|err| ProjectError::SourceReadError {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
                Ok(SourceFile::new(relative_location(&root, &path), contents))
            })
            .collect::<Result<Vec<_>, ProjectError>>()?;
        files.sort_by(|a, b| a.location().cmp(b.location()));

        log::debug!(
            "Discovered {} `.{}` file(s) under {}",
            files.len(),
            config.project.extension,
            source_dir.display()
        );

        Ok(Self { root, config, files })
    }

    /// Builds a project from already-loaded parts, bypassing the filesystem.
    pub fn from_parts(root: PathBuf, config: ProjectConfig, files: Vec<SourceFile>) -> Self {
        Self { root, config, files }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Looks up a discovered file by its relative location.
    pub fn file(&self, location: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.location() == location)
    }
}

/// Reads `schemata.toml` from `root`, falling back to defaults when absent.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ProjectError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        log::warn!("No {} in {}, using default configuration", CONFIG_FILE_NAME, root.display());
        return Ok(ProjectConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|err| ProjectError::ConfigReadError {
        path: path.clone(),
        message: err.to_string(),
    })?;
    toml::from_str(&content).map_err(|err| ProjectError::ConfigParseError {
        path,
        message: err.to_string(),
    })
}

/// Finds the root directory of a project by searching upwards for `schemata.toml`.
pub fn find_project_root(start_path: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = if start_path.is_dir() {
        start_path.to_path_buf()
    } else {
        start_path
            .parent()
            .map_or_else(|| start_path.to_path_buf(), |p| p.to_path_buf())
    };

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return current
                .canonicalize()
                .map_err(|_| ProjectError::PathNotFound(current.clone()));
        }

        if !current.pop() {
            return Err(ProjectError::ConfigNotFound(start_path.to_path_buf()));
        }
    }
}

/// Collects every file with the given extension below `dir`.
///
/// Symlinked directories are not descended into, so a link pointing back up
/// the tree cannot make the same file show up more than once. Symlinks to
/// files are kept. Entries that cannot be read are skipped with a warning.
fn collect_source_files(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<(), ProjectError> {
    fs::read_dir(dir).map_err(|err| ProjectError::SourceReadError {
        path: dir.to_path_buf(),
        message: err.to_string(),
    })?;

    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                continue;
            }
        };

        let is_file = if entry.path_is_symlink() {
            entry.path().is_file()
        } else {
            entry.file_type().is_file()
        };
        if is_file && entry.path().extension().map_or(false, |ext| ext == extension) {
            out.push(entry.into_path());
        }
    }

    Ok(())
}
