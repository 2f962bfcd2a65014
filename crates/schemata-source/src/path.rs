use std::path::{Component, Path};

/// Renders `file` relative to `root` with `/` separators.
///
/// Falls back to the full path when `file` does not live under `root`.
pub fn relative_location(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect();
    segments.join("/")
}
