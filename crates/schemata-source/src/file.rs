/// A schema source file.
///
/// `location` is the project-relative path, always `/`-separated. Downstream
/// code keys files by location, and rejects two inputs that share one.
/// Equality compares the contents too, so two snapshots of the same file taken
/// before and after an edit are not equal.
///
/// # Example
///
/// ```rust
/// use schemata_source::SourceFile;
///
/// let file = SourceFile::new("schemas/user.avsc", r#"{"type": "record", "name": "User", "fields": []}"#);
/// assert_eq!(file.location(), "schemas/user.avsc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    /// Project-relative path of the file
    location: String,

    /// Raw text of the file
    contents: String,
}

impl SourceFile {
    pub fn new(location: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            contents: contents.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}
