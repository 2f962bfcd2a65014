use crate::error::{SyntaxError, SyntaxResult};
use std::fmt;

/// The name of a named type, split into its simple name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    pub name: String,
    pub namespace: Option<String>,
}

impl Name {
    /// Resolves a name as written in a schema.
    ///
    /// A dotted `raw` name is already full. Otherwise the namespace comes from
    /// `namespace` (the `"namespace"` attribute, if any), falling back to
    /// `enclosing`. An empty namespace means the null namespace.
    pub fn parse(raw: &str, namespace: Option<&str>, enclosing: Option<&str>) -> SyntaxResult<Self> {
        let (namespace, name) = match raw.rsplit_once('.') {
            Some((ns, name)) => (Some(ns), name),
            None => (namespace.or(enclosing), raw),
        };
        let namespace = namespace.filter(|ns| !ns.is_empty());

        if !is_identifier(name) || !namespace.map_or(true, |ns| ns.split('.').all(is_identifier)) {
            return Err(SyntaxError::InvalidName { name: raw.to_string() });
        }

        Ok(Name {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
        })
    }

    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
