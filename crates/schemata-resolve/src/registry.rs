use fxhash::FxHashSet;
use indexmap::{IndexMap, IndexSet};

/// Everything known about one type name.
///
/// Every file that ever defined the name is kept in `defining_paths`, in the
/// order the definitions were merged. The definition itself is whatever the
/// last merge supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry<D> {
    name: String,
    defining_paths: IndexSet<String>,
    definition: Option<D>,
}

impl<D> TypeEntry<D> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            defining_paths: IndexSet::new(),
            definition: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files that defined this type, first-seen order.
    pub fn defining_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.defining_paths.iter().map(String::as_str)
    }

    /// The latest merged definition, `None` only for an entry that was
    /// created but never merged into.
    pub fn definition(&self) -> Option<&D> {
        self.definition.as_ref()
    }

    /// True when more than one file has defined this name.
    pub fn is_redefined(&self) -> bool {
        self.defining_paths.len() > 1
    }

    fn merge(&mut self, path: &str, definition: D) {
        if !self.defining_paths.contains(path) {
            self.defining_paths.insert(path.to_string());
        }
        self.definition = Some(definition);
    }
}

/// The global type-name table shared by every attempt.
///
/// Names are never removed. Redefinitions overwrite the stored definition
/// (last writer wins); whether two definitions are compatible is the
/// parser's business.
#[derive(Debug, Clone)]
pub struct TypeRegistry<D> {
    entries: IndexMap<String, TypeEntry<D>>,
}

impl<D> Default for TypeRegistry<D> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<D> TypeRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, inserting an empty one if needed.
    pub fn get_or_create(&mut self, name: &str) -> &mut TypeEntry<D> {
        if !self.entries.contains_key(name) {
            self.entries.insert(name.to_string(), TypeEntry::new(name));
        }
        &mut self.entries[name]
    }

    /// Records that `path` defined `name` as `definition`.
    pub fn merge(&mut self, name: &str, path: &str, definition: D) {
        self.get_or_create(name).merge(path, definition);
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntry<D>> {
        self.entries.get(name)
    }

    pub fn definition(&self, name: &str) -> Option<&D> {
        self.entries.get(name).and_then(TypeEntry::definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order their names were first merged.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry<D>> + '_ {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

impl<D: Clone> TypeRegistry<D> {
    /// Snapshot of every defined type whose name is not in `excluding`.
    ///
    /// This is the world a single attempt gets to see.
    pub fn visible_types(&self, excluding: &FxHashSet<String>) -> IndexMap<String, D> {
        self.entries
            .iter()
            .filter(|(name, _)| !excluding.contains(name.as_str()))
            .filter_map(|(name, entry)| entry.definition.clone().map(|def| (name.clone(), def)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluding(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn get_or_create_inserts_empty_entry() {
        let mut registry: TypeRegistry<u32> = TypeRegistry::new();
        let entry = registry.get_or_create("Foo");
        assert_eq!(entry.name(), "Foo");
        assert_eq!(entry.definition(), None);
        assert_eq!(entry.defining_paths().count(), 0);
        assert_eq!(registry.len(), 1);

        // Empty entries are not visible.
        assert!(registry.visible_types(&excluding(&[])).is_empty());
    }

    #[test]
    fn get_or_create_returns_existing_entry() {
        let mut registry = TypeRegistry::new();
        registry.merge("Foo", "a.avsc", 1);
        let entry = registry.get_or_create("Foo");
        assert_eq!(entry.definition(), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn merge_is_last_writer_wins() {
        let mut registry = TypeRegistry::new();
        registry.merge("Foo", "a.avsc", 1);
        registry.merge("Foo", "b.avsc", 2);

        let entry = registry.get("Foo").unwrap();
        assert_eq!(entry.definition(), Some(&2));
        assert_eq!(entry.defining_paths().collect::<Vec<_>>(), vec!["a.avsc", "b.avsc"]);
        assert!(entry.is_redefined());
    }

    #[test]
    fn repeated_merge_does_not_grow_paths() {
        let mut registry = TypeRegistry::new();
        registry.merge("Foo", "a.avsc", 1);
        registry.merge("Foo", "a.avsc", 1);

        let entry = registry.get("Foo").unwrap();
        assert_eq!(entry.defining_paths().collect::<Vec<_>>(), vec!["a.avsc"]);
        assert!(!entry.is_redefined());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.visible_types(&excluding(&[])).len(), 1);

        registry.merge("Foo", "a.avsc", 3);
        assert_eq!(registry.definition("Foo"), Some(&3));
    }

    #[test]
    fn visible_types_hides_excluded_names() {
        let mut registry = TypeRegistry::new();
        registry.merge("Foo", "a.avsc", 1);
        registry.merge("Bar", "a.avsc", 2);
        registry.merge("Baz", "b.avsc", 3);

        let visible = registry.visible_types(&excluding(&["Bar"]));
        assert_eq!(visible.keys().collect::<Vec<_>>(), vec!["Foo", "Baz"]);
        assert_eq!(visible["Baz"], 3);
        // Hiding is per snapshot, the registry keeps the name.
        assert!(registry.contains("Bar"));
    }
}
