use indexmap::IndexMap;
use schemata_resolve::{FileParser, FileRecord, Outcome, UnresolvedReference};
use schemata_source::SourceFile;
use schemata_syntax::{Schema, SyntaxError};

/// Adapts [`schemata_syntax`] to the engine's parser contract.
///
/// Only `UndefinedName` is treated as "try again later"; every other syntax
/// error is fatal.
#[derive(Debug, Default, Clone)]
pub struct AvroParser;

impl FileParser for AvroParser {
    type Definition = Schema;
    type Error = SyntaxError;

    fn declared_names(&mut self, source: &SourceFile) -> Result<Vec<String>, SyntaxError> {
        schemata_syntax::declared_names(source.contents())
    }

    fn attempt(&mut self, file: &FileRecord, visible: &IndexMap<String, Schema>) -> Outcome<Schema, SyntaxError> {
        match schemata_syntax::parse(file.contents(), visible) {
            Ok(parsed) => {
                for name in &parsed.duplicates {
                    log::debug!("{}: `{}` is defined more than once and was not exported", file.path(), name);
                }
                Outcome::Resolved(parsed.types)
            }
            Err(SyntaxError::UndefinedName { name, unqualified }) => {
                let reference = match unqualified {
                    Some(raw) => UnresolvedReference::new(name).with_alternative(raw),
                    None => UnresolvedReference::new(name),
                };
                Outcome::Deferred(reference)
            }
            Err(err) => Outcome::Fatal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, text: &str) -> FileRecord {
        let source = SourceFile::new(path, text);
        let declared = AvroParser.declared_names(&source).unwrap();
        FileRecord::new(source, declared)
    }

    #[test]
    fn undefined_name_defers_with_alternative() {
        let file = record(
            "order.avsc",
            r#"{"type": "record", "name": "Order", "namespace": "shop", "fields": [{"name": "u", "type": "User"}]}"#,
        );
        match AvroParser.attempt(&file, &IndexMap::new()) {
            Outcome::Deferred(reference) => {
                assert_eq!(reference.name, "shop.User");
                assert!(reference.is_satisfied_by("User"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn malformed_file_is_fatal() {
        let file = FileRecord::new(SourceFile::new("bad.avsc", "{\"type\": \"record\"}"), Vec::<String>::new());
        assert!(matches!(
            AvroParser.attempt(&file, &IndexMap::new()),
            Outcome::Fatal(SyntaxError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn resolved_file_exports_types() {
        let file = record("id.avsc", r#"{"type": "fixed", "name": "Id", "size": 16}"#);
        match AvroParser.attempt(&file, &IndexMap::new()) {
            Outcome::Resolved(types) => assert_eq!(types.keys().collect::<Vec<_>>(), vec!["Id"]),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
