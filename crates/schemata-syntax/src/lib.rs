//! Avro-style JSON schema files.
//!
//! A file holds either a single schema or a JSON array of schemas. Named
//! types (`record`, `error`, `enum`, `fixed`) can be referenced by name from
//! anywhere after their definition, including from other files, provided the
//! caller passes those files' types in as `known`.
//!
//! ```rust
//! use indexmap::IndexMap;
//!
//! let text = r#"{"type": "record", "name": "User", "namespace": "com.acme",
//!                "fields": [{"name": "id", "type": "long"}]}"#;
//! let parsed = schemata_syntax::parse(text, &IndexMap::new()).unwrap();
//! assert!(parsed.types.contains_key("com.acme.User"));
//! ```

pub mod error;
pub mod name;
pub mod parser;
pub mod schema;

pub use error::{SyntaxError, SyntaxResult};
pub use name::Name;
pub use parser::{declared_names, parse, ParsedFile};
pub use schema::{EnumSchema, Field, FixedSchema, RecordSchema, Schema};
