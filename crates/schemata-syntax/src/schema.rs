use crate::name::Name;
use serde_json::{json, Map, Value};
use std::fmt;

/// A resolved schema.
///
/// References to named types are kept as [`Schema::Ref`] rather than inlined,
/// so recursive and cross-file types stay finite.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(Box<Schema>),
    Map(Box<Schema>),
    Union(Vec<Schema>),
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    Ref(Name),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: Name,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
    /// Declared with `"type": "error"` rather than `"record"`
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub doc: Option<String>,
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: Name,
    pub doc: Option<String>,
    pub symbols: Vec<String>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: Name,
    pub size: u64,
}

impl Schema {
    /// Looks up a primitive type by its Avro name.
    pub fn primitive(name: &str) -> Option<Schema> {
        Some(match name {
            "null" => Schema::Null,
            "boolean" => Schema::Boolean,
            "int" => Schema::Int,
            "long" => Schema::Long,
            "float" => Schema::Float,
            "double" => Schema::Double,
            "bytes" => Schema::Bytes,
            "string" => Schema::String,
            _ => return None,
        })
    }

    /// The name of a named type definition; `None` for everything else,
    /// including references.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Schema::Record(record) => Some(&record.name),
            Schema::Enum(schema) => Some(&schema.name),
            Schema::Fixed(fixed) => Some(&fixed.name),
            _ => None,
        }
    }

    /// Every named type this schema refers to, depth first.
    pub fn references(&self) -> Vec<&Name> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Schema::Ref(name) => out.push(name),
            Schema::Array(items) | Schema::Map(items) => items.collect_references(out),
            Schema::Union(branches) => branches.iter().for_each(|b| b.collect_references(out)),
            Schema::Record(record) => record.fields.iter().for_each(|f| f.schema.collect_references(out)),
            _ => {}
        }
    }

    /// Renders the schema back to JSON with full names everywhere.
    pub fn to_json(&self) -> Value {
        match self {
            Schema::Array(items) => json!({"type": "array", "items": items.to_json()}),
            Schema::Map(values) => json!({"type": "map", "values": values.to_json()}),
            Schema::Union(branches) => Value::Array(branches.iter().map(Schema::to_json).collect()),
            Schema::Record(record) => {
                let mut object = named_object(if record.is_error { "error" } else { "record" }, &record.name);
                insert_doc(&mut object, &record.doc);
                let fields = record
                    .fields
                    .iter()
                    .map(|field| {
                        let mut entry = Map::new();
                        entry.insert("name".to_string(), Value::String(field.name.clone()));
                        entry.insert("type".to_string(), field.schema.to_json());
                        insert_doc(&mut entry, &field.doc);
                        if let Some(default) = &field.default {
                            entry.insert("default".to_string(), default.clone());
                        }
                        Value::Object(entry)
                    })
                    .collect();
                object.insert("fields".to_string(), Value::Array(fields));
                Value::Object(object)
            }
            Schema::Enum(schema) => {
                let mut object = named_object("enum", &schema.name);
                insert_doc(&mut object, &schema.doc);
                object.insert("symbols".to_string(), json!(schema.symbols));
                if let Some(default) = &schema.default {
                    object.insert("default".to_string(), Value::String(default.clone()));
                }
                Value::Object(object)
            }
            Schema::Fixed(fixed) => {
                let mut object = named_object("fixed", &fixed.name);
                object.insert("size".to_string(), json!(fixed.size));
                Value::Object(object)
            }
            Schema::Ref(name) => Value::String(name.fullname()),
            primitive => Value::String(primitive.to_string()),
        }
    }
}

fn named_object(kind: &str, name: &Name) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("type".to_string(), Value::String(kind.to_string()));
    object.insert("name".to_string(), Value::String(name.fullname()));
    object
}

fn insert_doc(object: &mut Map<String, Value>, doc: &Option<String>) {
    if let Some(doc) = doc {
        object.insert("doc".to_string(), Value::String(doc.clone()));
    }
}

/// Short one-line form, e.g. `array<com.acme.User>` or `union[null, string]`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Null => f.write_str("null"),
            Schema::Boolean => f.write_str("boolean"),
            Schema::Int => f.write_str("int"),
            Schema::Long => f.write_str("long"),
            Schema::Float => f.write_str("float"),
            Schema::Double => f.write_str("double"),
            Schema::Bytes => f.write_str("bytes"),
            Schema::String => f.write_str("string"),
            Schema::Array(items) => write!(f, "array<{}>", items),
            Schema::Map(values) => write!(f, "map<{}>", values),
            Schema::Union(branches) => {
                f.write_str("union[")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", branch)?;
                }
                f.write_str("]")
            }
            Schema::Record(record) if record.is_error => write!(f, "error {}", record.name),
            Schema::Record(record) => write!(f, "record {}", record.name),
            Schema::Enum(schema) => write!(f, "enum {}", schema.name),
            Schema::Fixed(fixed) => write!(f, "fixed {}({})", fixed.name, fixed.size),
            Schema::Ref(name) => write!(f, "{}", name),
        }
    }
}
