//! Turns schema text into [`Schema`] values.
//!
//! Two entry points:
//! - [`declared_names`] lists every named type a file defines without
//!   resolving anything, so callers can spot repeated names up front.
//! - [`parse`] resolves the file against a set of already-known types.

use crate::error::{SyntaxError, SyntaxResult};
use crate::name::{is_identifier, Name};
use crate::schema::{EnumSchema, Field, FixedSchema, RecordSchema, Schema};
use indexmap::{IndexMap, IndexSet};
use miette::SourceSpan;
use serde_json::{Map, Value};

/// The result of parsing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// The file's top-level schema; a union when the file is a JSON array.
    pub root: Schema,
    /// Named types defined by the file, by full name, in definition order.
    /// Names defined more than once are left out.
    pub types: IndexMap<String, Schema>,
    /// Full names the file defines more than once.
    pub duplicates: Vec<String>,
}

/// Lists the full names of every named type defined in `text`, in document
/// order and with repeats kept.
pub fn declared_names(text: &str) -> SyntaxResult<Vec<String>> {
    let value = parse_json(text)?;
    let mut names = Vec::new();
    collect_declared(&value, None, &mut names)?;
    Ok(names)
}

fn collect_declared(value: &Value, enclosing: Option<&str>, out: &mut Vec<String>) -> SyntaxResult<()> {
    match value {
        Value::Array(branches) => {
            for branch in branches {
                collect_declared(branch, enclosing, out)?;
            }
        }
        Value::Object(object) => match object.get("type") {
            Some(Value::String(kind)) => match kind.as_str() {
                "record" | "error" | "enum" | "fixed" => {
                    let name = definition_name(object, enclosing)?;
                    out.push(name.fullname());
                    if let Some(Value::Array(fields)) = object.get("fields") {
                        for field in fields {
                            if let Some(ty) = field.get("type") {
                                collect_declared(ty, name.namespace.as_deref(), out)?;
                            }
                        }
                    }
                }
                "array" => {
                    if let Some(items) = object.get("items") {
                        collect_declared(items, enclosing, out)?;
                    }
                }
                "map" => {
                    if let Some(values) = object.get("values") {
                        collect_declared(values, enclosing, out)?;
                    }
                }
                _ => {}
            },
            Some(nested) => collect_declared(nested, enclosing, out)?,
            None => {}
        },
        _ => {}
    }
    Ok(())
}

/// Parses `text`, resolving references against names defined earlier in the
/// same file and then against `known`.
///
/// A name in `known` may be defined again here; the new definition wins. A
/// name defined twice within this file keeps its first definition for local
/// lookups and is reported in [`ParsedFile::duplicates`] instead of `types`.
pub fn parse(text: &str, known: &IndexMap<String, Schema>) -> SyntaxResult<ParsedFile> {
    let value = parse_json(text)?;
    let mut parser = Parser {
        known,
        local: IndexMap::new(),
        duplicates: IndexSet::new(),
    };
    let root = parser.parse_schema(&value, None)?;

    let duplicates: Vec<String> = parser.duplicates.into_iter().collect();
    let types = parser
        .local
        .into_iter()
        .filter(|(name, _)| !duplicates.contains(name))
        .collect();

    Ok(ParsedFile { root, types, duplicates })
}

struct Parser<'k> {
    known: &'k IndexMap<String, Schema>,
    /// Named types defined so far in this file. A record is present (with a
    /// placeholder) while its fields are parsed so it can refer to itself.
    local: IndexMap<String, Schema>,
    duplicates: IndexSet<String>,
}

impl Parser<'_> {
    fn parse_schema(&mut self, value: &Value, enclosing: Option<&str>) -> SyntaxResult<Schema> {
        match value {
            Value::String(name) => self.named_or_primitive(name, enclosing),
            Value::Array(branches) => {
                let branches = branches
                    .iter()
                    .map(|branch| self.parse_schema(branch, enclosing))
                    .collect::<SyntaxResult<Vec<_>>>()?;
                Ok(Schema::Union(branches))
            }
            Value::Object(object) => self.parse_object(object, enclosing),
            other => Err(SyntaxError::invalid(format!("expected a schema, found `{}`", other))),
        }
    }

    fn parse_object(&mut self, object: &Map<String, Value>, enclosing: Option<&str>) -> SyntaxResult<Schema> {
        let kind = match object.get("type") {
            Some(Value::String(kind)) => kind.as_str(),
            Some(nested) => return self.parse_schema(nested, enclosing),
            None => return Err(SyntaxError::invalid("schema object has no `type`")),
        };

        match kind {
            "record" | "error" => self.parse_record(object, enclosing, kind == "error"),
            "enum" => self.parse_enum(object, enclosing),
            "fixed" => self.parse_fixed(object, enclosing),
            "array" => {
                let items = required(object, "items", "array")?;
                Ok(Schema::Array(Box::new(self.parse_schema(items, enclosing)?)))
            }
            "map" => {
                let values = required(object, "values", "map")?;
                Ok(Schema::Map(Box::new(self.parse_schema(values, enclosing)?)))
            }
            other => self.named_or_primitive(other, enclosing),
        }
    }

    fn parse_record(&mut self, object: &Map<String, Value>, enclosing: Option<&str>, is_error: bool) -> SyntaxResult<Schema> {
        let name = definition_name(object, enclosing)?;
        let fullname = name.fullname();
        let first = self.begin_definition(&fullname);

        let fields = match object.get("fields") {
            Some(Value::Array(fields)) => fields,
            _ => return Err(SyntaxError::invalid(format!("record `{}` needs a `fields` array", fullname))),
        };

        let mut seen = IndexSet::new();
        let mut parsed = Vec::with_capacity(fields.len());
        for field in fields {
            let field = match field {
                Value::Object(field) => field,
                _ => return Err(SyntaxError::invalid(format!("field of `{}` is not an object", fullname))),
            };
            let field_name = match field.get("name") {
                Some(Value::String(field_name)) if is_identifier(field_name) => field_name.clone(),
                Some(Value::String(field_name)) => return Err(SyntaxError::InvalidName { name: field_name.clone() }),
                _ => return Err(SyntaxError::invalid(format!("field of `{}` has no `name`", fullname))),
            };
            if !seen.insert(field_name.clone()) {
                return Err(SyntaxError::invalid(format!(
                    "field `{}` appears twice in `{}`",
                    field_name, fullname
                )));
            }
            let ty = field
                .get("type")
                .ok_or_else(|| SyntaxError::invalid(format!("field `{}.{}` has no `type`", fullname, field_name)))?;
            let schema = self.parse_schema(ty, name.namespace.as_deref())?;

            parsed.push(Field {
                name: field_name,
                schema,
                doc: string_attr(field, "doc"),
                default: field.get("default").cloned(),
            });
        }

        let record = Schema::Record(RecordSchema {
            name,
            doc: string_attr(object, "doc"),
            fields: parsed,
            is_error,
        });
        Ok(self.finish_definition(fullname, first, record))
    }

    fn parse_enum(&mut self, object: &Map<String, Value>, enclosing: Option<&str>) -> SyntaxResult<Schema> {
        let name = definition_name(object, enclosing)?;
        let fullname = name.fullname();

        let symbols = match object.get("symbols") {
            Some(Value::Array(symbols)) => symbols
                .iter()
                .map(|symbol| match symbol {
                    Value::String(symbol) if is_identifier(symbol) => Ok(symbol.clone()),
                    other => Err(SyntaxError::invalid(format!("invalid symbol {} in enum `{}`", other, fullname))),
                })
                .collect::<SyntaxResult<Vec<_>>>()?,
            _ => return Err(SyntaxError::invalid(format!("enum `{}` needs a `symbols` array", fullname))),
        };
        let unique: IndexSet<&String> = symbols.iter().collect();
        if unique.len() != symbols.len() {
            return Err(SyntaxError::invalid(format!("enum `{}` repeats a symbol", fullname)));
        }

        let default = string_attr(object, "default");
        if let Some(default) = &default {
            if !symbols.contains(default) {
                return Err(SyntaxError::invalid(format!(
                    "default `{}` of enum `{}` is not one of its symbols",
                    default, fullname
                )));
            }
        }

        let first = self.begin_definition(&fullname);
        let schema = Schema::Enum(EnumSchema {
            name,
            doc: string_attr(object, "doc"),
            symbols,
            default,
        });
        Ok(self.finish_definition(fullname, first, schema))
    }

    fn parse_fixed(&mut self, object: &Map<String, Value>, enclosing: Option<&str>) -> SyntaxResult<Schema> {
        let name = definition_name(object, enclosing)?;
        let fullname = name.fullname();
        let size = object
            .get("size")
            .and_then(Value::as_u64)
            .ok_or_else(|| SyntaxError::invalid(format!("fixed `{}` needs a non-negative integer `size`", fullname)))?;

        let first = self.begin_definition(&fullname);
        Ok(self.finish_definition(fullname, first, Schema::Fixed(FixedSchema { name, size })))
    }

    /// Claims `fullname` for a definition in progress. Returns false when the
    /// file already defined it.
    fn begin_definition(&mut self, fullname: &str) -> bool {
        if self.local.contains_key(fullname) {
            self.duplicates.insert(fullname.to_string());
            false
        } else {
            self.local.insert(fullname.to_string(), Schema::Null);
            true
        }
    }

    /// Stores a completed definition. The definition is also returned in
    /// place, so the root schema stays complete.
    fn finish_definition(&mut self, fullname: String, first: bool, schema: Schema) -> Schema {
        if first {
            self.local.insert(fullname, schema.clone());
        }
        schema
    }

    fn named_or_primitive(&self, raw: &str, enclosing: Option<&str>) -> SyntaxResult<Schema> {
        if let Some(primitive) = Schema::primitive(raw) {
            return Ok(primitive);
        }

        let name = Name::parse(raw, None, enclosing)?;
        let fullname = name.fullname();
        if self.is_defined(&fullname) {
            return Ok(Schema::Ref(name));
        }

        // An unqualified reference may also mean a type in the null namespace.
        if !raw.contains('.') && fullname != raw {
            if self.is_defined(raw) {
                return Ok(Schema::Ref(Name::parse(raw, Some(""), None)?));
            }
            return Err(SyntaxError::UndefinedName {
                name: fullname,
                unqualified: Some(raw.to_string()),
            });
        }

        Err(SyntaxError::UndefinedName {
            name: fullname,
            unqualified: None,
        })
    }

    fn is_defined(&self, fullname: &str) -> bool {
        self.local.contains_key(fullname) || self.known.contains_key(fullname)
    }
}

fn definition_name(object: &Map<String, Value>, enclosing: Option<&str>) -> SyntaxResult<Name> {
    let raw = match object.get("name") {
        Some(Value::String(raw)) => raw,
        _ => return Err(SyntaxError::invalid("named type has no `name`")),
    };
    let namespace = match object.get("namespace") {
        Some(Value::String(ns)) => Some(ns.as_str()),
        Some(Value::Null) | None => None,
        Some(other) => return Err(SyntaxError::invalid(format!("invalid namespace {}", other))),
    };
    let name = Name::parse(raw, namespace, enclosing)?;
    // References to a primitive name never reach a named type.
    if Schema::primitive(&name.name).is_some() {
        return Err(SyntaxError::InvalidName { name: raw.clone() });
    }
    Ok(name)
}

fn required<'v>(object: &'v Map<String, Value>, key: &str, kind: &str) -> SyntaxResult<&'v Value> {
    object
        .get(key)
        .ok_or_else(|| SyntaxError::invalid(format!("{} schema has no `{}`", kind, key)))
}

fn string_attr(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_json(text: &str) -> SyntaxResult<Value> {
    serde_json::from_str(text).map_err(|err| SyntaxError::InvalidJson {
        message: err.to_string(),
        span: offset_of(text, err.line(), err.column()).map(|offset| SourceSpan::from((offset, 0))),
    })
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn offset_of(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = text.split_inclusive('\n').take(line - 1).map(str::len).sum();
    Some((line_start + column.saturating_sub(1)).min(text.len()))
}
