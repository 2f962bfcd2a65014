use indexmap::IndexMap;
use schemata_syntax::{declared_names, parse, Name, Schema, SyntaxError};

fn no_types() -> IndexMap<String, Schema> {
    IndexMap::new()
}

fn known(texts: &[&str]) -> IndexMap<String, Schema> {
    let mut types = IndexMap::new();
    for text in texts {
        types.extend(parse(text, &types).unwrap().types);
    }
    types
}

const USER: &str = r#"{
    "type": "record",
    "name": "User",
    "namespace": "com.acme",
    "doc": "A registered user",
    "fields": [
        {"name": "id", "type": "long"},
        {"name": "email", "type": ["null", "string"], "default": null},
        {"name": "tags", "type": {"type": "array", "items": "string"}},
        {"name": "attributes", "type": {"type": "map", "values": "int"}}
    ]
}"#;

#[test]
fn test_parse_record_with_namespace() {
    let parsed = parse(USER, &no_types()).unwrap();
    assert_eq!(parsed.types.keys().collect::<Vec<_>>(), vec!["com.acme.User"]);
    assert!(parsed.duplicates.is_empty());

    let Schema::Record(record) = &parsed.types["com.acme.User"] else {
        panic!("expected a record");
    };
    assert_eq!(record.doc.as_deref(), Some("A registered user"));
    assert_eq!(record.fields.len(), 4);
    assert_eq!(record.fields[1].schema, Schema::Union(vec![Schema::Null, Schema::String]));
    assert_eq!(record.fields[1].default, Some(serde_json::Value::Null));
    assert_eq!(record.fields[2].schema, Schema::Array(Box::new(Schema::String)));
    assert_eq!(record.fields[3].schema, Schema::Map(Box::new(Schema::Int)));
    assert_eq!(parsed.root, parsed.types["com.acme.User"]);
}

#[test]
fn test_nested_types_inherit_namespace() {
    let text = r#"{
        "type": "record", "name": "Order", "namespace": "com.acme",
        "fields": [
            {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["OPEN", "CLOSED"]}},
            {"name": "hash", "type": {"type": "fixed", "name": "org.hash.Md5", "size": 16}},
            {"name": "previous", "type": ["null", "Status"]}
        ]
    }"#;

    assert_eq!(
        declared_names(text).unwrap(),
        vec!["com.acme.Order", "com.acme.Status", "org.hash.Md5"]
    );

    let parsed = parse(text, &no_types()).unwrap();
    assert_eq!(
        parsed.types.keys().collect::<Vec<_>>(),
        vec!["com.acme.Order", "com.acme.Status", "org.hash.Md5"]
    );
    let references: Vec<String> = parsed.types["com.acme.Order"].references().iter().map(|n| n.fullname()).collect();
    assert_eq!(references, vec!["com.acme.Status"]);
}

#[test]
fn test_recursive_record() {
    let text = r#"{"type": "record", "name": "Node", "fields": [
        {"name": "value", "type": "int"},
        {"name": "next", "type": ["null", "Node"]}
    ]}"#;
    let parsed = parse(text, &no_types()).unwrap();
    let Schema::Record(record) = &parsed.types["Node"] else {
        panic!("expected a record");
    };
    assert_eq!(
        record.fields[1].schema,
        Schema::Union(vec![Schema::Null, Schema::Ref(Name { name: "Node".into(), namespace: None })])
    );
}

#[test]
fn test_undefined_reference() {
    let text = r#"{"type": "record", "name": "Order", "namespace": "com.acme",
                  "fields": [{"name": "buyer", "type": "User"}]}"#;
    let err = parse(text, &no_types()).unwrap_err();
    assert_eq!(
        err,
        SyntaxError::UndefinedName {
            name: "com.acme.User".to_string(),
            unqualified: Some("User".to_string()),
        }
    );
    assert!(err.is_undefined_name());
}

#[test]
fn test_reference_to_known_type() {
    let types = known(&[USER]);
    let text = r#"{"type": "record", "name": "Order", "namespace": "com.acme",
                  "fields": [{"name": "buyer", "type": "User"}, {"name": "seller", "type": "com.acme.User"}]}"#;
    let parsed = parse(text, &types).unwrap();
    assert_eq!(parsed.types.keys().collect::<Vec<_>>(), vec!["com.acme.Order"]);

    let user = Name::parse("com.acme.User", None, None).unwrap();
    let Schema::Record(order) = &parsed.types["com.acme.Order"] else {
        panic!("expected a record");
    };
    assert_eq!(order.fields[0].schema, Schema::Ref(user.clone()));
    assert_eq!(order.fields[1].schema, Schema::Ref(user));
}

#[test]
fn test_unqualified_reference_falls_back_to_null_namespace() {
    let types = known(&[r#"{"type": "fixed", "name": "Id", "size": 8}"#]);
    let text = r#"{"type": "record", "name": "Order", "namespace": "com.acme",
                  "fields": [{"name": "id", "type": "Id"}]}"#;
    let parsed = parse(text, &types).unwrap();
    let Schema::Record(order) = &parsed.types["com.acme.Order"] else {
        panic!("expected a record");
    };
    assert_eq!(order.fields[0].schema.to_string(), "Id");
}

#[test]
fn test_forward_reference_in_same_file_is_undefined() {
    let text = r#"[
        {"type": "record", "name": "A", "fields": [{"name": "b", "type": "B"}]},
        {"type": "record", "name": "B", "fields": []}
    ]"#;
    let err = parse(text, &no_types()).unwrap_err();
    assert_eq!(
        err,
        SyntaxError::UndefinedName {
            name: "B".to_string(),
            unqualified: None,
        }
    );
}

#[test]
fn test_array_file_defines_several_types() {
    let text = r#"[
        {"type": "enum", "name": "Color", "symbols": ["RED", "GREEN"], "default": "RED"},
        {"type": "record", "name": "Paint", "fields": [{"name": "color", "type": "Color"}]}
    ]"#;
    let parsed = parse(text, &no_types()).unwrap();
    assert_eq!(parsed.types.keys().collect::<Vec<_>>(), vec!["Color", "Paint"]);
    expect_test::expect!["union[enum Color, record Paint]"].assert_eq(&parsed.root.to_string());
}

#[test]
fn test_duplicate_definition_in_one_file() {
    let text = r#"[
        {"type": "record", "name": "X", "fields": [{"name": "a", "type": "int"}]},
        {"type": "record", "name": "X", "fields": [{"name": "b", "type": "string"}]},
        {"type": "record", "name": "Y", "fields": [{"name": "x", "type": "X"}]}
    ]"#;

    assert_eq!(declared_names(text).unwrap(), vec!["X", "X", "Y"]);

    let parsed = parse(text, &no_types()).unwrap();
    assert_eq!(parsed.duplicates, vec!["X"]);
    assert_eq!(parsed.types.keys().collect::<Vec<_>>(), vec!["Y"]);
}

#[test]
fn test_known_type_may_be_redefined() {
    let types = known(&[USER]);
    let text = r#"{"type": "record", "name": "com.acme.User", "fields": [{"name": "id", "type": "string"}]}"#;
    let parsed = parse(text, &types).unwrap();
    assert!(parsed.duplicates.is_empty());
    let Schema::Record(user) = &parsed.types["com.acme.User"] else {
        panic!("expected a record");
    };
    assert_eq!(user.fields.len(), 1);
}

#[test]
fn test_invalid_json_has_span() {
    let err = parse("{\"type\": }", &no_types()).unwrap_err();
    match err {
        SyntaxError::InvalidJson { span, .. } => assert!(span.is_some()),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(declared_names("not json").is_err());
}

#[test]
fn test_invalid_schemas() {
    let cases = [
        r#"{"type": "record", "name": "R"}"#,
        r#"{"type": "record", "name": "R", "fields": [{"name": "a"}]}"#,
        r#"{"type": "record", "name": "R", "fields": [{"name": "a", "type": "int"}, {"name": "a", "type": "int"}]}"#,
        r#"{"type": "enum", "name": "E", "symbols": ["A", "A"]}"#,
        r#"{"type": "enum", "name": "E", "symbols": ["A"], "default": "B"}"#,
        r#"{"type": "fixed", "name": "F"}"#,
        r#"{"type": "array"}"#,
        r#"{"name": "NoType"}"#,
        r#"42"#,
    ];
    for case in cases {
        let err = parse(case, &no_types()).unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidSchema { .. }), "{}: {:?}", case, err);
    }

    let err = parse(r#"{"type": "record", "name": "bad-name", "fields": []}"#, &no_types()).unwrap_err();
    assert_eq!(err, SyntaxError::InvalidName { name: "bad-name".to_string() });
}

#[test]
fn test_named_type_cannot_take_primitive_name() {
    let text = r#"{"type": "fixed", "name": "int", "size": 4}"#;
    let err = parse(text, &no_types()).unwrap_err();
    assert_eq!(err, SyntaxError::InvalidName { name: "int".to_string() });
    assert_eq!(declared_names(text).unwrap_err(), err);

    let text = r#"{"type": "record", "name": "string", "namespace": "com.acme", "fields": []}"#;
    let err = parse(text, &no_types()).unwrap_err();
    assert_eq!(err, SyntaxError::InvalidName { name: "string".to_string() });
}

#[test]
fn test_to_json_uses_full_names() {
    let types = known(&[USER]);
    let text = r#"{"type": "record", "name": "Order", "namespace": "com.acme",
                  "fields": [{"name": "buyer", "type": "User", "doc": "who pays"}]}"#;
    let parsed = parse(text, &types).unwrap();
    let json = serde_json::to_string(&parsed.types["com.acme.Order"].to_json()).unwrap();
    expect_test::expect![[r#"{"type":"record","name":"com.acme.Order","fields":[{"name":"buyer","type":"com.acme.User","doc":"who pays"}]}"#]]
        .assert_eq(&json);
}

#[test]
fn test_display() {
    let parsed = parse(USER, &no_types()).unwrap();
    let Schema::Record(record) = &parsed.types["com.acme.User"] else {
        panic!("expected a record");
    };
    let rendered: Vec<String> = record.fields.iter().map(|f| f.schema.to_string()).collect();
    assert_eq!(rendered, vec!["long", "union[null, string]", "array<string>", "map<int>"]);
    expect_test::expect!["record com.acme.User"].assert_eq(&parsed.root.to_string());
}
