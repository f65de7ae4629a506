use serde_csvxml::{csv, value, xml, Record, Value};

#[test]
fn test_value_macro_null() {
    let value = value!(null);
    assert!(value.is_nil());
    assert_eq!(value, Value::Scalar(String::new()));
}

#[test]
fn test_value_macro_scalars_are_text() {
    assert_eq!(value!(true), Value::from("true"));
    assert_eq!(value!(false), Value::from("false"));
    assert_eq!(value!(42), Value::from("42"));
    assert_eq!(value!(-123), Value::from("-123"));
    assert_eq!(value!(3.5), Value::from("3.5"));
    assert_eq!(value!('c'), Value::from("c"));
    assert_eq!(value!(""), Value::default());
}

#[test]
fn test_value_macro_expressions() {
    let count = 7u8;
    let name = String::from("Alice");
    assert_eq!(value!(count), Value::from("7"));
    assert_eq!(value!(name.as_str()), Value::from("Alice"));
    assert_eq!(value!(vec![1, 2]), Value::Sequence(vec!["1".into(), "2".into()]));
}

#[test]
fn test_value_macro_nested() {
    let value = value!({
        "id": 1,
        "tags": ["a", "b"],
        "owner": { "name": "Bob" },
        "note": null
    });

    let record = value.as_record().unwrap();
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "tags", "owner", "note"]);

    assert_eq!(value.get("tags").and_then(|t| t.get_index(1)), Some(&Value::from("b")));
    assert_eq!(
        value.get("owner").and_then(|o| o.get("name")),
        Some(&Value::from("Bob"))
    );
    assert!(value.get("note").map(Value::is_nil).unwrap_or(false));
}

#[test]
fn test_value_macro_trailing_commas() {
    let seq = value!([1, 2,]);
    assert_eq!(seq.as_sequence().map(Vec::len), Some(2));

    let record = value!({ "a": 1, });
    assert_eq!(record.as_record().map(Record::len), Some(1));
}

#[test]
fn test_value_macro_encodes() {
    let rows = value!([
        { "id": 1, "name": "a" },
        { "id": 2, "name": "b, c" }
    ]);

    assert_eq!(
        csv::to_string_with_keys(&rows, ["id", "name"]).unwrap(),
        "id,name\n1,a\n2,\"b, c\""
    );
    assert_eq!(
        xml::to_string(&rows).unwrap(),
        "<item><id>1</id><name>a</name></item><item><id>2</id><name>b, c</name></item>"
    );
}

#[test]
fn test_value_macro_matches_decoded() {
    let expected = value!([{ "id": 1, "name": "a" }]);
    let decoded: Value = csv::from_str("id,name\n1,a").unwrap();
    assert_eq!(decoded, expected);
}
