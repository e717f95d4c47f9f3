use super::*;

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::from(true).type_name(), "bool");
    assert_eq!(Value::from(1.5).type_name(), "number");
    assert_eq!(Value::from("x").type_name(), "string");
    assert_eq!(Value::from(Vec::<Value>::new()).type_name(), "list");
}

#[test]
fn equality_is_structural() {
    assert_eq!(Value::from(2), Value::Number(2.0));
    assert_ne!(Value::from(1), Value::from(true));
    assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    assert_eq!(
        Value::from(vec![Value::from(1), Value::from("a")]),
        Value::list(vec![Value::Number(1.0), Value::string("a")])
    );
    assert_ne!(
        Value::from(vec![Value::from(1)]),
        Value::from(vec![Value::from(1), Value::from(2)])
    );
}

#[test]
fn accessors() {
    assert_eq!(Value::from(3).as_number(), Some(3.0));
    assert_eq!(Value::from(3).as_bool(), None);
    assert_eq!(Value::from(false).as_bool(), Some(false));
    assert_eq!(Value::from("hi").as_str(), Some("hi"));
    assert!(Value::Null.is_null());
    assert_eq!(Value::from(vec![Value::Null]).as_list().map(<[Value]>::len), Some(1));
}

#[test]
fn display_numbers_without_exponent() {
    assert_eq!(Value::from(5.0).to_string(), "5");
    assert_eq!(Value::from(0.1).to_string(), "0.1");
    assert_eq!(Value::from(-2.5).to_string(), "-2.5");
    assert_eq!(Value::from(1e21).to_string(), "1000000000000000000000");
}

#[test]
fn display_strings_and_lists() {
    assert_eq!(Value::from("a\"b\\c\nd\re").to_string(), r#""a\"b\\c\nd\re""#);
    assert_eq!(
        Value::from(vec![Value::from(1), Value::from("x"), Value::Null]).to_string(),
        r#"[1, "x", null]"#
    );
}

#[test]
fn quote_plain_string() {
    assert_eq!(quote_string("plain"), "\"plain\"");
    assert_eq!(quote_string(""), "\"\"");
}

#[test]
fn host_integers_become_numbers() {
    assert_eq!(Value::from(7_i8), Value::Number(7.0));
    assert_eq!(Value::from(9_u8), Value::Number(9.0));
    assert_eq!(Value::from(-300_i16), Value::Number(-300.0));
    assert_eq!(Value::from(9_u32), Value::Number(9.0));
    assert_eq!(Value::from(-4_i64), Value::Number(-4.0));
    assert_eq!(Value::from(9_usize), Value::Number(9.0));
    assert_eq!(Value::from(1.5_f32), Value::Number(1.5));
    assert_eq!(Value::from(u64::MAX), Value::Number(1.844_674_407_370_955_2e19));
}
