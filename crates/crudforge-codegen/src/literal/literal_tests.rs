#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

#[test_case(json!(null), "null" ; "null")]
#[test_case(json!(true), "true" ; "true")]
#[test_case(json!(false), "false" ; "false")]
#[test_case(json!(100), "100" ; "integer")]
#[test_case(json!(-7), "-7" ; "negative")]
#[test_case(json!(1.5), "1.5" ; "float")]
#[test_case(json!("foo"), "'foo'" ; "string")]
fn to_php___scalars(value: Value, expected: &str) {
    assert_eq!(to_php(&value, false), expected);
}

#[test]
fn php_string___escapes_quotes_and_backslashes() {
    assert_eq!(php_string("it's"), "'it\\'s'");
    assert_eq!(php_string("App\\Models"), "'App\\Models'");
    assert_eq!(php_string("C:\\"), "'C:\\\\'");
    assert_eq!(php_string("a\\'b"), "'a\\\\\\'b'");
    assert_eq!(php_string("$var"), "'$var'");
}

#[test]
fn to_php___list___renders_bracketed() {
    assert_eq!(to_php(&json!([1, 2, 3]), false), "[1, 2, 3]");
}

#[test]
fn to_php___mapping___renders_keys() {
    let value = json!({"a": 1, "b": "x"});

    assert_eq!(to_php(&value, false), "['a' => 1, 'b' => 'x']");
}

#[test]
fn to_php___contiguous_integer_keys___render_as_list() {
    let value = json!({"0": "a", "1": "b"});

    assert_eq!(to_php(&value, false), "['a', 'b']");
}

#[test]
fn to_php___sparse_integer_keys___stay_unquoted() {
    let value = json!({"1": "Bad", "5": "Great"});

    assert_eq!(to_php(&value, false), "[1 => 'Bad', 5 => 'Great']");
}

#[test]
fn to_php___leading_zero_key___is_quoted() {
    let value = json!({"01": "x"});

    assert_eq!(to_php(&value, false), "['01' => 'x']");
}

#[test]
fn to_php___empty_containers() {
    assert_eq!(to_php(&json!([]), true), "[]");
    assert_eq!(to_php(&json!({}), false), "[]");
}

#[test]
fn to_php___raw_code___is_emitted_verbatim() {
    let value = json!({"options": "eval(\"$category_options\")"});

    assert_eq!(to_php(&value, false), "['options' => $category_options]");
}

#[test]
fn raw___wraps_and_unwraps() {
    let value = raw("storage_path('app')");

    assert_eq!(value, json!("eval(\"storage_path('app')\")"));
    assert_eq!(raw_code(value.as_str().unwrap()), Some("storage_path('app')"));
    assert_eq!(raw_code("plain"), None);
}

#[test]
fn to_php___pretty___indents_nested_containers() {
    let value = json!({
        "a": 1,
        "c": {"c1": 3, "c2": [4, 5]}
    });

    let expected = "\
[
    'a' => 1,
    'c' => [
        'c1' => 3,
        'c2' => [
            4,
            5
        ]
    ]
]";
    assert_eq!(to_php(&value, true), expected);
}
