#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn SchemaError___undefined_variable_with_file___names_the_file() {
    let err = SchemaError::UndefinedVariable {
        key: "app.title".into(),
        file: Some(PathBuf::from("schema/common.yml")),
    };

    let display = err.to_string();

    assert_eq!(display, "'app.title' is undefined in 'schema/common.yml'");
}

#[test]
fn SchemaError___undefined_variable_without_file___points_at_schema() {
    let err = SchemaError::UndefinedVariable {
        key: "app.title".into(),
        file: None,
    };

    assert_eq!(err.to_string(), "'app.title' is undefined in your schema");
}

#[test]
fn SchemaError___extends_cycle___displays_chain() {
    let err = SchemaError::ExtendsCycle {
        chain: vec!["a".into(), "b".into(), "a".into()],
    };

    assert_eq!(err.to_string(), "extends cycle detected: a -> b -> a");
}

#[test]
fn SchemaError___unknown_related_table___names_both_tables() {
    let err = SchemaError::UnknownRelatedTable {
        table: "posts".into(),
        related: "users".into(),
    };

    let display = err.to_string();

    assert!(display.contains("table 'posts'"));
    assert!(display.contains("table 'users' is not described"));
}

#[test_case(SchemaError::NotFound { path: "a".into() }, 1 ; "not found")]
#[test_case(SchemaError::Syntax { path: "a".into(), message: "x".into() }, 2 ; "syntax")]
#[test_case(SchemaError::UndefinedExtendsTarget { target: "a".into() }, 5 ; "undefined extends")]
#[test_case(SchemaError::NonObjectExtendsTarget { target: "a".into() }, 6 ; "non object extends")]
#[test_case(SchemaError::UndefinedVariable { key: "a".into(), file: None }, 8 ; "undefined variable")]
#[test_case(SchemaError::validation("x"), 10 ; "validation")]
fn SchemaError___variant___maps_to_code(error: SchemaError, expected: u32) {
    assert_eq!(error.error_code(), expected);
}
