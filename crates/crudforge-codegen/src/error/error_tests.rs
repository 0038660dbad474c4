#![allow(non_snake_case)]

use super::*;

#[test]
fn CodegenError___invalid_visibility___names_the_value() {
    let err = CodegenError::InvalidVisibility("internal".into());

    assert_eq!(
        err.to_string(),
        "visibility 'internal' is not valid, expected public, protected or private"
    );
    assert_eq!(err.error_code(), 101);
}

#[test]
fn CodegenError___invalid_http_method___names_the_value() {
    let err = CodegenError::InvalidHttpMethod("fetch".into());

    assert_eq!(err.to_string(), "http method 'fetch' is not supported");
    assert_eq!(err.error_code(), 102);
}

#[test]
fn CodegenError___detached_group___has_stable_code() {
    let err = CodegenError::DetachedGroup;

    assert_eq!(err.to_string(), "route group was not attached to its container");
    assert_eq!(err.error_code(), 103);
}
