#![allow(non_snake_case)]

use super::*;
use crate::document::get_path;
use serde_json::json;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected mapping, got {other}"),
    }
}

#[test]
fn Conventions___default___matches_laravel_layout() {
    let conventions = Conventions::default();

    assert_eq!(conventions.controller.namespace, "App\\Http\\Controllers");
    assert_eq!(conventions.model.path, "app");
    assert_eq!(conventions.route.name, "admin::");
    assert_eq!(conventions.route.prefix, "admin");
    assert_eq!(conventions.upload_disk, "uploads");
    assert!(conventions.route.middleware.is_empty());
}

#[test]
fn Conventions___from_empty_document___equals_default() {
    let conventions = Conventions::from_document(&Document::new()).unwrap();

    assert_eq!(conventions, Conventions::default());
}

#[test]
fn Conventions___from_document___ignores_unrelated_keys() {
    let document = doc(json!({
        "tables": {"posts": {}},
        "route": {"prefix": "backend", "middleware": "auth"},
        "author": {"name": "Jane", "email": "jane@example.com"}
    }));

    let conventions = Conventions::from_document(&document).unwrap();

    assert_eq!(conventions.route.prefix, "backend");
    assert_eq!(conventions.route.name, "admin::");
    assert_eq!(conventions.route.middleware, vec!["auth".to_string()]);
    assert_eq!(conventions.author.name.as_deref(), Some("Jane"));
}

#[test]
fn Conventions___middleware_list___parsed_in_order() {
    let document = doc(json!({"route": {"middleware": ["web", "auth"]}}));

    let conventions = Conventions::from_document(&document).unwrap();

    assert_eq!(conventions.route.middleware, vec!["web", "auth"]);
}

#[test]
fn Conventions___wrong_shape___returns_validation_error() {
    let document = doc(json!({"controller": "app/Http/Controllers"}));

    let result = Conventions::from_document(&document);

    assert!(matches!(result, Err(SchemaError::Validation(_))));
}

#[test]
fn fill_defaults___keeps_declared_values() {
    let mut document = doc(json!({"model": {"namespace": "App\\Models"}}));

    fill_defaults(&mut document);

    let value = Value::Object(document);
    assert_eq!(get_path(&value, "model.namespace"), Some(&json!("App\\Models")));
    assert_eq!(get_path(&value, "model.path"), Some(&json!("app")));
    assert_eq!(get_path(&value, "view.namespace"), Some(&json!("")));
    assert_eq!(get_path(&value, "config_file"), Some(&json!("admin")));
}

#[test]
fn Location___class_and_file___join_namespace_and_path() {
    let location = Location::new("app/Http/Controllers/", "App\\Http\\Controllers");

    assert_eq!(location.class("PostController"), "App\\Http\\Controllers\\PostController");
    assert_eq!(location.file("PostController"), "app/Http/Controllers/PostController.php");
}

#[test]
fn Location___empty_namespace___class_is_bare() {
    let location = Location::new("app", "");

    assert_eq!(location.class("Post"), "Post");
}

#[test]
fn Conventions___config_and_views___derive_paths() {
    let mut conventions = Conventions::default();
    conventions.config_file = "backend/menu".to_string();
    conventions.view.namespace = "admin".to_string();

    assert_eq!(conventions.config_path(), "config/backend/menu.php");
    assert_eq!(conventions.config_key(), "backend.menu");
    assert_eq!(conventions.view_name("post.page-list"), "admin::post.page-list");
    assert_eq!(
        conventions.view_file("post/page-list"),
        "resources/views/post/page-list.blade.php"
    );
    assert_eq!(conventions.route_path(), "routes/web.php");
    assert_eq!(conventions.route_name("posts.delete"), "admin::posts.delete");
}
