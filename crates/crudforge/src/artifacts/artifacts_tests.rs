#![allow(non_snake_case)]

use super::*;
use crate::artifacts::fixtures::{blog, schema_from};
use serde_json::json;
use test_case::test_case;

#[test]
fn generate_table___one_artifact_per_class() {
    let schema = blog();
    let posts = schema.table("blog_posts").unwrap();

    let artifacts = generate_table(&schema, posts).unwrap();

    let paths: Vec<_> = artifacts.iter().map(|a| (a.kind, a.path.as_str())).collect();
    assert_eq!(
        paths,
        vec![
            (ArtifactKind::Model, "app/BlogPost.php"),
            (ArtifactKind::CreateRequest, "app/Http/Requests/CreateBlogPostRequest.php"),
            (ArtifactKind::UpdateRequest, "app/Http/Requests/UpdateBlogPostRequest.php"),
            (ArtifactKind::Controller, "app/Http/Controllers/BlogPostController.php"),
            (ArtifactKind::Repository, "app/Repositories/BlogPostRepository.php"),
            (ArtifactKind::ViewList, "resources/views/blog_post/page-list.blade.php"),
            (ArtifactKind::ViewDetail, "resources/views/blog_post/page-detail.blade.php"),
            (ArtifactKind::ViewCreate, "resources/views/blog_post/form-create.blade.php"),
            (ArtifactKind::ViewEdit, "resources/views/blog_post/form-edit.blade.php"),
        ]
    );
    assert!(artifacts[..5].iter().all(|a| a.contents.starts_with("<?php\n\n")));
    assert!(artifacts[5..].iter().all(|a| a.contents.starts_with("@extends('layout.master')\n")));
}

#[test]
fn generate_all___tables_then_routes_then_config() {
    let schema = blog();

    let artifacts = generate_all(&schema).unwrap();

    assert_eq!(artifacts.len(), 20);
    assert_eq!(artifacts[0].path, "app/User.php");
    assert_eq!(artifacts[9].path, "app/BlogPost.php");
    assert_eq!(artifacts[18].kind, ArtifactKind::Routes);
    assert_eq!(artifacts[18].path, "routes/web.php");
    assert_eq!(artifacts[19].kind, ArtifactKind::Config);
    assert_eq!(artifacts[19].path, "config/admin.php");
}

#[test]
fn generate_all___conventions_move_outputs() {
    let schema = schema_from(json!({
        "model": {"path": "app/Models", "namespace": "App\\Models"},
        "route": {"file": "routes/admin"},
        "config_file": "backend",
        "tables": {"tags": {"fields": {"name": {"type": "string", "input": "text"}}}}
    }));

    let artifacts = generate_all(&schema).unwrap();

    let paths: Vec<_> = artifacts.iter().map(|a| a.path.as_str()).collect();
    assert!(paths.contains(&"app/Models/Tag.php"));
    assert!(paths.contains(&"routes/admin.php"));
    assert!(paths.contains(&"config/backend.php"));
    assert!(artifacts[0].contents.contains("namespace App\\Models;"));
}

#[test_case(ArtifactKind::Model, "model")]
#[test_case(ArtifactKind::CreateRequest, "create-request")]
#[test_case(ArtifactKind::UpdateRequest, "update-request")]
#[test_case(ArtifactKind::Controller, "controller")]
#[test_case(ArtifactKind::Repository, "repository")]
#[test_case(ArtifactKind::ViewList, "view-list")]
#[test_case(ArtifactKind::ViewEdit, "view-edit")]
#[test_case(ArtifactKind::Routes, "routes")]
#[test_case(ArtifactKind::Config, "config")]
fn ArtifactKind___display___uses_name(kind: ArtifactKind, expected: &str) {
    assert_eq!(kind.to_string(), expected);
}

#[test]
fn class_docblock___author_without_email() {
    let schema = schema_from(json!({
        "author": {"name": "Ada"},
        "tables": {"tags": {"fields": {"name": {"type": "string"}}}}
    }));
    let mut class = ClassBuilder::new("App\\Tag");

    class_docblock(&schema, &mut class, "Tag model");

    assert_eq!(
        class.docblock().render(),
        "/**\n * Tag model\n *\n * @author Ada\n */"
    );
}

#[test]
fn related_table___unknown___names_table() {
    let schema = blog();

    let error = related_table(&schema, "comments").unwrap_err();

    assert_eq!(error.to_string(), "related table 'comments' is not defined");
}
