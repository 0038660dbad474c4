#![allow(non_snake_case)]

use super::*;
use crudforge::ArtifactKind;
use tempfile::TempDir;

#[test]
fn write_artifacts___creates_nested_directories() {
    let dir = TempDir::new().unwrap();
    let artifacts = vec![
        Artifact::new(ArtifactKind::Model, "app/Post.php", "<?php\n"),
        Artifact::new(ArtifactKind::Config, "config/admin.php", "<?php\n\nreturn [];\n"),
    ];

    let written = write_artifacts(dir.path(), &artifacts).unwrap();

    assert_eq!(written, vec![dir.path().join("app/Post.php"), dir.path().join("config/admin.php")]);
    assert_eq!(fs::read_to_string(dir.path().join("config/admin.php")).unwrap(), "<?php\n\nreturn [];\n");
}

#[test]
fn write_artifacts___overwrites_existing_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("app")).unwrap();
    fs::write(dir.path().join("app/Post.php"), "old").unwrap();

    write_artifacts(dir.path(), &[Artifact::new(ArtifactKind::Model, "app/Post.php", "new")]).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("app/Post.php")).unwrap(), "new");
}

#[test]
fn run___writes_schema_artifacts() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("schema.yml");
    fs::write(
        &schema,
        "tables:\n  tags:\n    fields:\n      name:\n        type: string\n        input: text\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    run(&schema, Some(out.clone())).unwrap();

    assert!(out.join("app/Tag.php").is_file());
    assert!(out.join("app/Http/Controllers/TagController.php").is_file());
    assert!(out.join("routes/web.php").is_file());
}
