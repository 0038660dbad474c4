//! Artifact generators.
//!
//! Each generator turns one table (or the whole schema) into a
//! [`ClassBuilder`], a Blade page or text; [`generate_all`] renders every artifact as a
//! `(path, contents)` pair relative to the project root. Writing the files is
//! left to the caller.

mod config;
mod controller;
mod model;
mod repository;
mod request;
mod routes;
mod views;

use std::fmt;

use anyhow::{Context, Result};
use crudforge_codegen::ClassBuilder;
use crudforge_schema::{Action, Schema, Table};
use tracing::{debug, info};

pub use config::{config_file, config_menu};
pub use controller::controller_class;
pub use model::model_class;
pub use repository::repository_interface;
pub use request::{create_request_class, update_request_class};
pub use routes::{crud_routes, route_file};
pub use views::{create_view, detail_view, edit_view, list_view};

/// What a generated file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Model,
    CreateRequest,
    UpdateRequest,
    Controller,
    Repository,
    ViewList,
    ViewDetail,
    ViewCreate,
    ViewEdit,
    Routes,
    Config,
}

impl ArtifactKind {
    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::CreateRequest => "create-request",
            ArtifactKind::UpdateRequest => "update-request",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Repository => "repository",
            ArtifactKind::ViewList => "view-list",
            ArtifactKind::ViewDetail => "view-detail",
            ArtifactKind::ViewCreate => "view-create",
            ArtifactKind::ViewEdit => "view-edit",
            ArtifactKind::Routes => "routes",
            ArtifactKind::Config => "config",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Path relative to the project root
    pub path: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            contents: contents.into(),
        }
    }

    fn from_class(kind: ArtifactKind, path: String, class: &ClassBuilder) -> Self {
        Self::new(kind, path, class.render())
    }
}

/// Every per-table artifact of `table`.
pub fn generate_table(schema: &Schema, table: &Table) -> Result<Vec<Artifact>> {
    let artifacts = vec![
        Artifact::from_class(ArtifactKind::Model, table.model_path(), &model_class(schema, table)?),
        Artifact::from_class(
            ArtifactKind::CreateRequest,
            table.create_request_path(),
            &create_request_class(schema, table),
        ),
        Artifact::from_class(
            ArtifactKind::UpdateRequest,
            table.update_request_path(),
            &update_request_class(schema, table),
        ),
        Artifact::from_class(
            ArtifactKind::Controller,
            table.controller_path(),
            &controller_class(schema, table)?,
        ),
        Artifact::from_class(
            ArtifactKind::Repository,
            table.repository_path(),
            &repository_interface(schema, table)?,
        ),
        Artifact::new(
            ArtifactKind::ViewList,
            table.view_path(Action::PageList),
            list_view(schema, table),
        ),
        Artifact::new(
            ArtifactKind::ViewDetail,
            table.view_path(Action::PageDetail),
            detail_view(schema, table),
        ),
        Artifact::new(
            ArtifactKind::ViewCreate,
            table.view_path(Action::FormCreate),
            create_view(schema, table),
        ),
        Artifact::new(
            ArtifactKind::ViewEdit,
            table.view_path(Action::FormEdit),
            edit_view(schema, table)?,
        ),
    ];

    for artifact in &artifacts {
        debug!(table = table.name(), kind = %artifact.kind, path = %artifact.path, "generated artifact");
    }
    Ok(artifacts)
}

/// Every artifact of the schema: per-table files in table order, then the
/// route file and the config file.
pub fn generate_all(schema: &Schema) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for table in schema.tables() {
        let generated = generate_table(schema, table)
            .with_context(|| format!("failed to generate artifacts for table '{}'", table.name()))?;
        artifacts.extend(generated);
    }

    artifacts.push(Artifact::new(
        ArtifactKind::Routes,
        schema.conventions().route_path(),
        route_file(schema)?,
    ));
    artifacts.push(Artifact::new(
        ArtifactKind::Config,
        schema.conventions().config_path(),
        config_file(schema),
    ));

    info!(artifacts = artifacts.len(), "generated schema artifacts");
    Ok(artifacts)
}

/// Class-level doc comment shared by generated classes.
fn class_docblock(schema: &Schema, class: &mut ClassBuilder, text: &str) {
    let docblock = class.docblock();
    docblock.add_text(text);
    match (schema.author_name(), schema.author_email()) {
        (Some(name), Some(email)) => {
            docblock.add_annotation("author", format!("{name} <{email}>"));
        }
        (Some(name), None) => {
            docblock.add_annotation("author", name);
        }
        _ => {}
    }
}

/// The table `name` refers to, which the resolver guarantees exists.
fn related_table<'a>(schema: &'a Schema, name: &str) -> Result<&'a Table> {
    schema
        .table(name)
        .with_context(|| format!("related table '{name}' is not defined"))
}

#[cfg(test)]
#[path = "artifacts/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "artifacts/artifacts_tests.rs"]
mod artifacts_tests;
