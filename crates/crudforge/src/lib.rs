//! # crudforge
//!
//! Schema-driven CRUD scaffolding for Laravel applications.
//!
//! A YAML schema describes tables, fields and project conventions; crudforge
//! resolves it and emits the sources of an admin slice: models, form
//! requests, controllers, repository contracts, Blade pages, route
//! declarations and a menu config.
//!
//! ## Quick Start
//!
//! ```ignore
//! use crudforge::prelude::*;
//!
//! let schema = load_schema("schema.yml")?;
//! for artifact in generate_all(&schema)? {
//!     println!("{} ({} bytes)", artifact.path, artifact.contents.len());
//! }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`crudforge_schema`] - Schema loading, resolution and typed views
//! - [`crudforge_codegen`] - PHP literal, class, method and route emitters

pub mod artifacts;

pub use artifacts::{
    Artifact, ArtifactKind, config_file, config_menu, controller_class, create_request_class,
    create_view, crud_routes, detail_view, edit_view, generate_all, generate_table, list_view,
    model_class, repository_interface, route_file, update_request_class,
};

// Re-export schema types
pub use crudforge_schema::{
    Action, Conventions, Document, Field, FieldRelation, Relation, RelationKind, Schema,
    SchemaError, SchemaResult, Table, load, load_schema, resolve,
};

// Re-export emitters
pub use crudforge_codegen::{
    ClassBuilder, CodeBlock, CodegenError, CodegenResult, Docblock, GroupOptions, HttpMethod,
    Method, RouteCollection, RouteContainer, RouteOptions, Stub, Visibility, to_php,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, Artifact, ArtifactKind, Schema, SchemaError, Table, generate_all, load_schema,
    };
}
