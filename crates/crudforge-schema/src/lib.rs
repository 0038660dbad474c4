//! crudforge-schema - Schema loading and resolution
//!
//! Turns a YAML schema tree into a fully resolved document and typed views:
//! - [`Loader`] follows `+include` directives, merges `+extends` targets and
//!   substitutes `${...}` variables
//! - [`resolve`] validates tables and fields and fills every derived default
//! - [`Schema`] exposes the resolved tables and fields with the names the
//!   generators need
//!
//! [`load_schema`] runs the whole pipeline on a file.

pub mod catalog;
pub mod conventions;
pub mod document;
mod error;
pub mod loader;
mod model;
pub mod naming;
pub mod resolver;

use std::path::Path;

use tracing::info;

pub use catalog::{Display, FieldType, InputType, RelationKind};
pub use conventions::{Author, Conventions, Location, RouteConventions};
pub use document::Document;
pub use error::{SchemaError, SchemaResult};
pub use loader::{DocumentSource, Loader, Origin, OriginKind, Provenance, YamlFileSource, load};
pub use model::{Action, Field, FieldRelation, Relation, Schema, Table};
pub use resolver::resolve;

/// Load, resolve and wrap the schema rooted at `path`.
pub fn load_schema(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let document = resolve(load(path)?)?;
    let schema = Schema::from_document(document)?;

    info!(
        file = %path.display(),
        tables = schema.tables().len(),
        "schema resolved"
    );
    Ok(schema)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, Conventions, Document, Field, Schema, SchemaError, SchemaResult, Table,
        load_schema,
    };
}
