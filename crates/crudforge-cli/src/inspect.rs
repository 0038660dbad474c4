//! `check`, `show` and `routes` commands

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use crudforge::{RouteCollection, RouteContainer, Schema, crud_routes, load_schema, route_file};

/// Check command implementation
pub fn check(path: &Path) -> Result<()> {
    println!("Checking schema: {}", path.display());

    let schema = load(path)?;
    print!("{}", summary(&schema)?);
    println!("\nSchema is valid!");

    Ok(())
}

/// Print the resolved document as JSON.
pub fn show(path: &Path) -> Result<()> {
    let schema = load(path)?;
    let json = serde_json::to_string_pretty(schema.document())
        .context("Failed to serialize resolved schema")?;
    println!("{json}");
    Ok(())
}

/// Print the generated route file.
pub fn routes(path: &Path) -> Result<()> {
    let schema = load(path)?;
    print!("{}", route_file(&schema)?);
    Ok(())
}

pub(crate) fn load(path: &Path) -> Result<Schema> {
    load_schema(path).with_context(|| format!("Failed to load schema: {}", path.display()))
}

/// One line per table, then the route count.
pub fn summary(schema: &Schema) -> Result<String> {
    let mut out = String::new();
    let tables = schema.tables();
    let _ = writeln!(out, "✓ Tables: {}", tables.len());
    for table in tables {
        let _ = writeln!(
            out,
            "  {} ({}): {} fields, {} inputs, {} relations",
            table.name(),
            table.model_class(),
            table.fields().len(),
            table.inputable_fields().count(),
            table.relations().len(),
        );
    }

    let routes = crud_routes(schema, &RouteCollection::new())?;
    let _ = writeln!(out, "✓ Routes: {}", routes.effective_routes().len());
    Ok(out)
}
