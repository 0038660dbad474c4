//! CRUD route declarations.

use anyhow::{Context, Result};
use crudforge_codegen::{GroupOptions, HttpMethod, RouteCollection, RouteContainer, RouteOptions};
use crudforge_schema::{Action, Schema, Table};
use tracing::debug;

/// Verb and path of each action, in declaration order. The detail route
/// comes last so its bare key segment does not shadow `create`.
fn action_routes(pk: &str) -> [(Action, HttpMethod, String); 7] {
    [
        (Action::PageList, HttpMethod::Get, "/".to_string()),
        (Action::FormCreate, HttpMethod::Get, "create".to_string()),
        (Action::PostCreate, HttpMethod::Post, "create".to_string()),
        (Action::FormEdit, HttpMethod::Get, format!("edit/{{{pk}}}")),
        (Action::PostEdit, HttpMethod::Post, format!("edit/{{{pk}}}")),
        (Action::Delete, HttpMethod::Get, format!("delete/{{{pk}}}")),
        (Action::PageDetail, HttpMethod::Get, format!("{{{pk}}}")),
    ]
}

/// The schema-level route group with one group per table.
///
/// Routes whose effective name `existing` already declares are left out, so
/// regenerating against a route file only adds what is missing.
pub fn crud_routes(schema: &Schema, existing: &impl RouteContainer) -> Result<RouteCollection> {
    let conventions = schema.conventions();
    let route = &conventions.route;

    let mut options = GroupOptions::new()
        .name(&route.name)
        .prefix(&route.prefix)
        .namespace(
            route
                .namespace
                .clone()
                .unwrap_or_else(|| conventions.controller.namespace.clone()),
        );
    options.middleware = route.middleware.clone();
    options.domain = route.domain.clone();

    let mut routes = RouteCollection::new();
    let root = routes.add_group(options)?;
    for table in schema.tables() {
        add_table_routes(root, table, existing)?;
    }
    Ok(routes)
}

fn add_table_routes(
    parent: &mut impl RouteContainer,
    table: &Table,
    existing: &impl RouteContainer,
) -> Result<()> {
    let pk = table
        .primary_column()
        .with_context(|| format!("table '{}' has no primary column", table.name()))?;
    let prefix = table.route_prefix();
    let controller = table.controller_class();

    let group = parent
        .add_group(GroupOptions::new().name(format!("{prefix}.")).prefix(&prefix))?;
    for (action, method, path) in action_routes(pk) {
        let name = table.route_name(action);
        if existing.has_route_named(&name) {
            debug!(route = %name, "route already declared");
            continue;
        }
        group.add_route(
            method,
            &path,
            &format!("{controller}@{}", action.method()),
            RouteOptions::new().name(action.name()),
        );
    }
    Ok(())
}

/// Contents of the route file declaring every CRUD route.
pub fn route_file(schema: &Schema) -> Result<String> {
    let routes = crud_routes(schema, &RouteCollection::new())?;
    Ok(format!(
        "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n\n{}\n",
        routes.render()
    ))
}

#[cfg(test)]
#[path = "routes/routes_tests.rs"]
mod routes_tests;
