//! Admin config file with the navigation menu.

use crudforge_codegen::to_php;
use crudforge_schema::{Action, Schema};
use serde_json::{Value, json};

/// One menu entry per table, linking to its list page.
pub fn config_menu(schema: &Schema) -> Vec<Value> {
    schema
        .tables()
        .iter()
        .map(|table| {
            json!({
                "label": table.label(),
                "route": table.route_name(Action::PageList),
                "icon": table.icon(),
            })
        })
        .collect()
}

/// Contents of the config file read under [`Schema::config_key`].
pub fn config_file(schema: &Schema) -> String {
    let config = json!({ "menu": config_menu(schema) });
    format!("<?php\n\nreturn {};\n", to_php(&config, true))
}
