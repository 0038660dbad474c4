//! Repository contracts.
//!
//! One interface per table describing the storage operations its controller
//! performs. Applications bind their own implementation.

use anyhow::{Context, Result};
use crudforge_codegen::{ClassBuilder, Docblock, Method};
use crudforge_schema::{Schema, Table};
use serde_json::Value;

use super::class_docblock;

const PAGINATOR: &str = "Illuminate\\Contracts\\Pagination\\LengthAwarePaginator";

/// The repository interface of `table`.
pub fn repository_interface(schema: &Schema, table: &Table) -> Result<ClassBuilder> {
    let pk = table
        .primary_column()
        .with_context(|| format!("table '{}' has no primary column", table.name()))?;
    let model = table.model_class_qualified();
    let var = table.var_name();
    let label = table.label();

    let mut interface = ClassBuilder::interface(&table.repository_class_qualified());
    class_docblock(schema, &mut interface, &format!("{label} storage contract"));

    let paginate = interface.add_method("paginate");
    paginate
        .add_argument("limit", Some("int"), None)
        .add_argument("keyword", Some("?string"), Some(Value::Null))
        .set_return_type(PAGINATOR);
    paginate
        .docblock()
        .add_text(format!("Page through {label} rows, filtered by keyword when given"))
        .add_param("limit", "int", None)
        .add_param("keyword", "string|null", None);

    let find = interface.add_method("findById");
    find.add_argument(pk, None, None)
        .set_return_type(format!("?{model}"));
    find.docblock()
        .add_text(format!("Find {label} by '{pk}'"))
        .add_param(pk, "mixed", None)
        .set_return(format!("{model}|null"));

    let create = interface.add_method("create");
    create
        .add_argument("data", Some("array"), None)
        .set_return_type(model.as_str());
    create
        .docblock()
        .add_text(format!("Store a new {label}"))
        .add_param("data", "array", None);

    let update = interface.add_method("update");
    update
        .add_argument(&var, Some(model.as_str()), None)
        .add_argument("data", Some("array"), None)
        .set_return_type("bool");
    documented_row(update, &var, &model, format!("Update {label} with data"))
        .add_param("data", "array", None);

    let delete = interface.add_method("delete");
    delete
        .add_argument(&var, Some(model.as_str()), None)
        .set_return_type("bool");
    documented_row(delete, &var, &model, format!("Delete {label}"));

    Ok(interface)
}

fn documented_row<'m>(
    method: &'m mut Method,
    var: &str,
    model: &str,
    text: String,
) -> &'m mut Docblock {
    method.docblock().add_text(text).add_param(var, model, None)
}
