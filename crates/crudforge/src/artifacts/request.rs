//! Form request classes carrying validation rules.

use crudforge_codegen::{ClassBuilder, to_php};
use crudforge_schema::{Field, Schema, Table};
use serde_json::{Map, Value};

use super::class_docblock;

const FORM_REQUEST: &str = "Illuminate\\Foundation\\Http\\FormRequest";

/// Request validating the create form of `table`.
pub fn create_request_class(schema: &Schema, table: &Table) -> ClassBuilder {
    request_class(
        schema,
        table,
        &table.create_request_class_qualified(),
        &format!("Validates new {} input", table.label()),
        |field| field.rules().to_vec(),
    )
}

/// Request validating the edit form of `table`.
///
/// Uploads already stored stay in place when no new file is sent, so file
/// inputs drop `required` here.
pub fn update_request_class(schema: &Schema, table: &Table) -> ClassBuilder {
    request_class(
        schema,
        table,
        &table.update_request_class_qualified(),
        &format!("Validates {} update input", table.label()),
        |field| {
            field
                .rules()
                .iter()
                .filter(|rule| !(field.is_input_file() && *rule == "required"))
                .cloned()
                .collect()
        },
    )
}

fn request_class(
    schema: &Schema,
    table: &Table,
    class_name: &str,
    description: &str,
    rules_of: impl Fn(&Field) -> Vec<String>,
) -> ClassBuilder {
    let mut class = ClassBuilder::new(class_name);
    class.set_parent(FORM_REQUEST);
    class_docblock(schema, &mut class, description);

    let authorize = class.add_method("authorize");
    authorize
        .docblock()
        .add_text("Determine if the user is authorized to make this request.")
        .set_return("bool");
    authorize.body().append("return true;");

    let rules: Map<String, Value> = table
        .inputable_fields()
        .filter_map(|field| {
            let rules = rules_of(field);
            (!rules.is_empty()).then(|| (field.column().to_string(), Value::String(rules.join("|"))))
        })
        .collect();

    let method = class.add_method("rules");
    method
        .docblock()
        .add_text("Get the validation rules that apply to the request.")
        .set_return("array");
    method
        .body()
        .append(format!("return {};", to_php(&Value::Object(rules), true)));

    class
}

#[cfg(test)]
#[path = "request/request_tests.rs"]
mod request_tests;
