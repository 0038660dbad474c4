//! Blade pages: list, detail, create form and edit form.
//!
//! Every page extends the admin layout and fills its `content` section. The
//! section body is a [`CodeBlock`] of labeled fragments, so field snippets
//! reflow into the surrounding markup and callers can patch a section by
//! label before rendering.

use anyhow::{Context, Result};
use crudforge_codegen::{CodeBlock, Fragment, Stub, php_string, raw, render_stub, to_php};
use crudforge_schema::{Action, Field, Schema, Table};
use serde_json::{Value, json};

/// Layout view every page extends
const LAYOUT_VIEW: &str = "layout.master";

const PAGE_STUB: &str = r#"@extends('{? layout ?}')

@section('content')
<h2 class="page-title">{{ $title }}</h2>
{? content ?}
@endsection
"#;

/// Blade echo of a PHP expression.
fn echo(expr: &str) -> String {
    format!("{{{{ {expr} }}}}")
}

/// URL of one of the table's routes, with an optional key argument.
fn route_url(table: &Table, action: Action, key: Option<&str>) -> String {
    let name = php_string(&table.route_name(action));
    match key {
        Some(key) => echo(&format!("route({name}, [{key}])")),
        None => echo(&format!("route({name})")),
    }
}

/// Column a field is displayed from; an aliased relation label wins.
fn display_column(field: &Field) -> &str {
    field
        .relation()
        .and_then(|relation| relation.col_alias.as_deref())
        .unwrap_or(field.column())
}

/// Fill a field's table or read snippet for rows held in `$varname`.
fn field_snippet(code: &str, field: &Field, varname: &str) -> String {
    render_stub(
        code,
        &json!({
            "label": field.label(),
            "column": display_column(field),
            "varname": varname,
            "disk": field.upload_disk(),
        }),
    )
}

fn page(schema: &Schema, content: &CodeBlock) -> String {
    let mut stub = Stub::new(PAGE_STUB);
    stub.set("layout", json!(schema.conventions().view_name(LAYOUT_VIEW)))
        .set("content", json!(content.render()));
    stub.render()
}

/// The paginated list page.
///
/// Hidden fields get no column; a row links to its detail, edit and delete
/// routes.
pub fn list_view(schema: &Schema, table: &Table) -> String {
    let var = table.var_name();
    let paginator = table.name();
    let key = format!("${var}->getKey()");
    let fields: Vec<&Field> = table.inputable_fields().filter(|f| !f.is_hidden()).collect();

    let heads: Vec<String> = fields
        .iter()
        .map(|field| format!("<th class=\"column-{}\">{}</th>", display_column(field), field.label()))
        .collect();
    // Cells stay on one line so multi-line snippets cannot unbalance the row.
    let cells: Vec<String> = fields
        .iter()
        .map(|field| {
            let code = field_snippet(field.table_code(), field, &var);
            let code: String = code.lines().map(str::trim).collect();
            format!("<td class=\"column-{}\">{code}</td>", display_column(field))
        })
        .collect();

    let mut content = CodeBlock::new();
    content.append(Fragment::labeled(
        "actions",
        format!(
            "<div class=\"page-actions\">\n<a class=\"btn btn-primary\" href=\"{}\">Create {}</a>\n</div>",
            route_url(table, Action::FormCreate, None),
            table.label()
        ),
    ));
    if table.searchable_fields().next().is_some() {
        content.append(Fragment::labeled(
            "search",
            format!(
                "<form class=\"form-search\" method=\"GET\" action=\"{}\">\n<input type=\"text\" name=\"keyword\" value=\"{}\" placeholder=\"Search {}\">\n</form>",
                route_url(table, Action::PageList, None),
                echo("request('keyword')"),
                table.label()
            ),
        ));
    }
    content.nl();
    content.append(Fragment::labeled(
        "table",
        format!(
            r#"<table id="table-{name}" class="table table-bordered table-striped table-hover">
<thead>
<tr>
<th width="20" class="text-center column-number">No</th>
{heads}
<th class="text-center column-action">Action</th>
</tr>
</thead>
<tbody>
@if(!${paginator}->count())
<tr>
<td colspan="{colspan}" class="text-center">Records empty.</td>
</tr>
@endif
@foreach(${paginator}->items() as $i => ${var})
<tr>
<td class="text-center column-number">{number}</td>
{cells}
<td width="200" class="text-center column-action">
<a class="btn btn-sm btn-default" href="{show}">Show</a>
<a class="btn btn-sm btn-primary" href="{edit}">Edit</a>
<a class="btn btn-sm btn-danger" href="{delete}" onclick="return confirm('Are you sure to delete this data?')">Delete</a>
</td>
</tr>
@endforeach
</tbody>
</table>"#,
            name = table.name(),
            heads = heads.join("\n"),
            colspan = fields.len() + 2,
            number = echo(&format!("${paginator}->firstItem() + $i")),
            cells = cells.join("\n"),
            show = route_url(table, Action::PageDetail, Some(&key)),
            edit = route_url(table, Action::FormEdit, Some(&key)),
            delete = route_url(table, Action::Delete, Some(&key)),
        ),
    ));
    content.append(Fragment::labeled(
        "pagination",
        format!("{{!! ${paginator}->links() !!}}"),
    ));

    page(schema, &content)
}

/// The detail page, one labeled row per visible field.
pub fn detail_view(schema: &Schema, table: &Table) -> String {
    let var = table.var_name();
    let key = format!("${var}->getKey()");

    let mut rows = CodeBlock::new();
    for field in table.fields().iter().filter(|f| !f.is_hidden()) {
        rows.append(Fragment::labeled(
            field.column(),
            format!(
                "<!-- Column {} -->\n{}",
                field.column(),
                field_snippet(field.read_code(), field, &var)
            ),
        ));
    }

    let mut content = CodeBlock::new();
    content.append(Fragment::labeled(
        "fields",
        format!("<table class=\"table table-detail\">\n{}\n</table>", rows.render()),
    ));
    content.append(Fragment::labeled(
        "actions",
        format!(
            "<div class=\"page-actions\">\n<a class=\"btn btn-default\" href=\"{}\">Back</a>\n<a class=\"btn btn-primary\" href=\"{}\">Edit</a>\n</div>",
            route_url(table, Action::PageList, None),
            route_url(table, Action::FormEdit, Some(&key)),
        ),
    ));

    page(schema, &content)
}

/// The create form; inputs are refilled from the previous submission.
pub fn create_view(schema: &Schema, table: &Table) -> String {
    let content = form_content(
        schema,
        table,
        &format!("form-create-{}", table.singular()),
        &route_url(table, Action::PostCreate, None),
        |field| format!("old({})", php_string(field.column())),
    );
    page(schema, &content)
}

/// The edit form; inputs start from the row the controller resolved.
pub fn edit_view(schema: &Schema, table: &Table) -> Result<String> {
    let var = table.var_name();
    let pk = table
        .primary_column()
        .with_context(|| format!("table '{}' has no primary column", table.name()))?;
    let content = form_content(
        schema,
        table,
        &format!("form-edit-{}", table.singular()),
        &route_url(table, Action::PostEdit, Some(&format!("${var}['{pk}']"))),
        |field| format!("${var}['{}']", field.column()),
    );
    Ok(page(schema, &content))
}

fn form_content(
    schema: &Schema,
    table: &Table,
    id: &str,
    action: &str,
    value: impl Fn(&Field) -> String,
) -> CodeBlock {
    let includes: Vec<String> = table
        .inputable_fields()
        .filter_map(|field| {
            let view = schema.conventions().view_name(&field.input_view()?);
            let mut params = field.input_params();
            params.insert("value".to_string(), raw(value(field)));
            Some(format!(
                "@include({}, {})",
                php_string(&view),
                to_php(&Value::Object(params), false)
            ))
        })
        .collect();
    let enctype = if table.file_fields().next().is_some() {
        " enctype=\"multipart/form-data\""
    } else {
        ""
    };

    let mut content = CodeBlock::new();
    content.append(Fragment::labeled(
        "form",
        format!(
            "<form id=\"{id}\" method=\"POST\" action=\"{action}\"{enctype}>\n{{!! csrf_field() !!}}\n\n{}\n\n<div class=\"form-actions\">\n<button type=\"submit\" class=\"btn btn-primary\">Save</button>\n<a class=\"btn btn-default\" href=\"{}\">Cancel</a>\n</div>\n</form>",
            includes.join("\n\n"),
            route_url(table, Action::PageList, None),
        ),
    ));
    content
}

#[cfg(test)]
#[path = "views/views_tests.rs"]
mod views_tests;
