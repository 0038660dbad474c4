//! CRUD controller classes.
//!
//! One action method per route, plus helpers the actions share: a 404-ing
//! finder, input and data resolvers, and option getters for relation inputs.
//! Method bodies are assembled from labeled fragments so callers can patch
//! them before rendering.

use anyhow::{Context as _, Result};
use crudforge_codegen::{
    ClassBuilder, Fragment, Method, Property, Visibility, php_string, render_stub, to_php,
};
use crudforge_schema::naming::{humanize, to_camel_case, to_pascal_case};
use crudforge_schema::{Action, Field, Schema, Table};
use serde_json::json;

use super::{class_docblock, related_table};

const BASE_CONTROLLER: &str = "App\\Http\\Controllers\\Controller";
const CLASS_REQUEST: &str = "Illuminate\\Http\\Request";
const CLASS_RESPONSE: &str = "Illuminate\\Http\\Response";
/// Argument name of the HTTP request in every action
const REQUEST_VAR: &str = "request";

/// Names shared by every method of one controller.
struct Names<'a> {
    table: &'a Table,
    /// Model property and view data key, e.g. `blogPost`
    var: String,
    /// Local variable holding one row; differs from `var` only where that
    /// would shadow `$request`
    row: String,
    pk: String,
    pk_var: String,
    label: String,
}

impl<'a> Names<'a> {
    fn new(table: &'a Table) -> Result<Self> {
        let pk = table
            .primary_column()
            .with_context(|| format!("table '{}' has no primary column", table.name()))?
            .to_string();
        let var = table.var_name();
        let row = if var == REQUEST_VAR {
            format!("{var}Row")
        } else {
            var.clone()
        };
        Ok(Self {
            table,
            var,
            row,
            pk_var: to_camel_case(&pk),
            pk,
            label: table.label().to_string(),
        })
    }

    fn find_code(&self) -> String {
        format!("${} = $this->findOrFail(${});", self.row, self.pk_var)
    }

    fn view(&self, action: Action) -> String {
        format!("return view({}, $data);", php_string(&self.table.view_name(action)))
    }

    fn title(&self, prefix: &str) -> String {
        format!("$data['title'] = {};", php_string(&format!("{prefix} {}", self.label)))
    }

    /// Redirect to the list page, or back on failure.
    fn outcome(&self, ok: &str, verb: &str, done: &str) -> String {
        let failure = php_string(&format!("Something went wrong when {verb} {}", self.label));
        let success = php_string(&format!("{} has been {done}!", self.label));
        let list = php_string(&self.table.route_name(Action::PageList));
        format!(
            "
            if (!{ok}) {{
                $message = {failure};
                return back()->with('danger', $message);
            }}

            $message = {success};
            return redirect()->route({list})->with('info', $message);
            "
        )
        .trim()
        .to_string()
    }
}

/// The controller class of `table`.
pub fn controller_class(schema: &Schema, table: &Table) -> Result<ClassBuilder> {
    let ctx = Names::new(table)?;
    let models = required_models(schema, table)?;

    let mut class = ClassBuilder::new(&table.controller_class_qualified());
    class
        .set_parent(BASE_CONTROLLER)
        .use_class(CLASS_REQUEST, None)
        .use_class(CLASS_RESPONSE, None);
    class_docblock(schema, &mut class, &format!("{} CRUD actions", ctx.label));

    for (var, model) in &models {
        class.use_class(model, None);
        class.add_property(
            Property::new(var, model.as_str())
                .visibility(Visibility::Protected)
                .description(format!("{} model", humanize(var))),
        );
    }

    set_constructor(class.add_method("__construct"), &models);
    set_page_list(class.add_method(Action::PageList.method()), &ctx);
    set_page_detail(class.add_method(Action::PageDetail.method()), &ctx);
    set_form_create(class.add_method(Action::FormCreate.method()), &ctx);
    set_post_create(class.add_method(Action::PostCreate.method()), &ctx);
    set_form_edit(class.add_method(Action::FormEdit.method()), &ctx);
    set_post_edit(class.add_method(Action::PostEdit.method()), &ctx);
    set_delete(class.add_method(Action::Delete.method()), &ctx);
    set_find_or_fail(class.add_method("findOrFail"), &ctx);
    set_resolver(
        class.add_method("resolveFormInputs"),
        table,
        "inputs",
        "Resolve form inputs into storable data.",
        Field::input_resolver,
    );
    set_resolver(
        class.add_method("resolveFormData"),
        table,
        "data",
        "Resolve stored data into form values.",
        Field::data_resolver,
    );

    for field in option_fields(table) {
        add_option_getter(schema, &mut class, field)?;
    }

    Ok(class)
}

/// Models the controller is constructed with: its own first, then one per
/// related table.
fn required_models(schema: &Schema, table: &Table) -> Result<Vec<(String, String)>> {
    let mut models = vec![(table.var_name(), table.model_class_qualified())];
    for relation in table.relations() {
        let related = related_table(schema, &relation.table)?;
        let model = related.model_class_qualified();
        if !models.iter().any(|(_, existing)| *existing == model) {
            models.push((related.var_name(), model));
        }
    }
    Ok(models)
}

/// Input fields whose options come from another table.
fn option_fields(table: &Table) -> impl Iterator<Item = &Field> {
    table.inputable_fields().filter(|f| f.relation().is_some())
}

fn option_getter_name(var_name: &str) -> String {
    format!("get{}", to_pascal_case(var_name))
}

fn option_assignments(ctx: &Names<'_>) -> Vec<String> {
    option_fields(ctx.table)
        .filter_map(Field::relation)
        .map(|relation| {
            format!(
                "$data['{}'] = $this->{}();",
                relation.var_name,
                option_getter_name(&relation.var_name)
            )
        })
        .collect()
}

fn request_argument(method: &mut Method, ty: &str) {
    method.add_argument(REQUEST_VAR, Some(ty), None);
    method.docblock().add_param(REQUEST_VAR, ty, None);
}

fn pk_argument(method: &mut Method, ctx: &Names<'_>) {
    method.add_argument(&ctx.pk_var, None, None);
    method.docblock().add_param(&ctx.pk_var, "string", None);
}

fn set_constructor(method: &mut Method, models: &[(String, String)]) {
    method.docblock().add_text("Constructor");
    for (var, model) in models {
        method.add_argument(var, Some(model.as_str()), None);
        method.docblock().add_param(var, model.as_str(), None);
    }
    let assignments: Vec<String> = models
        .iter()
        .map(|(var, _)| format!("$this->{var} = ${var};"))
        .collect();
    method
        .body()
        .append(Fragment::labeled("set-models", assignments.join("\n")));
}

fn set_page_list(method: &mut Method, ctx: &Names<'_>) {
    method
        .docblock()
        .add_text(format!("Display list {}", ctx.table.name()));
    request_argument(method, CLASS_REQUEST);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(Fragment::labeled(
        "preparation",
        "
        $limit = (int) $request->get('limit') ?: 10;
        $keyword = $request->get('keyword');
        ",
    ));
    body.nl();
    body.append(Fragment::labeled(
        "initialize-query",
        format!("$query = $this->{}->query();", ctx.var),
    ));

    let conditions: Vec<String> = ctx
        .table
        .searchable_fields()
        .enumerate()
        .map(|(i, field)| {
            let call = if i == 0 { "where" } else { "orWhere" };
            format!(
                "$query->{call}({}, 'like', \"%{{$keyword}}%\");",
                php_string(field.column())
            )
        })
        .collect();
    if !conditions.is_empty() {
        body.nl();
        body.append(Fragment::labeled(
            "search",
            format!(
                "if ($keyword) {{\n$query->where(function($query) use ($keyword) {{\n{}\n}});\n}}",
                conditions.join("\n")
            ),
        ));
    }

    body.nl();
    body.append(Fragment::labeled(
        "result",
        format!(
            "{}\n$data['{}'] = $query->paginate($limit);",
            ctx.title("List"),
            ctx.table.name()
        ),
    ));
    body.nl();
    body.append(ctx.view(Action::PageList));
}

fn set_page_detail(method: &mut Method, ctx: &Names<'_>) {
    method.docblock().add_text(format!("Show detail {}", ctx.var));
    request_argument(method, CLASS_REQUEST);
    pk_argument(method, ctx);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(Fragment::labeled("find", ctx.find_code()));
    body.nl();
    body.append(ctx.title("Detail"));
    body.append(format!("$data['{}'] = ${};", ctx.var, ctx.row));
    body.nl();
    body.append(ctx.view(Action::PageDetail));
}

fn set_form_create(method: &mut Method, ctx: &Names<'_>) {
    method
        .docblock()
        .add_text(format!("Display form create {}", ctx.var));
    request_argument(method, CLASS_REQUEST);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(ctx.title("Form Create"));
    for assignment in option_assignments(ctx) {
        body.append(assignment);
    }
    body.nl();
    body.append(ctx.view(Action::FormCreate));
}

fn set_post_create(method: &mut Method, ctx: &Names<'_>) {
    method.docblock().add_text(format!("Insert new {}", ctx.var));
    request_argument(method, &ctx.table.create_request_class_qualified());
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append("$data = $this->resolveFormInputs($request->all());");
    body.nl();
    append_uploads(method, ctx);

    let insert = format!(
        "// Insert data\n${row} = $this->{var}->create($data);\n{outcome}",
        row = ctx.row,
        var = ctx.var,
        outcome = ctx.outcome(&format!("${}", ctx.row), "create", "created"),
    );
    method.body().append(Fragment::labeled("insert", insert));
}

fn set_form_edit(method: &mut Method, ctx: &Names<'_>) {
    method.docblock().add_text(format!("Display form edit {}", ctx.var));
    request_argument(method, CLASS_REQUEST);
    pk_argument(method, ctx);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(Fragment::labeled("find", ctx.find_code()));
    body.nl();
    body.append(ctx.title("Form Edit"));
    body.append(format!(
        "$data['{}'] = $this->resolveFormData(${}->toArray());",
        ctx.var, ctx.row
    ));
    for assignment in option_assignments(ctx) {
        body.append(assignment);
    }
    body.nl();
    body.append(ctx.view(Action::FormEdit));
}

fn set_post_edit(method: &mut Method, ctx: &Names<'_>) {
    method
        .docblock()
        .add_text(format!("Update specified {}", ctx.var));
    request_argument(method, &ctx.table.update_request_class_qualified());
    pk_argument(method, ctx);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(Fragment::labeled("find", ctx.find_code()));
    body.nl();
    body.append("$data = $this->resolveFormInputs($request->all());");
    body.nl();
    append_uploads(method, ctx);

    let update = format!(
        "// Update data\n${row}->fill($data);\n$updated = ${row}->save();\n{outcome}",
        row = ctx.row,
        outcome = ctx.outcome("$updated", "update", "updated"),
    );
    method.body().append(Fragment::labeled("update", update));
}

fn set_delete(method: &mut Method, ctx: &Names<'_>) {
    method
        .docblock()
        .add_text(format!("Delete specified {}", ctx.var));
    request_argument(method, CLASS_REQUEST);
    pk_argument(method, ctx);
    method.docblock().set_return(CLASS_RESPONSE);

    let body = method.body();
    body.append(Fragment::labeled("find", ctx.find_code()));
    body.nl();
    let delete = format!(
        "// Delete data\n$deleted = ${}->delete();\n{}",
        ctx.row,
        ctx.outcome("$deleted", "delete", "deleted"),
    );
    body.append(Fragment::labeled("delete", delete));
}

fn set_find_or_fail(method: &mut Method, ctx: &Names<'_>) {
    method.set_visibility(Visibility::Protected);
    method.add_argument(&ctx.pk_var, None, None);
    let model = ctx.table.model_class_qualified();
    method
        .docblock()
        .add_text(format!(
            "Find {} by '{}' or display 404 if not exists",
            ctx.var, ctx.pk
        ))
        .add_param(&ctx.pk_var, "string", None)
        .set_return(model);

    let not_found = php_string(&format!("{} not found", ctx.label));
    method.body().append(format!(
        "
        ${var} = $this->{var}->find(${pk});
        if (!${var}) {{
            return abort(404, {not_found});
        }}

        return ${var};
        ",
        var = ctx.var,
        pk = ctx.pk_var,
    ));
}

/// One `$<arg>['col'] = <expr>;` per input field with a resolver template.
fn set_resolver(
    method: &mut Method,
    table: &Table,
    arg: &str,
    text: &str,
    resolver_of: fn(&Field) -> Option<&str>,
) {
    method.set_visibility(Visibility::Protected);
    method.add_argument(arg, Some("array"), None);
    method
        .docblock()
        .add_text(text)
        .add_param(arg, "array", None)
        .set_return("array");

    for field in table.inputable_fields() {
        let Some(template) = resolver_of(field) else {
            continue;
        };
        let column = field.column();
        let expression = render_stub(template, &json!({ "value": format!("${arg}['{column}']") }));
        method.body().append(Fragment::labeled(
            format!("resolve-{column}"),
            format!("// Resolve input {column}\n${arg}['{column}'] = {expression};"),
        ));
        method.body().nl();
    }
    method.body().append(format!("return ${arg};"));
}

fn append_uploads(method: &mut Method, ctx: &Names<'_>) {
    for field in ctx.table.file_fields() {
        let column = field.column();
        let var = to_camel_case(column);
        let code = format!(
            "
            // Uploading {column}
            ${var} = $request->file('{column}');
            if (${var}) {{
                $filename = ${var}->getClientOriginalName();
                $path = {path};
                $data['{column}'] = ${var}->storeAs($path, $filename, {disk});
            }}
            ",
            path = php_string(&field.upload_path()),
            disk = php_string(field.upload_disk()),
        );
        method
            .body()
            .append(Fragment::labeled(format!("upload-{column}"), code));
        method.body().nl();
    }
}

fn add_option_getter(schema: &Schema, class: &mut ClassBuilder, field: &Field) -> Result<()> {
    let Some(relation) = field.relation() else {
        return Ok(());
    };
    let related = related_table(schema, &relation.table)?;
    let columns = json!([
        format!("{} as value", relation.col_value),
        format!("{} as label", relation.col_label),
    ]);

    let method = class.add_method(&option_getter_name(&relation.var_name));
    method.set_visibility(Visibility::Protected);
    method
        .docblock()
        .add_text(format!("Get {}", relation.var_name))
        .set_return("array");
    method.body().append(format!(
        "return $this->{}\n->select({})\n->get()\n->toArray();",
        related.var_name(),
        to_php(&columns, false)
    ));
    Ok(())
}
