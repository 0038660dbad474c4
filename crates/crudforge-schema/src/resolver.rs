//! Schema resolution: validation and derived defaults.
//!
//! [`resolve`] takes a fully loaded document and fills in everything the
//! generators rely on: layout conventions, table names and labels, the
//! primary key, per-field search/sort flags, normalized rules and inputs,
//! relation descriptors inferred from option sources, display snippets, and
//! finally the relation lists of every table, including back-references.
//!
//! Resolution either succeeds for the whole schema or fails with a
//! [`SchemaError::Validation`] naming the offending table and field.

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::catalog::{
    Display, FieldType, InputType, RelationKind, parse_type, plain_table_code, read_code,
};
use crate::conventions::fill_defaults;
use crate::document::{Document, scalar_to_string, take_key};
use crate::error::{SchemaError, SchemaResult};
use crate::naming::{humanize, pluralize, singularize};

pub const TABLES_KEY: &str = "tables";
pub const FIELDS_KEY: &str = "fields";
pub const INPUT_KEY: &str = "input";
pub const RELATION_KEY: &str = "relation";
pub const RELATIONS_KEY: &str = "relations";

/// Index value marking the primary column.
pub const INDEX_PRIMARY: &str = "primary";

/// Name of the synthesized primary column.
pub const PRIMARY_COLUMN: &str = "id";

/// Resolve a loaded schema document.
pub fn resolve(mut document: Document) -> SchemaResult<Document> {
    let tables = match document.get_mut(TABLES_KEY) {
        None => {
            return Err(SchemaError::validation(format!(
                "Schema must have key '{TABLES_KEY}'"
            )));
        }
        Some(Value::Object(tables)) if !tables.is_empty() => std::mem::take(tables),
        Some(_) => {
            return Err(SchemaError::validation(
                "Schema must have at least 1 table to generate",
            ));
        }
    };

    let mut resolved = tables
        .into_iter()
        .map(|(name, table)| {
            let table = resolve_table(&name, table)?;
            Ok((name, Value::Object(table)))
        })
        .collect::<SchemaResult<Document>>()?;
    resolve_relations(&mut resolved)?;

    info!(tables = resolved.len(), "schema resolved");
    document.insert(TABLES_KEY.to_string(), Value::Object(resolved));
    fill_defaults(&mut document);
    Ok(document)
}

// ============================================================================
// Tables
// ============================================================================

fn resolve_table(name: &str, value: Value) -> SchemaResult<Document> {
    let Value::Object(mut table) = value else {
        return Err(SchemaError::validation(format!(
            "Table '{name}' must be a mapping"
        )));
    };

    let fields = match table.get_mut(FIELDS_KEY) {
        None => {
            return Err(SchemaError::validation(format!(
                "Table '{name}' must have key '{FIELDS_KEY}'"
            )));
        }
        Some(Value::Object(fields)) if !fields.is_empty() => std::mem::take(fields),
        Some(_) => {
            return Err(SchemaError::validation(format!(
                "Table '{name}' must have at least 1 field"
            )));
        }
    };

    let declared_singular = table
        .get("singular")
        .and_then(Value::as_str)
        .map(str::to_string);
    let singular = declared_singular
        .clone()
        .unwrap_or_else(|| singularize(name));
    let plural = match table.get("plural").and_then(Value::as_str) {
        Some(plural) => plural.to_string(),
        None if declared_singular.as_deref() == Some(name) => pluralize(name),
        None => name.to_string(),
    };

    fill(&mut table, "label", json!(humanize(&singular)));
    table.insert("singular".to_string(), json!(singular));
    table.insert("plural".to_string(), json!(plural));
    fill(&mut table, "timestamps", json!(true));
    fill(&mut table, "soft_delete", json!(false));

    let fields = with_primary(fields);
    let columns: Vec<String> = fields.keys().cloned().collect();
    let targets = option_targets(&fields);
    let fields = fields
        .into_iter()
        .map(|(column, value)| {
            let ctx = FieldContext {
                table: name,
                column: &column,
                columns: &columns,
                targets: &targets,
            };
            let field = resolve_field(&ctx, value)?;
            Ok((column, Value::Object(field)))
        })
        .collect::<SchemaResult<Document>>()?;

    debug!(table = name, fields = fields.len(), "resolved table");
    table.insert(FIELDS_KEY.to_string(), Value::Object(fields));
    Ok(table)
}

fn is_primary(field: &Value) -> bool {
    field.get("index").and_then(Value::as_str) == Some(INDEX_PRIMARY)
}

/// Make sure exactly one field is primary, synthesizing `id` first in order
/// when none is flagged.
fn with_primary(fields: Document) -> Document {
    if fields.values().any(is_primary) {
        return fields;
    }

    let mut id = match fields.get(PRIMARY_COLUMN) {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Document::new(),
    };
    fill(&mut id, "type", json!("integer"));
    id.insert("index".to_string(), json!(INDEX_PRIMARY));
    fill(&mut id, "auto_increment", json!(true));

    let mut result = Document::new();
    result.insert(PRIMARY_COLUMN.to_string(), Value::Object(id));
    result.extend(fields.into_iter().filter(|(column, _)| column != PRIMARY_COLUMN));
    result
}

// ============================================================================
// Fields
// ============================================================================

/// What a field resolver may know about the field's surroundings.
struct FieldContext<'a> {
    table: &'a str,
    column: &'a str,
    /// Every column of the owning table, in declaration order
    columns: &'a [String],
    /// Related table of each option source in the owning table
    targets: &'a [String],
}

impl FieldContext<'_> {
    fn suffix(&self) -> String {
        format!("Found in table '{}', field '{}'.", self.table, self.column)
    }

    fn invalid(&self, message: impl AsRef<str>) -> SchemaError {
        SchemaError::validation(format!("{} {}", message.as_ref(), self.suffix()))
    }
}

fn resolve_field(ctx: &FieldContext<'_>, value: Value) -> SchemaResult<Document> {
    let Value::Object(mut field) = value else {
        return Err(ctx.invalid("Field must be a mapping."));
    };

    let type_spec = match field.get("type") {
        None => return Err(ctx.invalid("Field must have key 'type'.")),
        Some(Value::String(spec)) => spec.clone(),
        Some(_) => return Err(ctx.invalid("Type must be a string.")),
    };
    let (type_name, params) = parse_type(&type_spec);
    let field_type = FieldType::from_name(type_name)
        .ok_or_else(|| ctx.invalid(format!("Type '{type_name}' is not available.")))?;

    normalize_input(ctx, &mut field)?;
    apply_type_params(field_type, &params, &mut field);

    if field_type.is_searchable() && ctx.column != "password" {
        fill(&mut field, "searchable", json!(true));
    }
    if field_type.is_sortable() {
        fill(&mut field, "sortable", json!(true));
    }

    normalize_rules(ctx, &mut field)?;
    if has_rule(&field, "required") {
        if let Some(input) = ensure_input(&mut field, field_type) {
            fill(input, "required", json!(true));
        }
    }

    if let Some(length) = field.get("length").cloned() {
        let free_text = input_type(&field).is_some_and(InputType::is_free_text);
        if let (true, Some(input)) = (free_text, input_mut(&mut field)) {
            fill(input, "maxlength", length);
        }
    }

    resolve_by_type(field_type, &mut field);

    if let Some(kind) = input_type(&field) {
        if let Some(input) = input_mut(&mut field) {
            fill(input, "view", json!(kind.name()));
        }
        resolve_by_input(ctx, kind, &mut field);
    }

    resolve_display(ctx, &mut field);

    let multiple = field
        .get(INPUT_KEY)
        .and_then(|input| input.get("multiple"))
        .and_then(Value::as_bool)
        == Some(true);
    if multiple {
        fill(&mut field, "input_resolver", json!("json_encode({? value ?})"));
        fill(&mut field, "data_resolver", json!("json_decode({? value ?})"));
    }

    Ok(field)
}

/// Turn a bare input type name into `{type: name}` and check the type.
fn normalize_input(ctx: &FieldContext<'_>, field: &mut Document) -> SchemaResult<()> {
    let type_name = match field.get(INPUT_KEY) {
        None => return Ok(()),
        Some(Value::Null) | Some(Value::Bool(false)) => {
            take_key(field, INPUT_KEY);
            return Ok(());
        }
        Some(Value::String(name)) => {
            let name = name.clone();
            field.insert(INPUT_KEY.to_string(), json!({ "type": name }));
            name
        }
        Some(Value::Object(input)) => match input.get("type") {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(ctx.invalid("Field input must have key 'type'.")),
        },
        Some(_) => {
            return Err(ctx.invalid(
                "Field input must be a mapping (with type) or a string (input type).",
            ));
        }
    };

    match InputType::from_name(&type_name) {
        Some(_) => Ok(()),
        None => Err(ctx.invalid(format!("Input type '{type_name}' is not available."))),
    }
}

fn normalize_rules(ctx: &FieldContext<'_>, field: &mut Document) -> SchemaResult<()> {
    let rules = match field.get("rules") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(rules)) => rules
            .split('|')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .map(|rule| json!(rule))
            .collect(),
        Some(Value::Array(rules)) => rules.clone(),
        Some(_) => return Err(ctx.invalid("Rules must be a string or a list.")),
    };
    field.insert("rules".to_string(), Value::Array(rules));
    Ok(())
}

fn has_rule(field: &Document, rule: &str) -> bool {
    field
        .get("rules")
        .and_then(Value::as_array)
        .is_some_and(|rules| rules.iter().any(|r| r.as_str() == Some(rule)))
}

/// Parameters given inline with the type, e.g. `string:80` or `decimal:8,2`.
fn apply_type_params(field_type: FieldType, params: &[String], field: &mut Document) {
    match field_type {
        FieldType::Char | FieldType::String => {
            if let Some(length) = params.first() {
                fill(field, "length", number_or_string(length));
            }
        }
        FieldType::Float | FieldType::Double | FieldType::Decimal => {
            if let Some(precision) = params.first() {
                fill(field, "precision", number_or_string(precision));
            }
            if let Some(scale) = params.get(1) {
                fill(field, "scale", number_or_string(scale));
            }
        }
        FieldType::Enum => {
            if !params.is_empty() {
                fill(field, "values", json!(params));
            }
        }
        _ => {}
    }
}

fn resolve_by_type(field_type: FieldType, field: &mut Document) {
    match field_type {
        FieldType::Enum => {
            let values = field.get("values").cloned();
            if let (Some(Value::Array(values)), Some(input)) = (values, input_mut(field)) {
                let options: Document = values
                    .iter()
                    .map(|v| (scalar_to_string(v), v.clone()))
                    .collect();
                fill(input, "options", Value::Object(options));
            }
        }
        FieldType::Boolean => fill(field, "cast", json!("boolean")),
        FieldType::Json | FieldType::Jsonb => fill(field, "cast", json!("array")),
        _ => {}
    }
}

fn resolve_by_input(ctx: &FieldContext<'_>, input_type: InputType, field: &mut Document) {
    match input_type {
        InputType::File => fill(field, "display", json!("link")),
        InputType::Image => fill(field, "display", json!("image-link")),
        InputType::Password => fill(field, "hidden", json!(true)),
        InputType::Select | InputType::Radio => resolve_optionable(ctx, field),
        InputType::Checkbox | InputType::SelectMultiple => {
            if let Some(input) = input_mut(field) {
                fill(input, "multiple", json!(true));
            }
            resolve_optionable(ctx, field);
        }
        InputType::Text | InputType::Textarea | InputType::Number | InputType::Email => {}
    }
}

/// Infer a relation from a `{table, value, label}` option source, or turn a
/// literal option mapping into a `[{value, label}]` list.
fn resolve_optionable(ctx: &FieldContext<'_>, field: &mut Document) {
    let Some(options) = field
        .get(INPUT_KEY)
        .and_then(|input| input.get("options"))
        .cloned()
    else {
        return;
    };

    let replacement = if let Some(relation) = relation_from_options(ctx, &options) {
        let var_name = relation
            .get("var_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        field.insert(RELATION_KEY.to_string(), relation);
        // Raw-code marker understood by the literal serializer.
        json!(format!("eval(\"${var_name}\")"))
    } else if let Value::Object(map) = options {
        Value::Array(
            map.into_iter()
                .map(|(value, label)| json!({ "value": option_value(value), "label": label }))
                .collect(),
        )
    } else {
        return;
    };

    if let Some(input) = input_mut(field) {
        input.insert("options".to_string(), replacement);
    }
}

fn relation_from_options(ctx: &FieldContext<'_>, options: &Value) -> Option<Value> {
    let table = options.get("table")?.as_str()?;
    let value = options.get("value")?.as_str()?;
    let label = options.get("label")?.as_str()?;

    // A table referenced by several fields gets names from each local key.
    let shared = ctx.targets.iter().filter(|target| *target == table).count() > 1;
    let stem = if shared {
        key_stem(ctx.column).to_string()
    } else {
        singularize(table)
    };
    let alias = ctx
        .columns
        .iter()
        .any(|column| column == label)
        .then(|| format!("{stem}_{label}"));
    let kind = if options.get("multiple").and_then(Value::as_bool) == Some(true) {
        RelationKind::HasMany
    } else {
        RelationKind::HasOne
    };

    debug!(
        table = ctx.table,
        column = ctx.column,
        related = table,
        "inferred relation from options"
    );
    let mut relation = json!({
        "table": table,
        "type": kind.name(),
        "key_from": ctx.column,
        "key_to": value,
        "col_value": value,
        "col_label": label,
        "col_alias": alias,
        "var_name": format!("{stem}_options"),
    });
    if shared {
        relation["name"] = json!(stem);
    }
    Some(relation)
}

/// Related table named by each `{table, ...}` option source, one entry per
/// field.
fn option_targets(fields: &Document) -> Vec<String> {
    fields
        .values()
        .filter_map(|field| field.get(INPUT_KEY)?.get("options")?.get("table")?.as_str())
        .map(str::to_string)
        .collect()
}

/// `author` for `author_id`; other columns are used as they are.
fn key_stem(column: &str) -> &str {
    column
        .strip_suffix("_id")
        .filter(|stem| !stem.is_empty())
        .unwrap_or(column)
}

/// Synthesize list and detail snippets unless declared.
fn resolve_display(ctx: &FieldContext<'_>, field: &mut Document) {
    if !field.contains_key("table_code") {
        let accessor = accessor_column(ctx.column, field.get(RELATION_KEY));
        let code = match field.get("display").and_then(Value::as_str) {
            None => plain_table_code(&accessor),
            Some(name) => match Display::from_name(name) {
                Some(display) => display.table_code(&accessor),
                None => {
                    warn!(
                        table = ctx.table,
                        column = ctx.column,
                        display = name,
                        "unknown display hint, rendering plain value"
                    );
                    plain_table_code(&accessor)
                }
            },
        };
        field.insert("table_code".to_string(), json!(code));
    }

    if !field.contains_key("read_code") {
        let table_code = field
            .get("table_code")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let code = read_code(table_code);
        field.insert("read_code".to_string(), json!(code));
    }
}

/// Column a list row exposes this field's display value under.
fn accessor_column(column: &str, relation: Option<&Value>) -> String {
    let Some(relation) = relation else {
        return column.to_string();
    };
    relation
        .get("col_alias")
        .and_then(Value::as_str)
        .or_else(|| relation.get("col_label").and_then(Value::as_str))
        .unwrap_or(column)
        .to_string()
}

// ============================================================================
// Relations
// ============================================================================

/// A relation declared by one field.
struct FieldRelation {
    table: String,
    kind: RelationKind,
    key_from: String,
    key_to: String,
    /// Accessor name, set when the table is referenced more than once
    name: Option<String>,
}

fn field_relations(table: &Value) -> Vec<FieldRelation> {
    let Some(Value::Object(fields)) = table.get(FIELDS_KEY) else {
        return Vec::new();
    };
    fields
        .values()
        .filter_map(|field| field.get(RELATION_KEY))
        .filter_map(|relation| {
            Some(FieldRelation {
                table: relation.get("table")?.as_str()?.to_string(),
                kind: relation
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(RelationKind::from_name)
                    .unwrap_or(RelationKind::HasOne),
                key_from: relation.get("key_from")?.as_str()?.to_string(),
                key_to: relation.get("key_to")?.as_str()?.to_string(),
                name: relation.get("name").and_then(Value::as_str).map(str::to_string),
            })
        })
        .collect()
}

fn has_relation(relations: &[Value], table: &str, key_from: &str, key_to: &str) -> bool {
    relations.iter().any(|r| {
        r.get("table").and_then(Value::as_str) == Some(table)
            && r.get("key_from").and_then(Value::as_str) == Some(key_from)
            && r.get("key_to").and_then(Value::as_str) == Some(key_to)
    })
}

/// Record each field relation on its table and a back-reference on the
/// referenced table.
fn resolve_relations(tables: &mut Document) -> SchemaResult<()> {
    let declared: Vec<(String, Vec<FieldRelation>)> = tables
        .iter()
        .map(|(name, table)| (name.clone(), field_relations(table)))
        .collect();

    for (name, own) in &declared {
        let Some(Value::Object(table)) = tables.get_mut(name) else {
            continue;
        };
        let mut relations = match table.get(RELATIONS_KEY) {
            Some(Value::Array(relations)) => relations.clone(),
            _ => Vec::new(),
        };

        for relation in own {
            if !declared.iter().any(|(other, _)| *other == relation.table) {
                return Err(SchemaError::UnknownRelatedTable {
                    table: name.clone(),
                    related: relation.table.clone(),
                });
            }
            if !has_relation(&relations, &relation.table, &relation.key_from, &relation.key_to) {
                let mut entry = json!({
                    "table": relation.table,
                    "type": relation.kind.name(),
                    "key_from": relation.key_from,
                    "key_to": relation.key_to,
                });
                if let Some(accessor) = &relation.name {
                    entry["name"] = json!(accessor);
                }
                relations.push(entry);
            }
        }

        for (other, theirs) in declared.iter().filter(|(other, _)| other != name) {
            for relation in theirs.iter().filter(|r| r.table == *name) {
                if !has_relation(&relations, other, &relation.key_to, &relation.key_from) {
                    let mut entry = json!({
                        "table": other,
                        "type": relation.kind.reciprocal().name(),
                        "key_from": relation.key_to,
                        "key_to": relation.key_from,
                    });
                    // Reciprocals are collections, e.g. `author_posts`.
                    if let Some(accessor) = &relation.name {
                        entry["name"] = json!(format!("{accessor}_{other}"));
                    }
                    relations.push(entry);
                }
            }
        }

        debug!(table = %name, relations = relations.len(), "resolved relations");
        table.insert(RELATIONS_KEY.to_string(), Value::Array(relations));
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn fill(map: &mut Document, key: &str, value: Value) {
    map.entry(key).or_insert(value);
}

fn input_mut(field: &mut Document) -> Option<&mut Document> {
    field.get_mut(INPUT_KEY).and_then(Value::as_object_mut)
}

fn input_type(field: &Document) -> Option<InputType> {
    field
        .get(INPUT_KEY)
        .and_then(|input| input.get("type"))
        .and_then(Value::as_str)
        .and_then(InputType::from_name)
}

/// Input descriptor of `field`, creating one from the storage type if absent.
fn ensure_input(field: &mut Document, field_type: FieldType) -> Option<&mut Document> {
    if !field.get(INPUT_KEY).is_some_and(Value::is_object) {
        field.insert(
            INPUT_KEY.to_string(),
            json!({ "type": field_type.default_input().name() }),
        );
    }
    input_mut(field)
}

fn number_or_string(raw: &str) -> Value {
    raw.parse::<u64>().map_or_else(|_| json!(raw), |n| json!(n))
}

/// Option keys read back from YAML are strings; numeric ones become numbers.
fn option_value(key: String) -> Value {
    key.parse::<i64>().map_or(Value::String(key), Value::from)
}
