//! Eloquent model classes.

use anyhow::Result;
use crudforge_codegen::{ClassBuilder, Property, Visibility, php_string};
use crudforge_schema::naming::{singularize, to_camel_case};
use crudforge_schema::{Relation, RelationKind, Schema, Table};
use serde_json::{Map, Value, json};

use super::{class_docblock, related_table};

const ELOQUENT_MODEL: &str = "Illuminate\\Database\\Eloquent\\Model";
const SOFT_DELETES: &str = "Illuminate\\Database\\Eloquent\\SoftDeletes";
const RELATIONS_NAMESPACE: &str = "Illuminate\\Database\\Eloquent\\Relations";

/// The model class of `table`.
pub fn model_class(schema: &Schema, table: &Table) -> Result<ClassBuilder> {
    let mut class = ClassBuilder::new(&table.model_class_qualified());
    class.set_parent(ELOQUENT_MODEL);
    class_docblock(schema, &mut class, &format!("{} model", table.label()));

    if table.uses_soft_delete() {
        class.use_trait(SOFT_DELETES);
    }

    class.add_property(
        Property::new("table", "string")
            .visibility(Visibility::Protected)
            .initial(json!(table.name()))
            .description("Table name"),
    );
    if let Some(primary) = table.primary_column() {
        class.add_property(
            Property::new("primaryKey", "string")
                .visibility(Visibility::Protected)
                .initial(json!(primary))
                .description("Primary key column"),
        );
    }
    class.add_property(
        Property::new("timestamps", "bool")
            .initial(json!(table.uses_timestamps()))
            .description("Whether created_at and updated_at are maintained"),
    );
    class.add_property(
        Property::new("fillable", "array")
            .visibility(Visibility::Protected)
            .initial(json!(table.fillable_columns()))
            .description("Mass assignable columns"),
    );

    let hidden: Vec<&str> = table
        .fields()
        .iter()
        .filter(|f| f.is_hidden())
        .map(|f| f.column())
        .collect();
    if !hidden.is_empty() {
        class.add_property(
            Property::new("hidden", "array")
                .visibility(Visibility::Protected)
                .initial(json!(hidden))
                .description("Columns hidden from serialization"),
        );
    }

    let casts: Map<String, Value> = table
        .fields()
        .iter()
        .filter_map(|f| f.cast().map(|cast| (f.column().to_string(), json!(cast))))
        .collect();
    if !casts.is_empty() {
        class.add_property(
            Property::new("casts", "array")
                .visibility(Visibility::Protected)
                .initial(Value::Object(casts))
                .description("Attribute casts"),
        );
    }

    for relation in table.relations() {
        add_relation_method(schema, table, &mut class, relation)?;
    }

    Ok(class)
}

/// Accessor name of a relation, singular for single-valued links. A
/// resolved `name` wins so links to the same table stay apart.
fn relation_method_name(relation: &Relation) -> String {
    if let Some(name) = &relation.name {
        to_camel_case(name)
    } else if relation.kind.is_collection() {
        to_camel_case(&relation.table)
    } else {
        to_camel_case(&singularize(&relation.table))
    }
}

fn add_relation_method(
    schema: &Schema,
    table: &Table,
    class: &mut ClassBuilder,
    relation: &Relation,
) -> Result<()> {
    let related = related_table(schema, &relation.table)?;
    let related_class = related.model_class_qualified();
    let related_name = if related_class == table.model_class_qualified() {
        related.model_class()
    } else {
        class.use_class(&related_class, None);
        class.local_name(&related_class)
    };

    let (call, returns) = match relation.kind {
        RelationKind::HasOne => ("hasOne", "HasOne"),
        RelationKind::HasMany => ("hasMany", "HasMany"),
        RelationKind::BelongsTo => ("belongsTo", "BelongsTo"),
        RelationKind::BelongsToMany => ("belongsToMany", "BelongsToMany"),
    };
    // hasOne/hasMany take the key on the related table first, belongsTo
    // the key on this one.
    let (first, second) = match relation.kind {
        RelationKind::BelongsTo => (&relation.key_from, &relation.key_to),
        _ => (&relation.key_to, &relation.key_from),
    };
    let code = match relation.kind {
        RelationKind::BelongsToMany => format!("return $this->{call}({related_name}::class);"),
        _ => format!(
            "return $this->{call}({related_name}::class, {}, {});",
            php_string(first),
            php_string(second)
        ),
    };

    let method = class.add_method(&relation_method_name(relation));
    method.set_return_type(format!("{RELATIONS_NAMESPACE}\\{returns}"));
    method
        .docblock()
        .add_text(format!("{} relation ({})", related.label(), relation.kind));
    method.body().append(code);
    Ok(())
}
