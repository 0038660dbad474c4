//! Typed, read-only views over a resolved schema.
//!
//! [`Schema`] owns its tables in declaration order; each [`Table`] owns its
//! fields in declaration order. Names the generators need (class names, file
//! paths, view and route names) are derived here from the table name and the
//! shared [`Conventions`].

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{Display, FieldType, InputType, RelationKind, parse_type};
use crate::conventions::Conventions;
use crate::document::Document;
use crate::error::{SchemaError, SchemaResult};
use crate::naming::{humanize, pluralize, to_camel_case, to_kebab_case, to_pascal_case};
use crate::resolver::{FIELDS_KEY, INDEX_PRIMARY, TABLES_KEY};

/// A resolved schema.
#[derive(Debug, Clone)]
pub struct Schema {
    conventions: Arc<Conventions>,
    tables: Vec<Table>,
    document: Document,
}

impl Schema {
    /// Build typed views over a document produced by [`crate::resolve`].
    pub fn from_document(document: Document) -> SchemaResult<Self> {
        let conventions = Arc::new(Conventions::from_document(&document)?);

        let Some(Value::Object(tables)) = document.get(TABLES_KEY) else {
            return Err(SchemaError::validation(format!(
                "Schema must have key '{TABLES_KEY}'"
            )));
        };
        let tables = tables
            .iter()
            .map(|(name, value)| Table::from_value(name, value, Arc::clone(&conventions)))
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self {
            conventions,
            tables,
            document,
        })
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Tables in declaration order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// The resolved document the views were built from
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn name(&self) -> Option<&str> {
        self.conventions.name.as_deref()
    }

    pub fn author_name(&self) -> Option<&str> {
        self.conventions.author.name.as_deref()
    }

    pub fn author_email(&self) -> Option<&str> {
        self.conventions.author.email.as_deref()
    }

    pub fn upload_disk(&self) -> &str {
        &self.conventions.upload_disk
    }

    /// Key the generated config file is read under
    pub fn config_key(&self) -> String {
        self.conventions.config_key()
    }
}

// ============================================================================
// Tables
// ============================================================================

/// A relation recorded on a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relation {
    pub table: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub key_from: String,
    pub key_to: String,
    /// Accessor name when the table is linked to the same table more than
    /// once, e.g. `author` or `author_posts`
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TableSpec {
    singular: String,
    plural: String,
    label: String,
    #[serde(default)]
    timestamps: bool,
    #[serde(default)]
    soft_delete: bool,
    #[serde(default)]
    relations: Vec<Relation>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    controller: Option<String>,
    #[serde(default)]
    create_request: Option<String>,
    #[serde(default)]
    update_request: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

/// CRUD actions each table gets a route for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PageList,
    PageDetail,
    FormCreate,
    PostCreate,
    FormEdit,
    PostEdit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::PageList,
        Action::PageDetail,
        Action::FormCreate,
        Action::PostCreate,
        Action::FormEdit,
        Action::PostEdit,
        Action::Delete,
    ];

    /// Route and view suffix, e.g. `page-list`
    pub fn name(self) -> &'static str {
        match self {
            Action::PageList => "page-list",
            Action::PageDetail => "page-detail",
            Action::FormCreate => "form-create",
            Action::PostCreate => "post-create",
            Action::FormEdit => "form-edit",
            Action::PostEdit => "post-edit",
            Action::Delete => "delete",
        }
    }

    /// Controller method handling the action, e.g. `pageList`
    pub fn method(self) -> &'static str {
        match self {
            Action::PageList => "pageList",
            Action::PageDetail => "pageDetail",
            Action::FormCreate => "formCreate",
            Action::PostCreate => "postCreate",
            Action::FormEdit => "formEdit",
            Action::PostEdit => "postEdit",
            Action::Delete => "delete",
        }
    }
}

/// One data entity.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    spec: TableSpec,
    fields: Vec<Field>,
    conventions: Arc<Conventions>,
}

impl Table {
    fn from_value(name: &str, value: &Value, conventions: Arc<Conventions>) -> SchemaResult<Self> {
        let spec = TableSpec::deserialize(value)
            .map_err(|e| SchemaError::validation(format!("Table '{name}' is invalid: {e}")))?;

        let Some(Value::Object(fields)) = value.get(FIELDS_KEY) else {
            return Err(SchemaError::validation(format!(
                "Table '{name}' must have key '{FIELDS_KEY}'"
            )));
        };
        let fields = fields
            .iter()
            .map(|(column, value)| Field::from_value(name, column, value, Arc::clone(&conventions)))
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            spec,
            fields,
            conventions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn singular(&self) -> &str {
        &self.spec.singular
    }

    pub fn plural(&self) -> &str {
        &self.spec.plural
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.spec.icon.as_deref()
    }

    pub fn uses_timestamps(&self) -> bool {
        self.spec.timestamps
    }

    pub fn uses_soft_delete(&self) -> bool {
        self.spec.soft_delete
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column == column)
    }

    pub fn primary_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_primary())
    }

    pub fn primary_column(&self) -> Option<&str> {
        self.primary_field().map(Field::column)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.spec.relations
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_searchable())
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_sortable())
    }

    /// Fields shown in create and edit forms
    pub fn inputable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.has_input())
    }

    /// Fields whose input is a file upload
    pub fn file_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_input_file())
    }

    /// Fields carrying an inferred relation
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.relation().is_some())
    }

    pub fn fillable_columns(&self) -> Vec<&str> {
        self.inputable_fields().map(Field::column).collect()
    }

    // Classes

    pub fn model_class(&self) -> String {
        self.spec
            .model
            .clone()
            .unwrap_or_else(|| to_pascal_case(&self.spec.singular))
    }

    pub fn model_class_qualified(&self) -> String {
        self.conventions.model.class(&self.model_class())
    }

    pub fn model_path(&self) -> String {
        self.conventions.model.file(&self.model_class())
    }

    pub fn controller_class(&self) -> String {
        self.spec
            .controller
            .clone()
            .unwrap_or_else(|| format!("{}Controller", to_pascal_case(&self.spec.singular)))
    }

    pub fn controller_class_qualified(&self) -> String {
        self.conventions.controller.class(&self.controller_class())
    }

    pub fn controller_path(&self) -> String {
        self.conventions.controller.file(&self.controller_class())
    }

    pub fn create_request_class(&self) -> String {
        self.spec
            .create_request
            .clone()
            .unwrap_or_else(|| format!("Create{}Request", to_pascal_case(&self.spec.singular)))
    }

    pub fn create_request_class_qualified(&self) -> String {
        self.conventions.request.class(&self.create_request_class())
    }

    pub fn create_request_path(&self) -> String {
        self.conventions.request.file(&self.create_request_class())
    }

    pub fn update_request_class(&self) -> String {
        self.spec
            .update_request
            .clone()
            .unwrap_or_else(|| format!("Update{}Request", to_pascal_case(&self.spec.singular)))
    }

    pub fn update_request_class_qualified(&self) -> String {
        self.conventions.request.class(&self.update_request_class())
    }

    pub fn update_request_path(&self) -> String {
        self.conventions.request.file(&self.update_request_class())
    }

    pub fn repository_class(&self) -> String {
        format!("{}Repository", to_pascal_case(&self.spec.singular))
    }

    pub fn repository_class_qualified(&self) -> String {
        self.conventions.repository.class(&self.repository_class())
    }

    pub fn repository_path(&self) -> String {
        self.conventions.repository.file(&self.repository_class())
    }

    // Views and routes

    /// View name for an action, e.g. `post.page-list`
    pub fn view_name(&self, action: Action) -> String {
        self.conventions
            .view_name(&format!("{}.{}", self.spec.singular, action.name()))
    }

    /// Blade file for an action, e.g. `resources/views/post/page-list.blade.php`
    pub fn view_path(&self, action: Action) -> String {
        self.conventions
            .view_file(&format!("{}/{}", self.spec.singular, action.name()))
    }

    /// URL and route-name segment, the table name with `-` for `_`
    pub fn route_prefix(&self) -> String {
        self.name.replace('_', "-")
    }

    /// Fully qualified route name, e.g. `admin::posts.page-list`
    pub fn route_name(&self, action: Action) -> String {
        self.conventions
            .route_name(&format!("{}.{}", self.route_prefix(), action.name()))
    }

    /// Variable holding one row in generated code, e.g. `post`
    pub fn var_name(&self) -> String {
        to_camel_case(&self.spec.singular)
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Relation descriptor attached to a field with an option source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldRelation {
    pub table: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub key_from: String,
    pub key_to: String,
    pub col_value: String,
    pub col_label: String,
    #[serde(default)]
    pub col_alias: Option<String>,
    pub var_name: String,
}

impl FieldRelation {
    /// Column the label is selected as
    pub fn label_column(&self) -> &str {
        self.col_alias.as_deref().unwrap_or(&self.col_label)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct InputSpec {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    view: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    multiple: bool,
    #[serde(flatten)]
    params: Document,
}

#[derive(Debug, Clone, Deserialize)]
struct FieldSpec {
    #[serde(rename = "type")]
    type_spec: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    input: Option<InputSpec>,
    #[serde(default)]
    rules: Vec<String>,
    #[serde(default)]
    index: Option<String>,
    #[serde(default)]
    auto_increment: bool,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    searchable: bool,
    #[serde(default)]
    sortable: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    length: Option<Value>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    table_code: String,
    #[serde(default)]
    read_code: String,
    #[serde(default)]
    relation: Option<FieldRelation>,
    #[serde(default)]
    input_resolver: Option<String>,
    #[serde(default)]
    data_resolver: Option<String>,
    #[serde(default)]
    upload_path: Option<String>,
    #[serde(default)]
    upload_disk: Option<String>,
    #[serde(default)]
    cast: Option<String>,
}

/// One column of a table.
#[derive(Debug, Clone)]
pub struct Field {
    table: String,
    column: String,
    field_type: FieldType,
    type_params: Vec<String>,
    input_type: Option<InputType>,
    spec: FieldSpec,
    conventions: Arc<Conventions>,
}

impl Field {
    fn from_value(
        table: &str,
        column: &str,
        value: &Value,
        conventions: Arc<Conventions>,
    ) -> SchemaResult<Self> {
        let invalid = |message: String| {
            SchemaError::validation(format!(
                "{message} Found in table '{table}', field '{column}'."
            ))
        };

        let spec = FieldSpec::deserialize(value).map_err(|e| invalid(format!("Field is invalid: {e}.")))?;
        let (type_name, params) = parse_type(&spec.type_spec);
        let field_type = FieldType::from_name(type_name)
            .ok_or_else(|| invalid(format!("Type '{type_name}' is not available.")))?;
        let input_type = match &spec.input {
            None => None,
            Some(input) => Some(
                InputType::from_name(&input.kind)
                    .ok_or_else(|| invalid(format!("Input type '{}' is not available.", input.kind)))?,
            ),
        };

        Ok(Self {
            table: table.to_string(),
            column: column.to_string(),
            field_type,
            type_params: params,
            input_type,
            spec,
            conventions,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Name of the owning table
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Declared label, or the humanized column name
    pub fn label(&self) -> String {
        self.spec
            .label
            .clone()
            .unwrap_or_else(|| humanize(&self.column))
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }

    pub fn input_type(&self) -> Option<InputType> {
        self.input_type
    }

    pub fn has_input(&self) -> bool {
        self.input_type.is_some()
    }

    /// Partial view rendering the input, e.g. `partials.fields.text`
    pub fn input_view(&self) -> Option<String> {
        let input = self.spec.input.as_ref()?;
        let view = input.view.as_deref().unwrap_or(&input.kind);
        Some(format!("partials.fields.{view}"))
    }

    /// Parameters handed to the input partial: `name`, `label`, then every
    /// declared input setting except `type` and `view`.
    pub fn input_params(&self) -> Document {
        let mut params = Document::new();
        params.insert("name".to_string(), Value::String(self.column.clone()));
        params.insert("label".to_string(), Value::String(self.label()));
        if let Some(input) = &self.spec.input {
            if input.required {
                params.insert("required".to_string(), Value::Bool(true));
            }
            if input.multiple {
                params.insert("multiple".to_string(), Value::Bool(true));
            }
            for (key, value) in &input.params {
                params.insert(key.clone(), value.clone());
            }
        }
        params
    }

    /// Literal option list or raw option expression, when declared
    pub fn input_options(&self) -> Option<&Value> {
        self.spec.input.as_ref()?.params.get("options")
    }

    pub fn is_multiple(&self) -> bool {
        self.spec.input.as_ref().is_some_and(|input| input.multiple)
    }

    pub fn rules(&self) -> &[String] {
        &self.spec.rules
    }

    /// Whether validation requires a value
    pub fn is_required(&self) -> bool {
        self.spec.rules.iter().any(|rule| rule == "required")
    }

    pub fn is_nullable(&self) -> bool {
        self.spec.nullable
    }

    pub fn index(&self) -> Option<&str> {
        self.spec.index.as_deref()
    }

    pub fn is_primary(&self) -> bool {
        self.spec.index.as_deref() == Some(INDEX_PRIMARY)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.spec.auto_increment
    }

    pub fn is_searchable(&self) -> bool {
        self.spec.searchable
    }

    pub fn is_sortable(&self) -> bool {
        self.spec.sortable
    }

    pub fn is_hidden(&self) -> bool {
        self.spec.hidden
    }

    pub fn is_input_file(&self) -> bool {
        self.input_type.is_some_and(InputType::is_file)
    }

    /// Declared length, when numeric
    pub fn length(&self) -> Option<u64> {
        self.spec.length.as_ref().and_then(Value::as_u64)
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.spec.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.spec.description.as_deref()
    }

    pub fn display(&self) -> Option<Display> {
        self.spec.display.as_deref().and_then(Display::from_name)
    }

    /// Blade snippet for list pages
    pub fn table_code(&self) -> &str {
        &self.spec.table_code
    }

    /// Blade snippet for detail pages
    pub fn read_code(&self) -> &str {
        &self.spec.read_code
    }

    pub fn relation(&self) -> Option<&FieldRelation> {
        self.spec.relation.as_ref()
    }

    /// Expression template applied to request input before saving
    pub fn input_resolver(&self) -> Option<&str> {
        self.spec.input_resolver.as_deref()
    }

    /// Expression template applied to stored data before editing
    pub fn data_resolver(&self) -> Option<&str> {
        self.spec.data_resolver.as_deref()
    }

    /// Model attribute cast, e.g. `array`
    pub fn cast(&self) -> Option<&str> {
        self.spec.cast.as_deref()
    }

    /// Upload directory, e.g. `posts/cover-images`
    pub fn upload_path(&self) -> String {
        self.spec.upload_path.clone().unwrap_or_else(|| {
            format!("{}/{}", self.table, pluralize(&to_kebab_case(&self.column)))
        })
    }

    pub fn upload_disk(&self) -> &str {
        self.spec
            .upload_disk
            .as_deref()
            .unwrap_or(&self.conventions.upload_disk)
    }
}
