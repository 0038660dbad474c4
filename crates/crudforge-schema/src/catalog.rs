//! Supported storage, input and display types.
//!
//! Each type is a closed enum with a name table, so the whitelist and the
//! per-type behavior the resolver dispatches on are checked exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Char,
    String,
    Text,
    MediumText,
    LongText,
    Integer,
    TinyInteger,
    SmallInteger,
    MediumInteger,
    BigInteger,
    UnsignedInteger,
    UnsignedTinyInteger,
    UnsignedSmallInteger,
    UnsignedMediumInteger,
    UnsignedBigInteger,
    Float,
    Double,
    Decimal,
    Boolean,
    Enum,
    Json,
    Jsonb,
    Date,
    DateTime,
    DateTimeTz,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    Binary,
    Uuid,
    IpAddress,
}

const FIELD_TYPES: &[(FieldType, &str)] = &[
    (FieldType::Char, "char"),
    (FieldType::String, "string"),
    (FieldType::Text, "text"),
    (FieldType::MediumText, "medium-text"),
    (FieldType::LongText, "long-text"),
    (FieldType::Integer, "integer"),
    (FieldType::TinyInteger, "tiny-integer"),
    (FieldType::SmallInteger, "small-integer"),
    (FieldType::MediumInteger, "medium-integer"),
    (FieldType::BigInteger, "big-integer"),
    (FieldType::UnsignedInteger, "unsigned-integer"),
    (FieldType::UnsignedTinyInteger, "unsigned-tiny-integer"),
    (FieldType::UnsignedSmallInteger, "unsigned-small-integer"),
    (FieldType::UnsignedMediumInteger, "unsigned-medium-integer"),
    (FieldType::UnsignedBigInteger, "unsigned-big-integer"),
    (FieldType::Float, "float"),
    (FieldType::Double, "double"),
    (FieldType::Decimal, "decimal"),
    (FieldType::Boolean, "boolean"),
    (FieldType::Enum, "enum"),
    (FieldType::Json, "json"),
    (FieldType::Jsonb, "jsonb"),
    (FieldType::Date, "date"),
    (FieldType::DateTime, "date-time"),
    (FieldType::DateTimeTz, "date-time-tz"),
    (FieldType::Time, "time"),
    (FieldType::TimeTz, "time-tz"),
    (FieldType::Timestamp, "timestamp"),
    (FieldType::TimestampTz, "timestamp-tz"),
    (FieldType::Binary, "binary"),
    (FieldType::Uuid, "uuid"),
    (FieldType::IpAddress, "ip-address"),
];

impl FieldType {
    /// Look up a storage type by its schema name
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_TYPES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(ty, _)| *ty)
    }

    /// Schema name of this type
    pub fn name(self) -> &'static str {
        FIELD_TYPES
            .iter()
            .find(|(ty, _)| *ty == self)
            .map_or("", |(_, n)| n)
    }

    /// All supported storage type names, in declaration order
    pub fn names() -> impl Iterator<Item = &'static str> {
        FIELD_TYPES.iter().map(|(_, n)| *n)
    }

    /// Textual types take part in keyword search
    pub fn is_searchable(self) -> bool {
        matches!(
            self,
            FieldType::Char
                | FieldType::String
                | FieldType::Text
                | FieldType::MediumText
                | FieldType::LongText
                | FieldType::Enum
        )
    }

    /// Textual and date types can order list pages
    pub fn is_sortable(self) -> bool {
        self.is_searchable()
            || matches!(self, FieldType::Date | FieldType::DateTime | FieldType::Timestamp)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldType::Integer
                | FieldType::TinyInteger
                | FieldType::SmallInteger
                | FieldType::MediumInteger
                | FieldType::BigInteger
                | FieldType::UnsignedInteger
                | FieldType::UnsignedTinyInteger
                | FieldType::UnsignedSmallInteger
                | FieldType::UnsignedMediumInteger
                | FieldType::UnsignedBigInteger
                | FieldType::Float
                | FieldType::Double
                | FieldType::Decimal
        )
    }

    /// Input used when a field gains a form input without declaring one
    pub fn default_input(self) -> InputType {
        match self {
            FieldType::Text | FieldType::MediumText | FieldType::LongText => InputType::Textarea,
            FieldType::Enum => InputType::Select,
            FieldType::Boolean => InputType::Radio,
            ty if ty.is_numeric() => InputType::Number,
            _ => InputType::Text,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split `name:param,param` into the type name and its trimmed parameters.
pub fn parse_type(spec: &str) -> (&str, Vec<String>) {
    match spec.split_once(':') {
        Some((name, params)) => (
            name.trim(),
            params.split(',').map(|p| p.trim().to_string()).collect(),
        ),
        None => (spec.trim(), Vec::new()),
    }
}

/// Form input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Textarea,
    File,
    Image,
    Number,
    Email,
    Password,
    Select,
    SelectMultiple,
    Checkbox,
    Radio,
}

const INPUT_TYPES: &[(InputType, &str)] = &[
    (InputType::Text, "text"),
    (InputType::Textarea, "textarea"),
    (InputType::File, "file"),
    (InputType::Image, "image"),
    (InputType::Number, "number"),
    (InputType::Email, "email"),
    (InputType::Password, "password"),
    (InputType::Select, "select"),
    (InputType::SelectMultiple, "select-multiple"),
    (InputType::Checkbox, "checkbox"),
    (InputType::Radio, "radio"),
];

impl InputType {
    /// Look up an input type by its schema name
    pub fn from_name(name: &str) -> Option<Self> {
        INPUT_TYPES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(ty, _)| *ty)
    }

    pub fn name(self) -> &'static str {
        INPUT_TYPES
            .iter()
            .find(|(ty, _)| *ty == self)
            .map_or("", |(_, n)| n)
    }

    /// Free-text inputs honor a `maxlength`
    pub fn is_free_text(self) -> bool {
        matches!(self, InputType::Text | InputType::Textarea)
    }

    /// Inputs whose value is an uploaded file
    pub fn is_file(self) -> bool {
        matches!(self, InputType::File | InputType::Image)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display hint for list and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {
    Link,
    Image,
    ImageLink,
    Html,
}

impl Display {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "link" => Some(Display::Link),
            "image" => Some(Display::Image),
            "image-link" => Some(Display::ImageLink),
            "html" => Some(Display::Html),
            _ => None,
        }
    }

    /// Blade snippet rendering the value held in `column`.
    ///
    /// `{? varname ?}` and `{? disk ?}` stay as placeholders for the view
    /// template.
    pub fn table_code(self, column: &str) -> String {
        let url = format!("{{{{ Storage::disk('{{? disk ?}}')->url(${{? varname ?}}['{column}']) }}}}");
        let image = format!("<img src=\"{url}\" style=\"max-height:100px;width:auto;\"/>");
        match self {
            Display::Link => format!(
                "<a target=\"_blank\" href=\"{url}\">{}</a>",
                plain_table_code(column)
            ),
            Display::Image => image,
            Display::ImageLink => format!("<a target=\"_blank\" href=\"{url}\">\n{image}\n</a>"),
            Display::Html => format!("{{!! ${{? varname ?}}['{column}'] !!}}"),
        }
    }
}

/// Kind of link between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsTo,
    BelongsToMany,
}

impl RelationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "has-one" => Some(RelationKind::HasOne),
            "has-many" => Some(RelationKind::HasMany),
            "belongs-to" => Some(RelationKind::BelongsTo),
            "belongs-to-many" => Some(RelationKind::BelongsToMany),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::HasOne => "has-one",
            RelationKind::HasMany => "has-many",
            RelationKind::BelongsTo => "belongs-to",
            RelationKind::BelongsToMany => "belongs-to-many",
        }
    }

    /// Kind recorded on the referenced table.
    ///
    /// A single-valued link is seen as a collection from the other side.
    pub fn reciprocal(self) -> Self {
        match self {
            RelationKind::HasOne | RelationKind::BelongsTo => RelationKind::HasMany,
            RelationKind::HasMany | RelationKind::BelongsToMany => RelationKind::BelongsToMany,
        }
    }

    /// Whether the owning side holds many related rows
    pub fn is_collection(self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::BelongsToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blade snippet echoing the value held in `column`.
pub fn plain_table_code(column: &str) -> String {
    format!("{{{{ ${{? varname ?}}['{column}'] }}}}")
}

/// Detail-page row wrapping a table snippet.
pub fn read_code(table_code: &str) -> String {
    format!(
        "<tr>\n<td width=\"200\" class=\"field-name\"><strong>{{? label ?}}</strong></td>\n<td width=\"10\" class=\"text-center\">:</td>\n<td class=\"field-value\">{table_code}</td>\n</tr>"
    )
}

#[cfg(test)]
#[path = "catalog/catalog_tests.rs"]
mod catalog_tests;
