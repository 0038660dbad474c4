//! Error types for schema loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema loading and resolution.
///
/// Every variant is fatal: a schema either resolves completely or the run
/// aborts before any code is generated.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema document could not be found
    #[error("schema file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A schema document could not be parsed
    #[error("syntax error in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    /// A schema document exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file includes itself, directly or through other files
    #[error("include cycle detected: {}", format_chain(chain))]
    IncludeCycle { chain: Vec<PathBuf> },

    /// `+extends` names a key path that does not exist
    #[error("cannot extend '{target}': key '{target}' is not defined in your schema")]
    UndefinedExtendsTarget { target: String },

    /// `+extends` names a key path that is not a mapping
    #[error("cannot extend '{target}': value of '{target}' is not a mapping")]
    NonObjectExtendsTarget { target: String },

    /// `+extends` chain loops back on itself
    #[error("extends cycle detected: {}", chain.join(" -> "))]
    ExtendsCycle { chain: Vec<String> },

    /// `${...}` names a key path that does not exist
    #[error("'{key}' is undefined{}", file.as_ref().map(|f| format!(" in '{}'", f.display())).unwrap_or_else(|| " in your schema".to_string()))]
    UndefinedVariable { key: String, file: Option<PathBuf> },

    /// `${...}` references form a loop
    #[error("variable cycle detected: {}", chain.join(" -> "))]
    VariableCycle { chain: Vec<String> },

    /// Required structure is missing or a value is unsupported
    #[error("invalid schema: {0}")]
    Validation(String),

    /// A relation points at a table the schema does not declare
    #[error(
        "table '{table}' has relation to table '{related}', but table '{related}' is not described in your schema"
    )]
    UnknownRelatedTable { table: String, related: String },
}

impl SchemaError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            SchemaError::NotFound { .. } => 1,
            SchemaError::Syntax { .. } => 2,
            SchemaError::Io { .. } => 3,
            SchemaError::IncludeCycle { .. } => 4,
            SchemaError::UndefinedExtendsTarget { .. } => 5,
            SchemaError::NonObjectExtendsTarget { .. } => 6,
            SchemaError::ExtendsCycle { .. } => 7,
            SchemaError::UndefinedVariable { .. } => 8,
            SchemaError::VariableCycle { .. } => 9,
            SchemaError::Validation(_) => 10,
            SchemaError::UnknownRelatedTable { .. } => 11,
        }
    }

    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        SchemaError::Validation(message.into())
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
