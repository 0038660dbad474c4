//! Error types for code assembly

use thiserror::Error;

/// Result type alias for code assembly operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for code assembly.
///
/// These are raised at the call that introduced the bad value, never at
/// render time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// Method visibility is not `public`, `protected` or `private`
    #[error("visibility '{0}' is not valid, expected public, protected or private")]
    InvalidVisibility(String),

    /// Route verb is not a supported HTTP method
    #[error("http method '{0}' is not supported")]
    InvalidHttpMethod(String),

    /// A group attached to a route container could not be read back
    #[error("route group was not attached to its container")]
    DetachedGroup,
}

impl CodegenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            CodegenError::InvalidVisibility(_) => 101,
            CodegenError::InvalidHttpMethod(_) => 102,
            CodegenError::DetachedGroup => 103,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
