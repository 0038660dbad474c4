//! crudforge-codegen - Code assembly engine
//!
//! Building blocks the artifact generators compose PHP files from:
//! - [`to_php`] serializes JSON values as PHP array literals
//! - [`reflow`] re-indents loosely written code and markup
//! - [`CodeBlock`] holds labeled fragments that can be edited after the fact
//! - [`Docblock`], [`Method`] and [`ClassBuilder`] emit doc comments,
//!   methods, classes and interfaces with their imports resolved
//! - [`RouteCollection`] is a tree of routes and groups whose names, paths
//!   and namespaces compose at render time
//! - [`Stub`] fills `{? key ?}` placeholders in text templates

pub mod class;
pub mod container;
pub mod docblock;
mod error;
pub mod imports;
pub mod literal;
pub mod method;
pub mod reflow;
pub mod route;
pub mod stub;

pub use class::{ClassBuilder, ClassKind, Property};
pub use container::{CodeBlock, Fragment};
pub use docblock::Docblock;
pub use error::{CodegenError, CodegenResult};
pub use imports::Imports;
pub use literal::{php_string, raw, to_php};
pub use method::{Argument, Method, Visibility};
pub use reflow::{INDENT, indent_lines, reflow, reflow_code};
pub use route::{
    EffectiveRoute, GroupOptions, HttpMethod, Route, RouteCollection, RouteContainer, RouteGroup,
    RouteNode, RouteOptions,
};
pub use stub::{Stub, render_stub};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassBuilder, CodeBlock, CodegenError, CodegenResult, Docblock, GroupOptions, HttpMethod,
        Method, Property, RouteCollection, RouteContainer, RouteOptions, Visibility, raw, to_php,
    };
}
