//! Route composition tree.
//!
//! Groups nest routes and other groups. Each group declares its own name,
//! prefix, namespace, middleware and domain; a route's effective values are
//! composed from the root down when they are asked for, so attaching nodes
//! in any order gives the same result.
//!
//! Rendering emits Laravel route declarations:
//!
//! ```text
//! Route::name('admin::')->prefix('admin')->group(function() {
//!     Route::get('/', 'PostController@pageList')->name('posts.page-list');
//! });
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::trace;

use crate::error::{CodegenError, CodegenResult};
use crate::literal::{php_string, to_php};
use crate::reflow::indent_lines;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Any,
}

impl HttpMethod {
    /// Lowercase router method name
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Any => "any",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "any" => Ok(HttpMethod::Any),
            _ => Err(CodegenError::InvalidHttpMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Options
// ============================================================================

/// Attributes a group contributes to everything inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOptions {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub middleware: Vec<String>,
    pub domain: Option<String>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Attributes declared on a single route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    pub name: Option<String>,
    pub middleware: Vec<String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// One route declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    method: HttpMethod,
    path: String,
    handler: String,
    options: RouteOptions,
}

impl Route {
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        handler: impl Into<String>,
        options: RouteOptions,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            handler: handler.into(),
            options,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Declared name, without group prefixes
    pub fn name(&self) -> Option<&str> {
        self.options.name.as_deref()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut chain = Vec::new();
        if let Some(middleware) = middleware_segment(&self.options.middleware) {
            chain.push(middleware);
        }
        chain.push(format!(
            "{}({}, {})",
            self.method,
            php_string(&self.path),
            php_string(&self.handler)
        ));
        if let Some(name) = &self.options.name {
            chain.push(format!("name({})", php_string(name)));
        }
        vec![format!("Route::{};", chain.join("->"))]
    }
}

/// A route or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteNode {
    Route(Route),
    Group(RouteGroup),
}

impl RouteNode {
    fn lines(&self) -> Vec<String> {
        match self {
            RouteNode::Route(route) => route.lines(),
            RouteNode::Group(group) => group.lines(),
        }
    }

    fn is_group(&self) -> bool {
        matches!(self, RouteNode::Group(_))
    }
}

/// A group of routes sharing attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGroup {
    options: GroupOptions,
    nodes: Vec<RouteNode>,
}

impl RouteGroup {
    pub fn new(options: GroupOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
        }
    }

    pub fn options(&self) -> &GroupOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut GroupOptions {
        &mut self.options
    }

    /// Rendered group; a group with no routes renders nothing.
    pub fn lines(&self) -> Vec<String> {
        let body = render_nodes(&self.nodes);
        if body.is_empty() {
            return Vec::new();
        }

        let options = &self.options;
        let mut chain = Vec::new();
        if let Some(domain) = &options.domain {
            chain.push(format!("domain({})", php_string(domain)));
        }
        if let Some(name) = &options.name {
            chain.push(format!("name({})", php_string(name)));
        }
        if let Some(prefix) = &options.prefix {
            chain.push(format!("prefix({})", php_string(prefix)));
        }
        if let Some(middleware) = middleware_segment(&options.middleware) {
            chain.push(middleware);
        }
        if let Some(namespace) = &options.namespace {
            chain.push(format!("namespace({})", php_string(namespace)));
        }
        chain.push("group(function() {".to_string());

        let mut lines = vec![format!("Route::{}", chain.join("->"))];
        lines.extend(indent_lines(body, 1));
        lines.push("});".to_string());
        lines
    }
}

/// Root of a route file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCollection {
    nodes: Vec<RouteNode>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        render_nodes(&self.nodes)
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}

// ============================================================================
// Composition
// ============================================================================

/// A route with every enclosing group's attributes applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRoute {
    pub method: HttpMethod,
    /// URI without leading or trailing `/`; `/` for the root
    pub path: String,
    /// Handler qualified by the enclosing namespaces
    pub handler: String,
    pub name: Option<String>,
    pub middleware: Vec<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Scope {
    name: String,
    prefix: String,
    namespace: String,
    middleware: Vec<String>,
    domain: Option<String>,
}

impl Scope {
    fn enter(&self, options: &GroupOptions) -> Scope {
        let mut middleware = self.middleware.clone();
        middleware.extend(options.middleware.iter().cloned());
        Scope {
            name: format!("{}{}", self.name, options.name.as_deref().unwrap_or("")),
            prefix: join_uri(&self.prefix, options.prefix.as_deref().unwrap_or("")),
            namespace: join_namespace(&self.namespace, options.namespace.as_deref().unwrap_or("")),
            middleware,
            domain: options.domain.clone().or_else(|| self.domain.clone()),
        }
    }

    fn apply(&self, route: &Route) -> EffectiveRoute {
        let path = join_uri(&self.prefix, &route.path);
        let mut middleware = self.middleware.clone();
        middleware.extend(route.options.middleware.iter().cloned());
        EffectiveRoute {
            method: route.method,
            path: if path.is_empty() { "/".to_string() } else { path },
            handler: join_namespace(&self.namespace, &route.handler),
            name: route
                .options
                .name
                .as_ref()
                .map(|name| format!("{}{name}", self.name)),
            middleware,
            domain: self.domain.clone(),
        }
    }
}

fn collect(nodes: &[RouteNode], scope: &Scope, out: &mut Vec<EffectiveRoute>) {
    for node in nodes {
        match node {
            RouteNode::Route(route) => out.push(scope.apply(route)),
            RouteNode::Group(group) => collect(&group.nodes, &scope.enter(&group.options), out),
        }
    }
}

/// Anything routes and groups can be attached to.
pub trait RouteContainer {
    fn nodes(&self) -> &[RouteNode];

    fn nodes_mut(&mut self) -> &mut Vec<RouteNode>;

    /// Attach a route.
    fn add_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: &str,
        options: RouteOptions,
    ) -> &mut Self {
        trace!(%method, path, handler, "adding route");
        self.nodes_mut()
            .push(RouteNode::Route(Route::new(method, path, handler, options)));
        self
    }

    /// Like [`RouteContainer::add_route`], parsing the verb.
    fn add_route_str(
        &mut self,
        method: &str,
        path: &str,
        handler: &str,
        options: RouteOptions,
    ) -> CodegenResult<&mut Self> {
        let method = method.parse()?;
        Ok(self.add_route(method, path, handler, options))
    }

    /// Attach an empty group and return it for populating.
    fn add_group(&mut self, options: GroupOptions) -> CodegenResult<&mut RouteGroup> {
        let nodes = self.nodes_mut();
        nodes.push(RouteNode::Group(RouteGroup::new(options)));
        let Some(RouteNode::Group(group)) = nodes.last_mut() else {
            return Err(CodegenError::DetachedGroup);
        };
        Ok(group)
    }

    /// Every route below this container, in declaration order, with group
    /// attributes applied.
    fn effective_routes(&self) -> Vec<EffectiveRoute> {
        let mut routes = Vec::new();
        collect(self.nodes(), &Scope::default(), &mut routes);
        routes
    }

    /// The route whose effective name is `name`.
    fn find_route_named(&self, name: &str) -> Option<EffectiveRoute> {
        self.effective_routes()
            .into_iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    fn has_route_named(&self, name: &str) -> bool {
        self.find_route_named(name).is_some()
    }
}

impl RouteContainer for RouteGroup {
    fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    fn nodes_mut(&mut self) -> &mut Vec<RouteNode> {
        &mut self.nodes
    }

    /// Routes of this group with its own attributes applied.
    fn effective_routes(&self) -> Vec<EffectiveRoute> {
        let mut routes = Vec::new();
        collect(&self.nodes, &Scope::default().enter(&self.options), &mut routes);
        routes
    }
}

impl RouteContainer for RouteCollection {
    fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    fn nodes_mut(&mut self) -> &mut Vec<RouteNode> {
        &mut self.nodes
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Render sibling nodes, with a blank line around groups.
fn render_nodes(nodes: &[RouteNode]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_group = false;
    for node in nodes {
        let rendered = node.lines();
        if rendered.is_empty() {
            continue;
        }
        if !lines.is_empty() && (previous_group || node.is_group()) {
            lines.push(String::new());
        }
        previous_group = node.is_group();
        lines.extend(rendered);
    }
    lines
}

fn middleware_segment(middleware: &[String]) -> Option<String> {
    match middleware {
        [] => None,
        [one] => Some(format!("middleware({})", php_string(one))),
        many => {
            let list = Value::Array(many.iter().cloned().map(Value::String).collect());
            Some(format!("middleware({})", to_php(&list, false)))
        }
    }
}

fn join_uri(base: &str, path: &str) -> String {
    [base, path]
        .iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A namespace or handler starting with `\` is absolute.
fn join_namespace(base: &str, name: &str) -> String {
    if name.starts_with('\\') || base.is_empty() {
        return name.trim_start_matches('\\').to_string();
    }
    if name.is_empty() {
        return base.to_string();
    }
    format!("{}\\{}", base.trim_end_matches('\\'), name)
}

#[cfg(test)]
#[path = "route/route_tests.rs"]
mod route_tests;
