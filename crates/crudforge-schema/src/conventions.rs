//! Project layout conventions.
//!
//! Where generated files go and which namespaces they live in. Every setting
//! has a default; the resolver writes the defaults into the document for any
//! key the schema leaves out, so the resolved document is self-describing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::document::{Document, fill_path};
use crate::error::{SchemaError, SchemaResult};

/// Default values keyed by document path, filled in when absent.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("controller.path", "app/Http/Controllers"),
    ("controller.namespace", "App\\Http\\Controllers"),
    ("request.path", "app/Http/Requests"),
    ("request.namespace", "App\\Http\\Requests"),
    ("model.path", "app"),
    ("model.namespace", "App"),
    ("repository.path", "app/Repositories"),
    ("repository.namespace", "App\\Repositories"),
    ("view.path", "resources/views"),
    ("view.namespace", ""),
    ("route.file", "routes/web.php"),
    ("route.name", "admin::"),
    ("route.prefix", "admin"),
    ("config_file", "admin"),
    ("upload_disk", "uploads"),
];

/// Write every missing default into `document`.
pub fn fill_defaults(document: &mut Document) {
    for (path, value) in DEFAULTS {
        fill_path(document, path, Value::String((*value).to_string()));
    }
}

/// Output location for one kind of generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Directory relative to the project root
    pub path: String,

    /// Namespace of classes in that directory
    #[serde(default)]
    pub namespace: String,
}

impl Location {
    fn new(path: &str, namespace: &str) -> Self {
        Self {
            path: path.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Fully qualified name of `class` in this location
    pub fn class(&self, class: &str) -> String {
        if self.namespace.is_empty() {
            class.to_string()
        } else {
            format!("{}\\{}", self.namespace, class)
        }
    }

    /// File path of `class` in this location
    pub fn file(&self, class: &str) -> String {
        format!("{}/{}.php", self.path.trim_end_matches('/'), class)
    }
}

/// Route file settings applied to the schema-level route group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConventions {
    #[serde(default = "default_route_file")]
    pub file: String,

    /// Route name prefix, e.g. `admin::`
    #[serde(default = "default_route_name")]
    pub name: String,

    /// URL prefix
    #[serde(default = "default_route_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub middleware: Vec<String>,

    #[serde(default)]
    pub domain: Option<String>,
}

fn default_route_file() -> String {
    "routes/web.php".to_string()
}

fn default_route_name() -> String {
    "admin::".to_string()
}

fn default_route_prefix() -> String {
    "admin".to_string()
}

impl Default for RouteConventions {
    fn default() -> Self {
        Self {
            file: default_route_file(),
            name: default_route_name(),
            prefix: default_route_prefix(),
            namespace: None,
            middleware: Vec::new(),
            domain: None,
        }
    }
}

/// Author credited in generated docblocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Layout conventions read from the root of a resolved schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub author: Author,

    #[serde(default = "default_controller")]
    pub controller: Location,

    #[serde(default = "default_request")]
    pub request: Location,

    #[serde(default = "default_model")]
    pub model: Location,

    #[serde(default = "default_repository")]
    pub repository: Location,

    #[serde(default = "default_view")]
    pub view: Location,

    #[serde(default)]
    pub route: RouteConventions,

    /// Config file name, relative to `config/`
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Storage disk for uploaded files
    #[serde(default = "default_upload_disk")]
    pub upload_disk: String,
}

fn default_controller() -> Location {
    Location::new("app/Http/Controllers", "App\\Http\\Controllers")
}

fn default_request() -> Location {
    Location::new("app/Http/Requests", "App\\Http\\Requests")
}

fn default_model() -> Location {
    Location::new("app", "App")
}

fn default_repository() -> Location {
    Location::new("app/Repositories", "App\\Repositories")
}

fn default_view() -> Location {
    Location::new("resources/views", "")
}

fn default_config_file() -> String {
    "admin".to_string()
}

fn default_upload_disk() -> String {
    "uploads".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            name: None,
            author: Author::default(),
            controller: default_controller(),
            request: default_request(),
            model: default_model(),
            repository: default_repository(),
            view: default_view(),
            route: RouteConventions::default(),
            config_file: default_config_file(),
            upload_disk: default_upload_disk(),
        }
    }
}

impl Conventions {
    /// Read conventions from a schema root, ignoring unrelated keys.
    pub fn from_document(document: &Document) -> SchemaResult<Self> {
        serde_json::from_value(Value::Object(document.clone()))
            .map_err(|e| SchemaError::validation(format!("invalid conventions: {e}")))
    }

    /// Config file path with a `.php` extension
    pub fn config_path(&self) -> String {
        let file = self.config_file.trim_end_matches(".php");
        format!("config/{file}.php")
    }

    /// Key the config file is read under (`admin`, `backend.menu`)
    pub fn config_key(&self) -> String {
        self.config_file.trim_end_matches(".php").replace('/', ".")
    }

    /// Route file path with a `.php` extension
    pub fn route_path(&self) -> String {
        let file = &self.route.file;
        if file.ends_with(".php") {
            file.clone()
        } else {
            format!("{file}.php")
        }
    }

    /// View name, qualified by the view namespace when one is set
    pub fn view_name(&self, view: &str) -> String {
        if self.view.namespace.is_empty() {
            view.to_string()
        } else {
            format!("{}::{}", self.view.namespace, view)
        }
    }

    /// Blade file path of a `/`-separated view
    pub fn view_file(&self, view: &str) -> String {
        format!("{}/{}.blade.php", self.view.path.trim_end_matches('/'), view)
    }

    /// Route name prefixed with the schema route name
    pub fn route_name(&self, route: &str) -> String {
        format!("{}{}", self.route.name, route)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        None(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(one) => vec![one],
        OneOrMany::Many(many) => many,
        OneOrMany::None(()) => Vec::new(),
    })
}

#[cfg(test)]
#[path = "conventions/conventions_tests.rs"]
mod conventions_tests;
