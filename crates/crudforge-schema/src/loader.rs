//! Schema loading: include, extends and variable passes.
//!
//! [`Loader::load`] reads the root document and runs three passes over it:
//!
//! 1. **Includes.** A `+include` key merges one or more files into the
//!    surrounding mapping (surrounding keys win). A string value of the form
//!    `+include:<file>` replaces that value with the file's content.
//! 2. **Extends.** A `+extends` key merges one or more key paths of the
//!    include-resolved document into the surrounding mapping (local keys win).
//! 3. **Variables.** `${key.path}` markers are replaced by the value at that
//!    path in the root; `${this.key.path}` looks the path up in the document
//!    owned by the file that declared the marker.
//!
//! After a successful load no directive keys and no markers remain.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::document::{
    Document, from_yaml, get_path, get_path_mut, is_scalar, join_path, merge_defaults,
    scalar_to_string, string_list, take_key,
};
use crate::error::{SchemaError, SchemaResult};

/// Directive key merging other files into a mapping.
pub const INCLUDE_KEY: &str = "+include";

/// Value prefix replacing a value with another file's content.
pub const INCLUDE_PREFIX: &str = "+include:";

/// Directive key merging other parts of the document into a mapping.
pub const EXTENDS_KEY: &str = "+extends";

/// Extension appended to references that carry none.
pub const DEFAULT_EXTENSION: &str = "yml";

#[allow(clippy::expect_used)] // Safe: constant pattern
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\{(this\.)?([a-z0-9_-]+(?:\.[a-z0-9_-]+)*)\}")
        .expect("variable pattern is valid")
});

// ============================================================================
// Sources
// ============================================================================

/// Reads a serialized document from storage.
pub trait DocumentSource {
    /// Read and parse the document at `path`.
    fn read(&self, path: &Path) -> SchemaResult<Value>;
}

/// Reads YAML documents from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileSource;

impl DocumentSource for YamlFileSource {
    fn read(&self, path: &Path) -> SchemaResult<Value> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SchemaError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SchemaError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|e| SchemaError::Syntax {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(from_yaml(yaml))
    }
}

// ============================================================================
// Provenance
// ============================================================================

/// How a recorded key path came from its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    /// The root schema file.
    Root,
    /// A top-level key of a file merged with `+include`.
    Member,
    /// A whole value replaced with `+include:<file>`.
    Value,
}

/// The file a key path was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub file: PathBuf,
    pub kind: OriginKind,
}

/// Maps dotted key paths to the file that declared them.
///
/// Only consulted while loading: to name the file in undefined-variable
/// errors and to scope `this.` lookups.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    entries: BTreeMap<String, Origin>,
}

impl Provenance {
    fn record(&mut self, path: &str, file: &Path, kind: OriginKind) {
        trace!(path, file = %file.display(), ?kind, "recording provenance");
        self.entries.insert(
            path.to_string(),
            Origin {
                file: file.to_path_buf(),
                kind,
            },
        );
    }

    /// The recorded origin for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Origin> {
        self.entries.get(path)
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The longest recorded path that is `path` or one of its ancestors.
    pub fn owner_of(&self, path: &str) -> Option<(&str, &Origin)> {
        let mut candidate = path;
        loop {
            if let Some((key, origin)) = self.entries.get_key_value(candidate) {
                return Some((key.as_str(), origin));
            }
            if candidate.is_empty() {
                return None;
            }
            candidate = candidate.rfind('.').map_or("", |i| &candidate[..i]);
        }
    }

    /// The file that owns `path`.
    pub fn file_of(&self, path: &str) -> Option<&Path> {
        self.owner_of(path).map(|(_, origin)| origin.file.as_path())
    }

    /// Translate a `this.`-relative key into a root key path.
    ///
    /// `container` is the path of the mapping or list holding the marker.
    /// Returns `None` when the file's document has no such key.
    fn local_path(&self, root: &Value, container: &str, key: &str) -> Option<String> {
        let Some((owner_path, origin)) = self.owner_of(container) else {
            return has_key(root, key).then(|| key.to_string());
        };

        match origin.kind {
            OriginKind::Root => has_key(root, key).then(|| key.to_string()),
            OriginKind::Value => {
                let path = join_path(owner_path, key);
                has_key(root, &path).then_some(path)
            }
            OriginKind::Member => {
                let (head, rest) = key.split_once('.').unwrap_or((key, ""));
                self.entries
                    .iter()
                    .filter(|(_, o)| o.file == origin.file && o.kind == OriginKind::Member)
                    .filter(|(p, _)| last_segment(p) == head)
                    .map(|(p, _)| join_path(p, rest))
                    .find(|path| has_key(root, path))
            }
        }
    }
}

fn has_key(root: &Value, path: &str) -> bool {
    !path.is_empty() && get_path(root, path).is_some()
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

// ============================================================================
// Loader
// ============================================================================

/// Loads a schema document and resolves its directives and variables.
#[derive(Debug, Clone, Default)]
pub struct Loader<S = YamlFileSource> {
    source: S,
}

impl Loader<YamlFileSource> {
    /// Create a loader reading YAML files from disk.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DocumentSource> Loader<S> {
    /// Create a loader over a custom document source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Load and fully resolve the schema rooted at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> SchemaResult<Document> {
        self.load_with_provenance(path).map(|(document, _)| document)
    }

    /// Like [`Loader::load`], also returning the provenance map.
    pub fn load_with_provenance(
        &self,
        path: impl AsRef<Path>,
    ) -> SchemaResult<(Document, Provenance)> {
        let file = reference_path(Path::new(""), &path.as_ref().to_string_lossy());
        debug!(file = %file.display(), "loading schema");

        let mut includes = IncludeResolver {
            source: &self.source,
            provenance: Provenance::default(),
            stack: Vec::new(),
        };
        includes.provenance.record("", &file, OriginKind::Root);

        let value = includes.load_file(&file, "")?;
        let Value::Object(mut document) = value else {
            return Err(SchemaError::Syntax {
                path: file,
                message: "document root must be a mapping".to_string(),
            });
        };
        let provenance = includes.provenance;

        resolve_extends(&mut document)?;
        resolve_variables(&mut document, &provenance)?;

        debug!(
            file = %file.display(),
            keys = document.len(),
            included_paths = provenance.len(),
            "schema loaded"
        );
        Ok((document, provenance))
    }
}

/// Load a YAML schema from disk.
pub fn load(path: impl AsRef<Path>) -> SchemaResult<Document> {
    Loader::new().load(path)
}

/// Resolve a file reference relative to `base_dir`, appending `.yml` when
/// the reference carries no YAML extension.
pub fn reference_path(base_dir: &Path, reference: &str) -> PathBuf {
    let mut file = base_dir.join(reference.trim());
    let has_extension = file
        .extension()
        .is_some_and(|ext| ext == "yml" || ext == "yaml");
    if !has_extension {
        let mut name = file.as_os_str().to_os_string();
        name.push(".");
        name.push(DEFAULT_EXTENSION);
        file = PathBuf::from(name);
    }
    normalize(&file)
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ============================================================================
// Include pass
// ============================================================================

struct IncludeResolver<'a, S> {
    source: &'a S,
    provenance: Provenance,
    stack: Vec<PathBuf>,
}

impl<S: DocumentSource> IncludeResolver<'_, S> {
    fn load_file(&mut self, file: &Path, path: &str) -> SchemaResult<Value> {
        if self.stack.iter().any(|f| f == file) {
            let mut chain = self.stack.clone();
            chain.push(file.to_path_buf());
            return Err(SchemaError::IncludeCycle { chain });
        }

        debug!(file = %file.display(), path, "reading schema file");
        let mut value = self.source.read(file)?;
        let base_dir = file.parent().map(Path::to_path_buf).unwrap_or_default();

        self.stack.push(file.to_path_buf());
        let result = self.resolve(&mut value, &base_dir, path);
        self.stack.pop();
        result?;

        Ok(value)
    }

    fn resolve(&mut self, value: &mut Value, base_dir: &Path, path: &str) -> SchemaResult<()> {
        match value {
            Value::Object(map) => self.resolve_map(map, base_dir, path),
            Value::Array(items) => items.iter_mut().enumerate().try_for_each(|(i, item)| {
                self.resolve(item, base_dir, &join_path(path, &i.to_string()))
            }),
            _ => Ok(()),
        }
    }

    fn resolve_map(&mut self, map: &mut Document, base_dir: &Path, path: &str) -> SchemaResult<()> {
        let directive = take_key(map, INCLUDE_KEY);

        for (key, value) in map.iter_mut() {
            let key_path = join_path(path, key);
            let reference = value
                .as_str()
                .and_then(|s| s.strip_prefix(INCLUDE_PREFIX))
                .map(str::to_string);

            match reference {
                Some(reference) => {
                    let file = reference_path(base_dir, &reference);
                    *value = self.load_file(&file, &key_path)?;
                    self.provenance.record(&key_path, &file, OriginKind::Value);
                }
                None => self.resolve(value, base_dir, &key_path)?,
            }
        }

        let Some(directive) = directive else {
            return Ok(());
        };
        let references = string_list(&directive).ok_or_else(|| {
            SchemaError::validation(format!(
                "'{}' must be a file name or a list of file names",
                join_path(path, INCLUDE_KEY)
            ))
        })?;

        for reference in references {
            let file = reference_path(base_dir, &reference);
            let Value::Object(included) = self.load_file(&file, path)? else {
                return Err(SchemaError::Syntax {
                    path: file,
                    message: "included document must be a mapping".to_string(),
                });
            };

            for key in included.keys() {
                self.provenance
                    .record(&join_path(path, key), &file, OriginKind::Member);
            }
            merge_defaults(map, &included);
            debug!(file = %file.display(), path, "merged include");
        }

        Ok(())
    }
}

// ============================================================================
// Extends pass
// ============================================================================

/// Resolve every `+extends` directive in `document`.
///
/// Targets are looked up in the document as it stands before this pass and
/// are themselves extends-resolved before being merged.
pub fn resolve_extends(document: &mut Document) -> SchemaResult<()> {
    let snapshot = Value::Object(document.clone());
    let mut resolver = ExtendsResolver {
        snapshot: &snapshot,
        resolved: HashMap::new(),
        resolving: Vec::new(),
    };
    resolver.resolve_map(document)
}

struct ExtendsResolver<'a> {
    snapshot: &'a Value,
    resolved: HashMap<String, Document>,
    resolving: Vec<String>,
}

impl ExtendsResolver<'_> {
    fn resolve_map(&mut self, map: &mut Document) -> SchemaResult<()> {
        for value in map.values_mut() {
            self.resolve_value(value)?;
        }

        let Some(directive) = take_key(map, EXTENDS_KEY) else {
            return Ok(());
        };
        let targets = string_list(&directive).ok_or_else(|| {
            SchemaError::validation(format!(
                "'{EXTENDS_KEY}' must be a key path or a list of key paths"
            ))
        })?;

        for target in targets {
            let defaults = self.target(&target)?;
            merge_defaults(map, &defaults);
            debug!(target, "merged extends");
        }
        Ok(())
    }

    fn resolve_value(&mut self, value: &mut Value) -> SchemaResult<()> {
        match value {
            Value::Object(map) => self.resolve_map(map),
            Value::Array(items) => items.iter_mut().try_for_each(|item| self.resolve_value(item)),
            _ => Ok(()),
        }
    }

    fn target(&mut self, target: &str) -> SchemaResult<Document> {
        if let Some(done) = self.resolved.get(target) {
            return Ok(done.clone());
        }
        if self.resolving.iter().any(|t| t == target) {
            let mut chain = self.resolving.clone();
            chain.push(target.to_string());
            return Err(SchemaError::ExtendsCycle { chain });
        }

        let value = get_path(self.snapshot, target)
            .filter(|_| !target.is_empty())
            .ok_or_else(|| SchemaError::UndefinedExtendsTarget {
                target: target.to_string(),
            })?;
        let Value::Object(map) = value else {
            return Err(SchemaError::NonObjectExtendsTarget {
                target: target.to_string(),
            });
        };

        let mut map = map.clone();
        self.resolving.push(target.to_string());
        let result = self.resolve_map(&mut map);
        self.resolving.pop();
        result?;

        self.resolved.insert(target.to_string(), map.clone());
        Ok(map)
    }
}

// ============================================================================
// Variable pass
// ============================================================================

/// Substitute every `${...}` marker in `document`.
///
/// Referenced values are resolved before they are substituted, so markers
/// may point at values that contain markers themselves.
pub fn resolve_variables(document: &mut Document, provenance: &Provenance) -> SchemaResult<()> {
    let mut resolver = VariableResolver {
        root: Value::Object(std::mem::take(document)),
        provenance,
        done: HashSet::new(),
        resolving: Vec::new(),
    };
    let result = resolver.resolve_path("");
    if let Value::Object(map) = resolver.root {
        *document = map;
    }
    result
}

struct VariableResolver<'a> {
    root: Value,
    provenance: &'a Provenance,
    done: HashSet<String>,
    resolving: Vec<String>,
}

impl VariableResolver<'_> {
    fn resolve_path(&mut self, path: &str) -> SchemaResult<()> {
        if self.done.contains(path) {
            return Ok(());
        }
        if self.resolving.iter().any(|p| p == path) {
            let mut chain = self.resolving.clone();
            chain.push(path.to_string());
            return Err(SchemaError::VariableCycle { chain });
        }

        let children: Vec<String> = match get_path(&self.root, path) {
            Some(Value::Object(map)) => map.keys().map(|k| join_path(path, k)).collect(),
            Some(Value::Array(items)) => (0..items.len())
                .map(|i| join_path(path, &i.to_string()))
                .collect(),
            Some(Value::String(text)) if VARIABLE.is_match(text) => {
                let text = text.clone();
                self.resolving.push(path.to_string());
                let result = self.substitute(path, &text);
                self.resolving.pop();
                let substituted = result?;
                if let Some(slot) = get_path_mut(&mut self.root, path) {
                    *slot = substituted;
                }
                Vec::new()
            }
            _ => Vec::new(),
        };

        if !children.is_empty() {
            self.resolving.push(path.to_string());
            let result = children.iter().try_for_each(|child| self.resolve_path(child));
            self.resolving.pop();
            result?;
        }

        self.done.insert(path.to_string());
        Ok(())
    }

    fn substitute(&mut self, path: &str, text: &str) -> SchemaResult<Value> {
        let container = path.rfind('.').map_or("", |i| &path[..i]);
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for captures in VARIABLE.captures_iter(text) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(2)) else {
                continue;
            };
            let key = key.as_str();
            let is_local = captures.get(1).is_some();

            let target = if is_local {
                self.provenance.local_path(&self.root, container, key)
            } else {
                has_key(&self.root, key).then(|| key.to_string())
            };
            let Some(target) = target else {
                return Err(SchemaError::UndefinedVariable {
                    key: key.to_string(),
                    file: if is_local {
                        self.provenance.file_of(container).map(Path::to_path_buf)
                    } else {
                        None
                    },
                });
            };

            self.resolve_path(&target)?;
            let value = get_path(&self.root, &target).cloned().unwrap_or(Value::Null);
            trace!(path, variable = key, target, "substituting variable");

            if !is_scalar(&value) {
                return Ok(value);
            }
            output.push_str(&text[last..whole.start()]);
            output.push_str(&scalar_to_string(&value));
            last = whole.end();
        }

        output.push_str(&text[last..]);
        Ok(Value::String(output))
    }
}
