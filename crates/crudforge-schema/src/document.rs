//! Document tree helpers.
//!
//! A [`Document`] is an order-preserving mapping of string keys to scalars,
//! lists, or nested documents. Raw schema files and the fully resolved schema
//! share this representation; the helpers here address it by dotted key path
//! (`tables.posts.fields`), with numeric segments indexing into lists.

use serde_json::{Map, Value};

/// A recursive, insertion-ordered key/value document.
pub type Document = Map<String, Value>;

/// Look up a dotted key path.
///
/// The empty path addresses `value` itself.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Mutable variant of [`get_path`].
pub fn get_path_mut<'a>(value: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            _ => None,
        })
}

/// Whether a dotted key path exists (a present `null` counts as existing).
pub fn has_path(value: &Value, path: &str) -> bool {
    get_path(value, path).is_some()
}

/// Set `path` to `fill` only when it is absent, creating intermediate mappings.
///
/// Returns `false` when the path already held a value or an intermediate
/// segment is not a mapping.
pub fn fill_path(doc: &mut Document, path: &str, fill: Value) -> bool {
    let mut segments = path.split('.').peekable();
    let mut current = doc;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if current.contains_key(segment) {
                return false;
            }
            current.insert(segment.to_string(), fill);
            return true;
        }

        let next = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(map) = next else {
            return false;
        };
        current = map;
    }

    false
}

/// Deep-merge `defaults` into `target`; keys already in `target` win.
///
/// Where both sides hold a mapping under the same key the merge recurses,
/// so precedence holds at every depth. Keys only present in `defaults` are
/// appended after the existing ones.
pub fn merge_defaults(target: &mut Document, defaults: &Document) {
    for (key, default) in defaults {
        if let Some(existing) = target.get_mut(key) {
            if let (Value::Object(existing), Value::Object(nested)) = (existing, default) {
                merge_defaults(existing, nested);
            }
            continue;
        }
        target.insert(key.clone(), default.clone());
    }
}

/// Remove `key` from `map` while keeping the order of the remaining entries.
pub fn take_key(map: &mut Document, key: &str) -> Option<Value> {
    if !map.contains_key(key) {
        return None;
    }

    let mut taken = None;
    for (k, v) in std::mem::take(map) {
        if k == key {
            taken = Some(v);
        } else {
            map.insert(k, v);
        }
    }
    taken
}

/// Join two key paths, skipping empty parts.
pub fn join_path(base: &str, key: &str) -> String {
    match (base.is_empty(), key.is_empty()) {
        (true, _) => key.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base}.{key}"),
    }
}

/// Whether a value is a scalar (neither list nor mapping).
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Render a scalar the way it reads in source text.
///
/// `null` renders as the empty string; non-scalars render as compact JSON.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Accept either a single string or a list of strings.
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

/// Convert a parsed YAML tree into a document value.
///
/// Mapping keys are stringified so integer- or bool-keyed YAML maps survive.
/// Tagged values keep their inner value.
pub fn from_yaml(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), from_yaml(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => scalar_to_string(&from_yaml(other)),
    }
}
