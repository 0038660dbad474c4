//! Placeholder stubs.
//!
//! A stub is a text blob with `{? dotted.key ?}` markers. Rendering looks
//! each key up in a JSON context and splices the value in. When a marker is
//! the first thing on its line, every line of a multi-line value is given
//! the marker's indentation. Markers with no value in the context are left
//! as they are.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tracing::trace;

use crate::literal::to_php;

#[allow(clippy::expect_used)] // Safe: constant pattern
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\? ([A-Za-z0-9_.-]+) \?\}").expect("valid stub marker pattern")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Stub {
    content: String,
    data: Value,
}

impl Stub {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            data: Value::Object(Map::new()),
        }
    }

    pub fn with_data(content: impl Into<String>, data: Value) -> Self {
        Self {
            content: content.into(),
            data,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Set a dotted key, creating intermediate objects as needed.
    pub fn set(&mut self, key: &str, value: Value) -> &mut Self {
        let mut node = &mut self.data;
        let mut segments = key.split('.').peekable();
        while let Some(segment) = segments.next() {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Some(map) = node.as_object_mut() else {
                break;
            };
            if segments.peek().is_none() {
                map.insert(segment.to_string(), value);
                break;
            }
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.data, key)
    }

    /// Every distinct key referenced by a marker, in order of appearance.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for caps in MARKER.captures_iter(&self.content) {
            let key = caps[1].to_string();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    pub fn render(&self) -> String {
        render_stub(&self.content, &self.data)
    }

    /// Render with `extra` merged over the stub's own data at the top level.
    pub fn render_with(&self, extra: &Value) -> String {
        let mut data = self.data.clone();
        if let (Value::Object(base), Value::Object(extra)) = (&mut data, extra) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        render_stub(&self.content, &data)
    }
}

/// Replace every `{? key ?}` marker in `content` found in `data`.
pub fn render_stub(content: &str, data: &Value) -> String {
    MARKER
        .replace_all(content, |caps: &Captures<'_>| {
            let marker = &caps[0];
            let key = &caps[1];
            let Some(value) = lookup(data, key) else {
                trace!(key, "stub key not in context");
                return marker.to_string();
            };
            let text = stringify(value);
            let start = caps.get(0).map_or(0, |m| m.start());
            let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
            let prefix = &content[line_start..start];
            if prefix.chars().all(|c| c == ' ' || c == '\t') {
                let separator = format!("\n{prefix}");
                text.split('\n')
                    .map(|line| line.strip_suffix('\r').unwrap_or(line))
                    .collect::<Vec<_>>()
                    .join(&separator)
            } else {
                text
            }
        })
        .into_owned()
}

/// A literal key wins over a dotted path.
fn lookup<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(key) {
        return Some(value);
    }
    key.split('.').try_fold(data, |node, segment| node.get(segment))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => to_php(value, true),
    }
}
