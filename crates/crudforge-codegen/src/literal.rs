//! PHP literal serialization.
//!
//! Values are `serde_json::Value` trees. A string wrapped as `eval("...")`
//! is raw code: its content is emitted verbatim instead of as a string
//! literal, which lets resolved schema data carry expressions.

use serde_json::{Map, Value};

use crate::reflow::INDENT;

const RAW_PREFIX: &str = "eval(\"";
const RAW_SUFFIX: &str = "\")";

/// Wrap `code` so [`to_php`] emits it unquoted.
pub fn raw(code: impl AsRef<str>) -> Value {
    Value::String(format!("{RAW_PREFIX}{}{RAW_SUFFIX}", code.as_ref()))
}

/// The code inside a raw-code marker, if `text` is one.
pub fn raw_code(text: &str) -> Option<&str> {
    text.strip_prefix(RAW_PREFIX)?.strip_suffix(RAW_SUFFIX)
}

/// Single-quoted PHP string literal.
///
/// A backslash is only doubled where PHP would otherwise read it as an
/// escape, so namespaces stay readable.
pub fn php_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\\' | '\'')) => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render `value` as a PHP literal.
///
/// Mappings whose keys are exactly `0..n` render as lists. With `pretty`,
/// every container entry goes on its own line, indented one level per depth.
pub fn to_php(value: &Value, pretty: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, pretty, 0);
    out
}

fn write_value(out: &mut String, value: &Value, pretty: bool, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => match raw_code(s) {
            Some(code) => out.push_str(code),
            None => out.push_str(&php_string(s)),
        },
        Value::Array(items) => {
            let entries = items.iter().map(|item| (None, item));
            write_container(out, entries, items.len(), pretty, depth);
        }
        Value::Object(map) if is_list(map) => {
            let entries = map.values().map(|item| (None, item));
            write_container(out, entries, map.len(), pretty, depth);
        }
        Value::Object(map) => {
            let entries = map.iter().map(|(key, item)| (Some(key.as_str()), item));
            write_container(out, entries, map.len(), pretty, depth);
        }
    }
}

fn write_container<'a>(
    out: &mut String,
    entries: impl Iterator<Item = (Option<&'a str>, &'a Value)>,
    len: usize,
    pretty: bool,
    depth: usize,
) {
    if len == 0 {
        out.push_str("[]");
        return;
    }

    out.push('[');
    for (i, (key, item)) in entries.enumerate() {
        if pretty {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
        }
        if let Some(key) = key {
            out.push_str(&php_key(key));
            out.push_str(" => ");
        }
        write_value(out, item, pretty, depth + 1);
        if i + 1 < len {
            out.push(',');
            if !pretty {
                out.push(' ');
            }
        }
    }
    if pretty {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }
    out.push(']');
}

/// Integer keys stay unquoted so PHP sees the same key type.
fn php_key(key: &str) -> String {
    if is_integer_key(key) {
        key.to_string()
    } else {
        php_string(key)
    }
}

fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && key != "-0"
}

/// Whether a mapping's keys are the contiguous sequence `0, 1, .., n-1`.
fn is_list(map: &Map<String, Value>) -> bool {
    map.keys()
        .enumerate()
        .all(|(i, key)| *key == i.to_string())
}

#[cfg(test)]
#[path = "literal/literal_tests.rs"]
mod literal_tests;
