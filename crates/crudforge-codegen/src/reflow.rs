//! Line reflow.
//!
//! Re-indents loosely indented code in one left-to-right pass. Statement
//! lines nest on trailing `{`, `[` and `(` and unnest on leading `}`, `]`
//! and `)`. A `->` line sits one level deeper than its statement, and a
//! block it opens nests below it. Markup lines (starting with `<` and
//! ending with `>`) nest on unclosed start tags of non-void elements and
//! unnest on a line that starts with (or, without reopening it, ends with)
//! the end tag of the innermost open one. Unbalanced input
//! is misindented, never rejected.

use std::sync::LazyLock;

use regex::Regex;

/// One indentation level
pub const INDENT: &str = "    ";

/// Elements that never take an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

#[allow(clippy::expect_used)] // Safe: constant pattern
static START_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z_-]+)").expect("valid start tag pattern"));

/// Re-indent `code`, returning its lines.
///
/// Surrounding blank lines are dropped; inner blank lines stay empty.
pub fn reflow(code: &str) -> Vec<String> {
    let mut depth = 0usize;
    let mut tags: Vec<String> = Vec::new();
    // (level the opener was printed at, depth to resume after the close)
    let mut blocks: Vec<(usize, usize)> = Vec::new();
    let mut lines = Vec::new();

    for line in code.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }

        if is_markup(line) {
            if let Some(open) = tags.last() {
                if closes(line, open) {
                    tags.pop();
                    depth = depth.saturating_sub(1);
                }
            }

            lines.push(indented(line, depth));

            if let Some(tag) = opened_tag(line) {
                tags.push(tag.to_string());
                depth += 1;
            }
        } else {
            let level = if line.starts_with(['}', ']', ')']) {
                match blocks.pop() {
                    Some((opener, outer)) => {
                        depth = outer;
                        opener
                    }
                    None => {
                        depth = depth.saturating_sub(1);
                        depth
                    }
                }
            } else if line.starts_with("->") {
                depth + 1
            } else {
                depth
            };
            lines.push(indented(line, level));

            if line.ends_with(['{', '[', '(']) {
                blocks.push((level, depth));
                depth = level + 1;
            }
        }
    }

    lines
}

/// Re-indent `code` and join the lines back together.
pub fn reflow_code(code: &str) -> String {
    reflow(code).join("\n")
}

/// Indent every non-empty line by `depth` levels.
pub fn indent_lines(lines: impl IntoIterator<Item = String>, depth: usize) -> Vec<String> {
    let prefix = INDENT.repeat(depth);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

fn indented(line: &str, depth: usize) -> String {
    format!("{}{line}", INDENT.repeat(depth))
}

fn is_markup(line: &str) -> bool {
    line.starts_with('<') && line.ends_with('>')
}

/// Whether a markup line closes the innermost open element `open`: it
/// starts with its end tag, or ends with it without opening another one.
fn closes(line: &str, open: &str) -> bool {
    let end = format!("</{open}>");
    line.starts_with(&end) || (line.ends_with(&end) && !line.starts_with(&format!("<{open}")))
}

/// Tag a markup line leaves open, if any.
fn opened_tag(line: &str) -> Option<&str> {
    let tag = START_TAG.captures(line)?.get(1)?.as_str();
    let closed_inline = line.ends_with(&format!("</{tag}>")) || line.ends_with("/>");
    let is_void = VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str());
    (!closed_inline && !is_void).then_some(tag)
}
