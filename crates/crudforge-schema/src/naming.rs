//! Naming convention utilities.
//!
//! Table and column names are declared in `snake_case`; generated code needs
//! class names, variable names, labels and URL segments derived from them.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `blog_post` | [`to_pascal_case`] | `BlogPost` |
//! | `blog_post` | [`to_camel_case`] | `blogPost` |
//! | `blog_post` | [`to_kebab_case`] | `blog-post` |
//! | `blog_post` | [`humanize`] | `Blog Post` |
//! | `category` | [`pluralize`] | `categories` |
//! | `categories` | [`singularize`] | `category` |

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};

/// Irregular singular/plural pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("mouse", "mice"),
];

/// Words with the same singular and plural form.
const UNCOUNTABLE: &[&str] = &["data", "equipment", "information", "media", "news", "series", "species"];

/// Convert a name to `PascalCase`.
pub fn to_pascal_case(s: &str) -> String {
    s.to_pascal_case()
}

/// Convert a name to `camelCase`.
pub fn to_camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Convert a name to `snake_case`.
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Convert a name to `kebab-case`.
pub fn to_kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// Convert a name to space-separated title words (`blog_post` -> `Blog Post`).
pub fn humanize(s: &str) -> String {
    s.to_title_case()
}

/// Split off the last word so suffix rules only touch it.
fn split_last_word(word: &str) -> (&str, &str) {
    match word.rfind(['_', '-']) {
        Some(i) => word.split_at(i + 1),
        None => ("", word),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Pluralize the last word of a name with simple English heuristics.
pub fn pluralize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{head}{plural}");
    }

    let plural = if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{last}es")
    } else if lower.ends_with('y') && !lower[..lower.len() - 1].ends_with(is_vowel) {
        format!("{}ies", &last[..last.len() - 1])
    } else {
        format!("{last}s")
    };
    format!("{head}{plural}")
}

/// Singularize the last word of a name with simple English heuristics.
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return format!("{head}{singular}");
    }

    if lower.ends_with("ies") && lower.len() > 3 {
        return format!("{head}{}y", &last[..last.len() - 3]);
    }

    let stem_len = if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        last.len() - 2
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        last.len()
    } else if lower.ends_with('s') && lower.len() > 1 {
        last.len() - 1
    } else {
        last.len()
    };
    format!("{head}{}", &last[..stem_len])
}
