//! Doc comment blocks.

use crate::imports::Imports;

/// Default wrap width for description text
pub const DEFAULT_LINE_LENGTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Param {
    name: String,
    ty: String,
    description: Option<String>,
}

/// A `/** ... */` block with wrapped text and aligned annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docblock {
    line_length: usize,
    texts: Vec<String>,
    annotations: Vec<(String, String)>,
    params: Vec<Param>,
    return_type: Option<String>,
}

impl Default for Docblock {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            texts: Vec::new(),
            annotations: Vec::new(),
            params: Vec::new(),
            return_type: None,
        }
    }
}

impl Docblock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_line_length(&mut self, length: usize) -> &mut Self {
        self.line_length = length;
        self
    }

    /// Add a paragraph of description text.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.texts.push(text.into());
        self
    }

    pub fn add_annotation(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.annotations.push((name.into(), value.into()));
        self
    }

    /// Document a parameter; re-adding a name replaces the earlier entry.
    pub fn add_param(
        &mut self,
        name: &str,
        ty: impl Into<String>,
        description: Option<&str>,
    ) -> &mut Self {
        let param = Param {
            name: name.trim_start_matches('$').to_string(),
            ty: ty.into(),
            description: description.map(str::to_string),
        };
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    pub fn set_return(&mut self, ty: impl Into<String>) -> &mut Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Copy with qualified `@param` and `@return` types shortened through
    /// `imports`.
    pub fn localized(&self, imports: &Imports) -> Docblock {
        let mut docblock = self.clone();
        for param in &mut docblock.params {
            param.ty = imports.local_type(&param.ty);
        }
        if let Some(ty) = &mut docblock.return_type {
            *ty = imports.local_type(ty);
        }
        docblock
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["/**".to_string()];

        for text in &self.texts {
            lines.extend(wrap_words(text, self.line_length).into_iter().map(|l| format!(" * {l}")));
        }
        if !self.texts.is_empty() {
            lines.push(" *".to_string());
        }

        let mut annotations: Vec<(&str, String)> = self
            .annotations
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect();
        for param in &self.params {
            let value = match &param.description {
                Some(description) => format!("{} ${} {description}", param.ty, param.name),
                None => format!("{} ${}", param.ty, param.name),
            };
            annotations.push(("param", value.trim().to_string()));
        }
        if let Some(ty) = &self.return_type {
            annotations.push(("return", ty.clone()));
        }

        let width = annotations.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in annotations {
            lines.push(format!(" * @{name:<width$} {value}"));
        }

        lines.push(" */".to_string());
        lines
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}

/// Greedy word wrap; a word longer than `length` gets its own line.
fn wrap_words(text: &str, length: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in text.split(' ') {
        match lines.last_mut() {
            Some(line) if line.len() + 1 + word.len() <= length => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}
