//! Method emitter.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::container::CodeBlock;
use crate::docblock::Docblock;
use crate::error::{CodegenError, CodegenResult};
use crate::imports::Imports;
use crate::literal::to_php;
use crate::reflow::indent_lines;

/// Signatures longer than this put one argument per line
pub const MAX_SIGNATURE_WIDTH: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "protected" => Ok(Visibility::Protected),
            "private" => Ok(Visibility::Private),
            other => Err(CodegenError::InvalidVisibility(other.to_string())),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One method argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<Value>,
}

impl Argument {
    fn render(&self, imports: &Imports) -> String {
        let mut arg = match &self.ty {
            Some(ty) => format!("{} ${}", imports.local_name(ty), self.name),
            None => format!("${}", self.name),
        };
        if let Some(default) = &self.default {
            arg.push_str(" = ");
            arg.push_str(&to_php(default, false));
        }
        arg
    }
}

/// A method with its signature, doc comment and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    arguments: Vec<Argument>,
    return_type: Option<String>,
    docblock: Option<Docblock>,
    body: CodeBlock,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_abstract: false,
            arguments: Vec::new(),
            return_type: None,
            docblock: None,
            body: CodeBlock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.visibility = visibility;
        self
    }

    /// Set visibility by name, rejecting anything but the three PHP keywords.
    pub fn set_visibility_str(&mut self, visibility: &str) -> CodegenResult<&mut Self> {
        self.visibility = visibility.parse()?;
        Ok(self)
    }

    pub fn set_static(&mut self, is_static: bool) -> &mut Self {
        self.is_static = is_static;
        self
    }

    pub fn set_final(&mut self, is_final: bool) -> &mut Self {
        self.is_final = is_final;
        self
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Add an argument; a leading `$` on the name is dropped. Re-adding a
    /// name replaces the earlier argument in place.
    pub fn add_argument(&mut self, name: &str, ty: Option<&str>, default: Option<Value>) -> &mut Self {
        let argument = Argument {
            name: name.trim_start_matches('$').to_string(),
            ty: ty.map(str::to_string),
            default,
        };
        match self.arguments.iter_mut().find(|a| a.name == argument.name) {
            Some(existing) => *existing = argument,
            None => self.arguments.push(argument),
        }
        self
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn set_return_type(&mut self, ty: impl Into<String>) -> &mut Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// The doc comment, created empty on first access.
    pub fn docblock(&mut self) -> &mut Docblock {
        self.docblock.get_or_insert_with(Docblock::new)
    }

    pub fn has_docblock(&self) -> bool {
        self.docblock.is_some()
    }

    pub fn body(&mut self) -> &mut CodeBlock {
        &mut self.body
    }

    pub fn code(&self) -> &CodeBlock {
        &self.body
    }

    /// Argument and return types, for import collection.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter_map(|a| a.ty.as_deref())
            .chain(self.return_type.as_deref())
    }

    /// Lines of this method on its own, with qualified types written out.
    pub fn lines(&self) -> Vec<String> {
        self.render(&Imports::new(), false)
    }

    pub fn render_code(&self) -> String {
        self.lines().join("\n")
    }

    /// Render with types shortened through `imports`. `signature_only`
    /// drops the body, as interfaces need.
    ///
    /// A doc comment without an explicit `@return` documents the declared
    /// return type, or `void` when the method declares none.
    pub(crate) fn render(&self, imports: &Imports, signature_only: bool) -> Vec<String> {
        let mut lines = Vec::new();
        let return_type = self.return_type.as_deref().map(|ty| imports.local_name(ty));

        if let Some(docblock) = &self.docblock {
            let mut docblock = docblock.localized(imports);
            if docblock.return_type().is_none() {
                docblock.set_return(return_type.as_deref().unwrap_or("void"));
            }
            lines.extend(docblock.lines());
        }

        let definition = [
            self.is_abstract.then_some("abstract"),
            self.is_final.then_some("final"),
            Some(self.visibility.as_str()),
            self.is_static.then_some("static"),
            Some("function"),
            Some(self.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        let arguments: Vec<String> = self.arguments.iter().map(|a| a.render(imports)).collect();
        let returns = return_type.map(|ty| format!(": {ty}")).unwrap_or_default();
        let bodyless = signature_only || self.is_abstract;
        let single = format!("{definition}({}){returns}", arguments.join(", "));

        if single.len() > MAX_SIGNATURE_WIDTH {
            lines.push(format!("{definition}("));
            let last = arguments.len().saturating_sub(1);
            let args = arguments.into_iter().enumerate().map(|(i, arg)| {
                if i < last { format!("{arg},") } else { arg }
            });
            lines.extend(indent_lines(args, 1));
            if bodyless {
                lines.push(format!("){returns};"));
                return lines;
            }
            lines.push(format!("){returns} {{"));
        } else {
            if bodyless {
                lines.push(format!("{single};"));
                return lines;
            }
            lines.push(single);
            lines.push("{".to_string());
        }

        lines.extend(indent_lines(self.body.lines(), 1));
        lines.push("}".to_string());
        lines
    }
}

#[cfg(test)]
#[path = "method/method_tests.rs"]
mod method_tests;
