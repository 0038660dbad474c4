//! Class and interface emitters.
//!
//! Every type the class mentions (parent, interfaces, traits, method
//! argument and return types) is imported before rendering, so the body
//! only uses short names and the `use` list is complete.

use serde_json::Value;

use crate::docblock::Docblock;
use crate::imports::{Imports, split_class};
use crate::literal::to_php;
use crate::method::{Method, Visibility};
use crate::reflow::indent_lines;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

/// A class property with its `@var` doc comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    ty: String,
    visibility: Visibility,
    is_static: bool,
    initial: Option<Value>,
    description: Option<String>,
}

impl Property {
    pub fn new(name: &str, ty: impl Into<String>) -> Self {
        Self {
            name: name.trim_start_matches('$').to_string(),
            ty: ty.into(),
            visibility: Visibility::Public,
            is_static: false,
            initial: None,
            description: None,
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    fn lines(&self, imports: &Imports) -> Vec<String> {
        let mut docblock = Docblock::new();
        if let Some(description) = &self.description {
            docblock.add_text(description.clone());
        }
        docblock.add_annotation("var", imports.local_type(&self.ty));

        let mut declaration = self.visibility.as_str().to_string();
        if self.is_static {
            declaration.push_str(" static");
        }
        declaration.push_str(" $");
        declaration.push_str(&self.name);
        if let Some(initial) = &self.initial {
            declaration.push_str(" = ");
            declaration.push_str(&to_php(initial, true));
        }
        declaration.push(';');

        let mut lines = docblock.lines();
        lines.extend(declaration.lines().map(str::to_string));
        lines
    }
}

/// Builds one PHP class or interface file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBuilder {
    kind: ClassKind,
    name: String,
    namespace: String,
    imports: Imports,
    is_abstract: bool,
    parent: Option<String>,
    implements: Vec<String>,
    traits: Vec<String>,
    properties: Vec<Property>,
    methods: Vec<Method>,
    docblock: Option<Docblock>,
}

impl ClassBuilder {
    /// Start a class from its qualified name, e.g. `App\Http\Controllers\PostController`.
    pub fn new(class: &str) -> Self {
        Self::with_kind(ClassKind::Class, class)
    }

    /// Start an interface from its qualified name.
    pub fn interface(class: &str) -> Self {
        Self::with_kind(ClassKind::Interface, class)
    }

    fn with_kind(kind: ClassKind, class: &str) -> Self {
        let (namespace, name) = split_class(class);
        let mut imports = Imports::new();
        imports.reserve(name);
        Self {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            imports,
            is_abstract: false,
            parent: None,
            implements: Vec::new(),
            traits: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            docblock: None,
        }
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.name)
        }
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    /// Import `class`. A class whose short name is taken gets an alias;
    /// [`ClassBuilder::local_name`] tells what code should call it.
    pub fn use_class(&mut self, class: &str, alias: Option<&str>) -> &mut Self {
        self.imports.add(class, alias);
        self
    }

    /// Name body code refers to `class` by.
    pub fn local_name(&self, class: &str) -> String {
        self.imports.local_name(class)
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn set_parent(&mut self, class: impl Into<String>) -> &mut Self {
        self.parent = Some(class.into());
        self
    }

    /// Implemented interface; for interfaces, an extended one.
    pub fn add_implement(&mut self, class: impl Into<String>) -> &mut Self {
        self.implements.push(class.into());
        self
    }

    pub fn use_trait(&mut self, class: impl Into<String>) -> &mut Self {
        self.traits.push(class.into());
        self
    }

    /// Add a property; re-adding a name replaces it in place.
    pub fn add_property(&mut self, property: Property) -> &mut Self {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Add a method, replacing any method of the same name at its position.
    pub fn add_method(&mut self, name: &str) -> &mut Method {
        let method = Method::new(name);
        let index = match self.methods.iter().position(|m| m.name() == name) {
            Some(i) => {
                self.methods[i] = method;
                i
            }
            None => {
                self.methods.push(method);
                self.methods.len() - 1
            }
        };
        &mut self.methods[index]
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name() == name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.name() == name)
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The class doc comment, created empty on first access.
    pub fn docblock(&mut self) -> &mut Docblock {
        self.docblock.get_or_insert_with(Docblock::new)
    }

    /// Imports after every referenced type has been registered.
    ///
    /// Types named through [`ClassBuilder::use_class`] keep their local
    /// names; the rest are registered in declaration order.
    pub fn resolved_imports(&self) -> Imports {
        let mut imports = self.imports.clone();
        let own = self.qualified_name();
        let referenced = self
            .parent
            .iter()
            .chain(&self.implements)
            .chain(&self.traits)
            .map(String::as_str)
            .chain(self.properties.iter().map(Property::ty))
            .chain(self.methods.iter().flat_map(Method::types))
            .filter(|ty| ty.trim_start_matches(['?', '\\']) != own);
        for ty in referenced {
            imports.register(ty);
        }
        imports
    }

    pub fn lines(&self) -> Vec<String> {
        let imports = self.resolved_imports();
        let mut lines = vec!["<?php".to_string(), String::new()];

        if !self.namespace.is_empty() {
            lines.push(format!("namespace {};", self.namespace));
            lines.push(String::new());
        }
        if !imports.is_empty() {
            lines.extend(imports.lines());
            lines.push(String::new());
        }
        if let Some(docblock) = &self.docblock {
            lines.extend(docblock.lines());
        }

        lines.push(self.definition(&imports));
        lines.push("{".to_string());

        if self.kind == ClassKind::Class {
            let traits = self
                .traits
                .iter()
                .map(|t| format!("use {};", imports.local_name(t)));
            lines.extend(indent_lines(traits, 1));

            for property in &self.properties {
                lines.push(String::new());
                lines.extend(indent_lines(property.lines(&imports), 1));
            }
        }

        let signature_only = self.kind == ClassKind::Interface;
        for method in &self.methods {
            lines.push(String::new());
            lines.extend(indent_lines(method.render(&imports, signature_only), 1));
        }
        if !self.methods.is_empty() {
            lines.push(String::new());
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }

    /// The file contents, ending with a newline.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    fn definition(&self, imports: &Imports) -> String {
        let implements: Vec<String> = self
            .implements
            .iter()
            .map(|class| imports.local_name(class))
            .collect();

        match self.kind {
            ClassKind::Interface => {
                let mut definition = format!("interface {}", self.name);
                if !implements.is_empty() {
                    definition.push_str(&format!(" extends {}", implements.join(", ")));
                }
                definition
            }
            ClassKind::Class => {
                let mut definition = String::new();
                if self.is_abstract {
                    definition.push_str("abstract ");
                }
                definition.push_str("class ");
                definition.push_str(&self.name);
                if let Some(parent) = &self.parent {
                    definition.push_str(&format!(" extends {}", imports.local_name(parent)));
                }
                if !implements.is_empty() {
                    definition.push_str(&format!(" implements {}", implements.join(", ")));
                }
                definition
            }
        }
    }
}
