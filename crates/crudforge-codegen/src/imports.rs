//! Class import registry.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

/// Split `Foo\Bar\Baz` into (`Foo\Bar`, `Baz`), ignoring a leading `\`.
pub fn split_class(class: &str) -> (&str, &str) {
    let class = class.trim_start_matches('\\');
    match class.rsplit_once('\\') {
        Some((namespace, name)) => (namespace, name),
        None => ("", class),
    }
}

/// Whether `ty` names a namespaced class.
pub fn is_qualified(ty: &str) -> bool {
    ty.trim_start_matches('?').trim_start_matches('\\').contains('\\')
}

/// Deduplicated `use` statements, rendered in sorted order.
///
/// Every import has a distinct local name. A class whose short name is
/// already taken, by another import or by a reserved name, is imported
/// under an alias built from its namespace, e.g. `App\Request` becomes
/// `AppRequest`. PHP names are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports {
    entries: BTreeMap<String, Option<String>>,
    reserved: BTreeSet<String>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import `class`, optionally under `alias`. Re-importing keeps an
    /// earlier alias unless a new one is given.
    pub fn add(&mut self, class: &str, alias: Option<&str>) {
        let class = class.trim_start_matches('\\');
        if let Some(alias) = alias {
            self.entries.insert(class.to_string(), Some(alias.to_string()));
            return;
        }
        if self.entries.contains_key(class) {
            return;
        }
        let short = split_class(class).1;
        let alias = (!self.is_free(short)).then(|| self.free_alias(class));
        if let Some(alias) = &alias {
            debug!(class, alias = %alias, "aliasing import with a taken short name");
        }
        self.entries.insert(class.to_string(), alias);
    }

    /// Keep `name` from being used as a local name, e.g. the name of the
    /// class being declared.
    pub fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.to_ascii_lowercase());
    }

    /// Import `ty` when it is qualified and return the name to use for it.
    ///
    /// Unqualified types are returned unchanged; a leading `?` is kept.
    pub fn register(&mut self, ty: &str) -> String {
        let (nullable, bare) = split_nullable(ty);
        if !is_qualified(bare) {
            return ty.to_string();
        }
        self.add(bare, None);
        format!("{nullable}{}", self.local_name(bare))
    }

    /// Name `class` is referred to by once imported.
    pub fn local_name(&self, class: &str) -> String {
        let (nullable, bare) = split_nullable(class);
        let key = bare.trim_start_matches('\\');
        match self.entries.get(key) {
            Some(Some(alias)) => format!("{nullable}{alias}"),
            Some(None) => format!("{nullable}{}", split_class(key).1),
            None if is_qualified(key) => format!("{nullable}\\{key}"),
            None => class.to_string(),
        }
    }

    /// [`Imports::local_name`] applied to each member of a `A|B` doc type.
    pub fn local_type(&self, ty: &str) -> String {
        ty.split('|')
            .map(|member| {
                if is_qualified(member) {
                    self.local_name(member)
                } else {
                    member.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(class.trim_start_matches('\\'))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `use` lines, sorted by class name
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(class, alias)| match alias {
                Some(alias) => format!("use {class} as {alias};"),
                None => format!("use {class};"),
            })
            .collect()
    }

    fn is_free(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        !self.reserved.contains(&lower)
            && !self.entries.iter().any(|(class, alias)| {
                let local = alias.as_deref().unwrap_or_else(|| split_class(class).1);
                local.eq_ignore_ascii_case(name)
            })
    }

    /// `<last namespace segment><short name>`, numbered when that is taken too.
    fn free_alias(&self, class: &str) -> String {
        let (namespace, short) = split_class(class);
        let segment = namespace.rsplit('\\').next().unwrap_or_default();
        let base = format!("{segment}{short}");
        if self.is_free(&base) {
            return base;
        }
        (2usize..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| self.is_free(candidate))
            .unwrap_or(base)
    }
}

fn split_nullable(ty: &str) -> (&str, &str) {
    match ty.strip_prefix('?') {
        Some(bare) => ("?", bare),
        None => ("", ty),
    }
}
