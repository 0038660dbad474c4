//! Labelled code containers.
//!
//! A [`CodeBlock`] is an ordered list of fragments. Fragments may carry a
//! label so later steps can insert around them or rewrite them in place.
//! Each fragment is reflowed on its own when rendered.

use crate::reflow::reflow;

/// One piece of code in a [`CodeBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    label: Option<String>,
    code: String,
}

impl Fragment {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            label: None,
            code: code.into(),
        }
    }

    pub fn labeled(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            code: code.into(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    fn lines(&self) -> Vec<String> {
        if self.code.trim().is_empty() {
            // Blank fragments separate groups
            return vec![String::new(); self.code.matches('\n').count().max(1)];
        }
        reflow(&self.code)
    }
}

impl From<&str> for Fragment {
    fn from(code: &str) -> Self {
        Fragment::new(code)
    }
}

impl From<String> for Fragment {
    fn from(code: String) -> Self {
        Fragment::new(code)
    }
}

/// Ordered, labelled list of code fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    fragments: Vec<Fragment>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment at the end.
    pub fn append(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.fragments.push(fragment.into());
        self
    }

    /// Add a fragment at the start.
    pub fn prepend(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.fragments.insert(0, fragment.into());
        self
    }

    /// Add a blank line.
    pub fn nl(&mut self) -> &mut Self {
        self.append(Fragment::new(""))
    }

    /// Insert `fragment` right before the one labelled `label`.
    ///
    /// Returns `false`, leaving the block unchanged, when no fragment has
    /// that label.
    pub fn insert_before(&mut self, label: &str, fragment: impl Into<Fragment>) -> bool {
        match self.position(label) {
            Some(i) => {
                self.fragments.insert(i, fragment.into());
                true
            }
            None => false,
        }
    }

    /// Insert `fragment` right after the one labelled `label`.
    pub fn insert_after(&mut self, label: &str, fragment: impl Into<Fragment>) -> bool {
        match self.position(label) {
            Some(i) => {
                self.fragments.insert(i + 1, fragment.into());
                true
            }
            None => false,
        }
    }

    /// Rewrite the code of the fragment labelled `label`.
    pub fn map(&mut self, label: &str, f: impl FnOnce(&str) -> String) -> bool {
        match self.position(label) {
            Some(i) => {
                let fragment = &mut self.fragments[i];
                fragment.code = f(&fragment.code);
                true
            }
            None => false,
        }
    }

    /// Remove the fragment labelled `label`.
    pub fn remove(&mut self, label: &str) -> bool {
        match self.position(label) {
            Some(i) => {
                self.fragments.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.position(label).map(|i| self.fragments[i].code.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Reflowed lines of every fragment, in order.
    pub fn lines(&self) -> Vec<String> {
        self.fragments.iter().flat_map(Fragment::lines).collect()
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.fragments
            .iter()
            .position(|f| f.label.as_deref() == Some(label))
    }
}
