//! Type definitions for CSS inlining

use std::collections::HashMap;

/// One `selector-list { declarations }` block of a stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Trimmed, non-empty selectors in authored order
    pub selectors: Vec<String>,
    /// Trimmed declaration text, e.g. `color: red; margin: 0;`
    pub declarations: String,
}

/// Result of parsing a stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStylesheet {
    /// The whole stylesheet has to be placed in the head unchanged
    pub head_only: bool,
    /// Extracted rules, empty when `head_only` is set
    pub rules: Vec<StyleRule>,
    /// Comment-free, whitespace-collapsed stylesheet text
    pub normalized: String,
}

impl ParsedStylesheet {
    /// Flatten the rules into a selector table, one entry per selector
    #[must_use]
    pub fn to_table(&self) -> InlineStyleTable {
        let mut table = InlineStyleTable::new();
        table.add_rules(&self.rules);
        table
    }
}

/// Ordered selector -> declarations map
///
/// Iterates in insertion order. Re-inserting a selector replaces its
/// declarations but keeps the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyleTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl InlineStyleTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the declarations for `selector`
    pub fn insert(&mut self, selector: impl Into<String>, declarations: impl Into<String>) {
        let selector = selector.into();
        let declarations = declarations.into();

        if let Some(&position) = self.index.get(&selector) {
            self.entries[position].1 = declarations;
        } else {
            self.index.insert(selector.clone(), self.entries.len());
            self.entries.push((selector, declarations));
        }
    }

    /// Insert every selector of `rules`, later rules overriding earlier ones
    pub fn add_rules(&mut self, rules: &[StyleRule]) {
        for rule in rules {
            for selector in &rule.selectors {
                self.insert(selector.clone(), rule.declarations.clone());
            }
        }
    }

    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&str> {
        self.index
            .get(selector)
            .map(|&position| self.entries[position].1.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(selector, declarations)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(selector, declarations)| (selector.as_str(), declarations.as_str()))
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for InlineStyleTable {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut table = InlineStyleTable::new();
        for (selector, declarations) in iter {
            table.insert(selector, declarations);
        }
        table
    }
}
