//! Declarative element selectors.
//!
//! A [`Selector`] is an immutable value describing which element(s) a step
//! targets. Selectors are plain data: they can be compared, hashed, logged
//! and serialized, and the same selector is reused for every retry of a
//! wait or scroll search.
//!
//! # Example
//!
//! ```
//! use tapwright_core::selector::Selector;
//!
//! let login = Selector::class("Button").text("Log*");
//! assert_eq!(login.to_string(), "class='Button' text='Log*'");
//!
//! let second_row = Selector::id("device-row").index(1);
//! assert_eq!(second_row.to_string(), "id='device-row' index=1");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{flatten_elements, ElementMatch, MatchSet, UIElement};

/// Which element(s) to find.
///
/// All criteria that are set must hold for an element to match. String
/// criteria accept glob wildcards (`*` and `?`); without wildcards the
/// comparison is exact and case-sensitive. A selector with no criteria
/// matches every element (see [`Selector::any`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Matches either the identifier or the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marked: Option<String>,
    /// Keep only the n-th match (zero-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl Selector {
    /// Matches every element on screen.
    pub fn any() -> Self {
        Self::default()
    }

    /// Elements of the given class.
    pub fn class(class: impl Into<String>) -> Self {
        Self::any().with_class(class)
    }

    /// Elements with the given accessibility identifier.
    pub fn id(id: impl Into<String>) -> Self {
        Self::any().with_id(id)
    }

    /// Elements whose text matches.
    pub fn text_is(text: impl Into<String>) -> Self {
        Self::any().text(text)
    }

    /// Elements whose identifier or text matches.
    pub fn marked(mark: impl Into<String>) -> Self {
        Self {
            marked: Some(mark.into()),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a text criterion.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Narrows the result to the n-th match (zero-based).
    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// True when this selector has no criteria at all.
    pub fn is_any(&self) -> bool {
        *self == Self::any()
    }

    /// Tests a single element against every criterion except `index`.
    pub fn matches(&self, element: &ElementMatch) -> bool {
        if let Some(ref class) = self.class {
            if !glob_match(class, &element.class) {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if !optional_match(id, element.id.as_deref()) {
                return false;
            }
        }
        if let Some(ref text) = self.text {
            if !optional_match(text, element.text.as_deref()) {
                return false;
            }
        }
        if let Some(ref mark) = self.marked {
            if !optional_match(mark, element.id.as_deref())
                && !optional_match(mark, element.text.as_deref())
            {
                return false;
            }
        }
        true
    }

    /// Filters a flat list of elements, preserving order, then applies `index`.
    pub fn filter(&self, elements: Vec<ElementMatch>) -> MatchSet {
        let matching = elements.into_iter().filter(|e| self.matches(e));
        match self.index {
            Some(n) => matching.skip(n).take(1).collect::<Vec<_>>().into(),
            None => matching.collect::<Vec<_>>().into(),
        }
    }

    /// Flattens an element tree and filters it.
    pub fn search(&self, tree: &[UIElement]) -> MatchSet {
        self.filter(flatten_elements(tree))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "*");
        }
        let mut parts = Vec::new();
        if let Some(ref class) = self.class {
            parts.push(format!("class='{}'", class));
        }
        if let Some(ref id) = self.id {
            parts.push(format!("id='{}'", id));
        }
        if let Some(ref text) = self.text {
            parts.push(format!("text='{}'", text));
        }
        if let Some(ref mark) = self.marked {
            parts.push(format!("marked='{}'", mark));
        }
        if let Some(index) = self.index {
            parts.push(format!("index={}", index));
        }
        write!(f, "{}", parts.join(" "))
    }
}

fn optional_match(pattern: &str, value: Option<&str>) -> bool {
    value.map_or(false, |v| glob_match(pattern, v))
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Matches a string against a glob pattern with `*` (any chars) and `?` (single char).
///
/// Without wildcards this is plain ordinal equality.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    if !has_wildcard(pattern) {
        return pattern == text;
    }

    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();

    // Two-row DP: prev[j] = pattern[..i-1] matches text[..j]
    let mut prev = vec![false; txt.len() + 1];
    prev[0] = true;

    for p in &pat {
        let mut cur = vec![false; txt.len() + 1];
        if *p == '*' {
            cur[0] = prev[0];
        }
        for j in 1..=txt.len() {
            cur[j] = match p {
                '*' => prev[j] || cur[j - 1],
                '?' => prev[j - 1],
                c => prev[j - 1] && *c == txt[j - 1],
            };
        }
        prev = cur;
    }

    prev[txt.len()]
}
