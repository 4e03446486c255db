//! Shared UI element types for accessibility-based automation.
//!
//! This module defines the data structures the query executor hands back:
//! the raw [`UIElement`] tree, the flattened [`ElementMatch`] produced for
//! one query, and the [`MatchSet`] that groups the matches of a single query.
//! These types are independent of any specific executor backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The bounding rectangle of a UI element.
///
/// Coordinates are in screen units, with the origin at the top-left
/// corner of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// The x-coordinate of the element's top-left corner.
    pub x: f64,
    /// The y-coordinate of the element's top-left corner.
    pub y: f64,
    /// The width of the element.
    pub width: f64,
    /// The height of the element.
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the rectangle.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Represents a UI element from the accessibility hierarchy.
///
/// Executors that can dump their whole screen return a forest of these;
/// elements nest via the `children` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UIElement {
    /// The element class (e.g., "Button", "EditText", "TextView").
    #[serde(default)]
    pub class: String,

    /// The unique accessibility identifier for this element.
    #[serde(default)]
    pub id: Option<String>,

    /// The user-visible text of the element.
    #[serde(default)]
    pub text: Option<String>,

    /// Free-form description reported by the platform.
    #[serde(default)]
    pub description: Option<String>,

    /// The element's bounding rectangle in screen coordinates.
    #[serde(default)]
    pub rect: Rect,

    /// Child elements nested within this element.
    #[serde(default)]
    pub children: Vec<UIElement>,
}

impl UIElement {
    /// Creates a leaf element of the given class and bounds.
    pub fn new(class: impl Into<String>, rect: Rect) -> Self {
        Self {
            class: class.into(),
            rect,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<UIElement>) -> Self {
        self.children = children;
        self
    }

    /// Detaches this node from its children.
    pub fn to_match(&self) -> ElementMatch {
        ElementMatch {
            class: self.class.clone(),
            id: self.id.clone(),
            text: self.text.clone(),
            description: self.description.clone(),
            rect: self.rect,
        }
    }
}

/// Flattens an element hierarchy in depth-first, pre-order.
pub fn flatten_elements(elements: &[UIElement]) -> Vec<ElementMatch> {
    let mut result = Vec::new();
    collect_elements(elements, &mut result);
    result
}

fn collect_elements(elements: &[UIElement], result: &mut Vec<ElementMatch>) {
    for element in elements {
        result.push(element.to_match());
        collect_elements(&element.children, result);
    }
}

/// One resolved UI element.
///
/// Produced fresh by every query. Never cache these across queries: the
/// screen may have changed underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMatch {
    pub class: String,
    pub id: Option<String>,
    pub text: Option<String>,
    pub description: Option<String>,
    pub rect: Rect,
}

/// The ordered elements returned by one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet(Vec<ElementMatch>);

impl MatchSet {
    pub fn new(elements: Vec<ElementMatch>) -> Self {
        Self(elements)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&ElementMatch> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&ElementMatch> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementMatch> {
        self.0.iter()
    }

    /// Unwraps into the matches in document order.
    pub fn into_vec(self) -> Vec<ElementMatch> {
        self.0
    }
}

impl From<Vec<ElementMatch>> for MatchSet {
    fn from(elements: Vec<ElementMatch>) -> Self {
        Self(elements)
    }
}

impl IntoIterator for MatchSet {
    type Item = ElementMatch;
    type IntoIter = std::vec::IntoIter<ElementMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Multi-line dump of every match, for failure logs and interactive
/// debugging of selectors.
impl fmt::Display for MatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.0.iter().enumerate() {
            writeln!(f, "{{")?;
            writeln!(f, "    Index         - {}", index)?;
            writeln!(f, "    Class         - {}", element.class)?;
            writeln!(
                f,
                "    Description   - {}",
                element.description.as_deref().unwrap_or("")
            )?;
            if let Some(ref text) = element.text {
                writeln!(f, "    Text          - {}", text)?;
            }
            writeln!(f, "    ID            - {}", element.id.as_deref().unwrap_or(""))?;
            writeln!(
                f,
                "    Rect          - {} x {}, {} x {}",
                element.rect.x, element.rect.y, element.rect.width, element.rect.height
            )?;
            writeln!(f, "}}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
