// Append-only record of the property chain resolved so far

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segment standing for "any immediate child" in override keys.
pub const WILDCARD: &str = "*";

/// The variable and properties of the expression currently being validated.
///
/// A path is created empty, receives its variable exactly once and then only
/// grows. It is owned by a single resolver; nothing here is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionPath {
    variable: Option<String>,
    properties: Vec<String>,
}

impl ExpressionPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable has already been set. Each expression gets a
    /// fresh path, so a second call is a bug in the driver.
    pub fn set_variable(&mut self, name: &str) {
        assert!(
            self.variable.is_none(),
            "variable of expression path '{self}' already set, cannot set it to '{name}'"
        );
        self.variable = Some(name.to_string());
    }

    /// Append a property or index segment.
    ///
    /// Bracketed access is normalized so that `['key']` and `key` produce the
    /// same segment.
    ///
    /// # Panics
    ///
    /// Panics if no variable has been set yet.
    pub fn add_property(&mut self, name: &str) {
        assert!(
            self.variable.is_some(),
            "property '{name}' added before the variable of the expression path was set"
        );
        self.properties.push(normalize_segment(name));
    }

    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Variable followed by properties.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.variable
            .as_deref()
            .into_iter()
            .chain(self.properties.iter().map(String::as_str))
    }

    /// Number of segments, the variable included.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.variable.is_none()
    }

    pub fn contains_segment(&self, name: &str) -> bool {
        self.segments().any(|s| s == name)
    }

    /// Dotted rendering, e.g. `order.items.0`.
    ///
    /// Segments are joined as-is, so a bracketed key containing a dot
    /// (`m['a.b']`) renders like the nested path `m.a.b`.
    pub fn key(&self) -> String {
        self.segments().collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for ExpressionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Key of the direct child `property` of the path rendered as `parent`.
pub fn child_key(parent: &str, property: &str) -> String {
    let property = normalize_segment(property);
    if parent.is_empty() {
        property
    } else {
        format!("{parent}.{property}")
    }
}

/// Wildcard key covering every direct child of the path rendered as `parent`.
pub fn children_key(parent: &str) -> String {
    child_key(parent, WILDCARD)
}

/// Strip index syntax from a single segment: `['k']`, `["k"]`, `[0]` and `'k'`
/// become `k` and `0`.
pub fn normalize_segment(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        s = inner.trim();
    }
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return s[1..s.len() - 1].to_string();
        }
    }
    s.to_string()
}
