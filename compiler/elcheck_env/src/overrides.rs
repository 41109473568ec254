// Type overrides keyed by expression path
//
// Two key shapes share one table: exact paths (`bean.prop`) and wildcard
// children (`bean.*`). Only the immediate parent of a property is consulted;
// an override on a grandparent does not cascade.

use std::collections::HashMap;

use elcheck_ast::{child_key, children_key};
use elcheck_parser::parse_override_key;
use elcheck_type::ElType;

use crate::error::ConfigError;

/// JSP/template implicit objects that are maps of strings.
pub const IMPLICIT_MAP_OBJECTS: [&str; 9] = [
    "applicationScope",
    "cookie",
    "header",
    "headerValues",
    "initParam",
    "param",
    "paramValues",
    "requestScope",
    "sessionScope",
];

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, ElType>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table where the elements of every implicit map object resolve to `String`,
    /// the most coercible type.
    pub fn with_implicit_objects() -> Self {
        let mut table = Self::new();
        for object in IMPLICIT_MAP_OBJECTS {
            table
                .entries
                .insert(children_key(object), ElType::String);
        }
        table
    }

    /// Force the type produced for `path`.
    ///
    /// `path` is either a complete property chain (`bean.prop1.prop2`) or a
    /// chain ending in `.*`, which applies to every direct child without an
    /// exact override of its own. Bracketed access in `path` is normalized;
    /// a key that is not a well-formed path is rejected.
    pub fn register(&mut self, path: &str, ty: ElType) -> Result<(), ConfigError> {
        let key = normalized_key(path)?;
        if let Some(existing) = self.entries.get(&key) {
            return Err(ConfigError::DuplicateOverride {
                key,
                existing: existing.clone(),
                new: ty,
            });
        }
        log::debug!("registered type override {key} => {ty}");
        self.entries.insert(key, ty);
        Ok(())
    }

    /// Shorthand for registering `path.*`.
    pub fn register_children(&mut self, path: &str, ty: ElType) -> Result<(), ConfigError> {
        self.register(&children_key(path), ty)
    }

    /// Override for `property` on the path rendered as `current_key`.
    ///
    /// The exact key wins over the wildcard key of the same parent.
    pub fn lookup(&self, current_key: &str, property: &str) -> Option<&ElType> {
        self.entries
            .get(&child_key(current_key, property))
            .or_else(|| self.entries.get(&children_key(current_key)))
    }

    /// Override for a root variable.
    pub fn lookup_root(&self, variable: &str) -> Option<&ElType> {
        self.entries.get(variable)
    }

    pub fn get(&self, key: &str) -> Option<&ElType> {
        self.entries.get(&normalized_key(key).ok()?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalized_key(path: &str) -> Result<String, ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::EmptyOverrideKey);
    }
    parse_override_key(path)
        .map(|key| key.to_string())
        .map_err(|source| ConfigError::InvalidOverrideKey {
            key: path.to_string(),
            source,
        })
}
