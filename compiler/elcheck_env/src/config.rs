// Validator configuration: built once, then shared read-only by every resolver

use std::collections::{BTreeMap, HashMap};

use elcheck_type::{ElType, MockValueFactory, Value};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filters::{ExpressionFilter, FilterChain, SegmentBlacklist};
use crate::overrides::{OverrideTable, IMPLICIT_MAP_OBJECTS};

/// Overrides, filters and extra variables for one validation run.
///
/// Immutable once built; share it by reference or behind an `Arc` across
/// resolvers validating independent expressions.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    overrides: OverrideTable,
    filters: FilterChain,
    extra_variables: HashMap<String, Value>,
}

impl ValidatorConfig {
    /// Start a configuration pre-seeded with the implicit map objects.
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::new()
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn extra_variable(&self, name: &str) -> Option<&Value> {
        self.extra_variables.get(name)
    }
}

/// Fluent construction of a [`ValidatorConfig`].
///
/// Registration errors surface immediately, so a misconfigured validator
/// never gets built.
#[derive(Debug, Clone)]
pub struct ValidatorConfigBuilder {
    overrides: OverrideTable,
    filters: FilterChain,
    extra_variables: HashMap<String, Value>,
}

impl Default for ValidatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorConfigBuilder {
    pub fn new() -> Self {
        let extra_variables = IMPLICIT_MAP_OBJECTS
            .iter()
            .map(|name| (name.to_string(), Value::Map(BTreeMap::new())))
            .collect();
        Self {
            overrides: OverrideTable::with_implicit_objects(),
            filters: FilterChain::new(),
            extra_variables,
        }
    }

    /// Force the type of an exact path, or of all children when `path` ends in `.*`.
    pub fn with_override(mut self, path: &str, ty: ElType) -> Result<Self, ConfigError> {
        self.overrides.register(path, ty)?;
        Ok(self)
    }

    /// Force the type of every direct child of `path`.
    pub fn with_children_override(mut self, path: &str, ty: ElType) -> Result<Self, ConfigError> {
        self.overrides.register_children(path, ty)?;
        Ok(self)
    }

    pub fn with_filter(mut self, filter: impl ExpressionFilter + 'static) -> Self {
        self.filters.add_filter(filter);
        self
    }

    pub fn clear_filters(mut self) -> Self {
        self.filters.clear_filters();
        self
    }

    /// Register a variable with a concrete value. Replaces an earlier registration.
    pub fn with_extra_variable_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra_variables.insert(name.into(), value);
        self
    }

    /// Register a variable by type; its value is synthesized now, not at resolution time.
    pub fn with_extra_variable_type(
        mut self,
        name: impl Into<String>,
        ty: &ElType,
        factory: &dyn MockValueFactory,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let value = factory
            .value_of_type(ty, &name)
            .map_err(|source| ConfigError::UnableToCreateValue {
                name: name.clone(),
                source,
            })?;
        log::debug!("registered extra variable {name}: {ty}");
        self.extra_variables.insert(name, value);
        Ok(self)
    }

    /// Apply a JSON configuration document.
    ///
    /// ```json
    /// {
    ///   "overrides": { "order.items.*": "LineItem" },
    ///   "variables": { "order": "Order" },
    ///   "blocked_segments": ["password"]
    /// }
    /// ```
    pub fn with_json(
        mut self,
        json: &str,
        factory: &dyn MockValueFactory,
    ) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_json::from_str(json)?;
        for (path, type_name) in &document.overrides {
            let ty = parse_type(path, type_name)?;
            self.overrides.register(path, ty)?;
        }
        for (name, type_name) in &document.variables {
            let ty = parse_type(name, type_name)?;
            self = self.with_extra_variable_type(name.as_str(), &ty, factory)?;
        }
        if !document.blocked_segments.is_empty() {
            self.filters
                .add_filter(SegmentBlacklist::new(document.blocked_segments));
        }
        Ok(self)
    }

    pub fn build(self) -> ValidatorConfig {
        log::debug!(
            "validator configured with {} overrides, {} filters, {} extra variables",
            self.overrides.len(),
            self.filters.len(),
            self.extra_variables.len()
        );
        ValidatorConfig {
            overrides: self.overrides,
            filters: self.filters,
            extra_variables: self.extra_variables,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigDocument {
    overrides: BTreeMap<String, String>,
    variables: BTreeMap<String, String>,
    blocked_segments: Vec<String>,
}

fn parse_type(key: &str, text: &str) -> Result<ElType, ConfigError> {
    text.parse().map_err(|source| ConfigError::InvalidType {
        key: key.to_string(),
        text: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::PredicateFilter;
    use elcheck_type::DefaultValueFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_seeds_implicit_objects() {
        let config = ValidatorConfig::builder().build();
        assert_eq!(config.overrides().lookup("param", "x"), Some(&ElType::String));
        assert_eq!(
            config.extra_variable("requestScope"),
            Some(&Value::Map(BTreeMap::new()))
        );
        assert!(config.filters().is_empty());
    }

    #[test]
    fn duplicate_override_fails_fast() {
        let result = ValidatorConfig::builder()
            .with_override("a.b", ElType::Int)
            .and_then(|b| b.with_override("a.b", ElType::String));
        assert!(matches!(result, Err(ConfigError::DuplicateOverride { .. })));
    }

    #[test]
    fn typed_variable_is_mocked_at_registration() {
        let factory = DefaultValueFactory::new();
        let config = ValidatorConfig::builder()
            .with_extra_variable_type("cart", &ElType::bean("Cart"), &factory)
            .unwrap()
            .build();
        assert_eq!(config.extra_variable("cart"), Some(&Value::bean("Cart", "cart")));
    }

    #[test]
    fn unmockable_variable_type_is_a_config_error() {
        let factory = DefaultValueFactory::new().with_unmockable("Sealed");
        let err = ValidatorConfig::builder()
            .with_extra_variable_type("s", &ElType::bean("Sealed"), &factory)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnableToCreateValue { ref name, .. } if name == "s"));
    }

    #[test]
    fn value_variable_is_stored_verbatim() {
        let config = ValidatorConfig::builder()
            .with_extra_variable_value("limit", Value::Int(10))
            .build();
        assert_eq!(config.extra_variable("limit"), Some(&Value::Int(10)));
    }

    #[test]
    fn json_document_registers_everything() {
        let factory = DefaultValueFactory::new();
        let json = r#"{
            "overrides": { "order.items.*": "LineItem", "order['total']": "double" },
            "variables": { "order": "Order" },
            "blocked_segments": ["password"]
        }"#;
        let config = ValidatorConfig::builder()
            .with_json(json, &factory)
            .unwrap()
            .build();
        assert_eq!(
            config.overrides().lookup("order.items", "0"),
            Some(&ElType::bean("LineItem"))
        );
        assert_eq!(config.overrides().lookup("order", "total"), Some(&ElType::Double));
        assert_eq!(config.extra_variable("order"), Some(&Value::bean("Order", "order")));
        assert_eq!(config.filters().names(), vec!["segment-blacklist"]);
    }

    #[test]
    fn json_with_bad_type_or_shape_is_rejected() {
        let factory = DefaultValueFactory::new();
        let bad_type = ValidatorConfig::builder()
            .with_json(r#"{ "overrides": { "a.b": "not a type" } }"#, &factory)
            .unwrap_err();
        assert!(matches!(bad_type, ConfigError::InvalidType { .. }));

        let bad_shape = ValidatorConfig::builder()
            .with_json(r#"{ "unknown": 1 }"#, &factory)
            .unwrap_err();
        assert!(matches!(bad_shape, ConfigError::Json(_)));
    }

    #[test]
    fn json_with_malformed_override_key_is_rejected() {
        let factory = DefaultValueFactory::new();
        let err = ValidatorConfig::builder()
            .with_json(r#"{ "overrides": { "order..items": "int" } }"#, &factory)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverrideKey { ref key, .. } if key == "order..items"
        ));
    }

    #[test]
    fn clear_filters_drops_registered_filters() {
        let config = ValidatorConfig::builder()
            .with_filter(PredicateFilter::new("reject", |_| false))
            .clear_filters()
            .build();
        assert!(config.filters().is_empty());
    }
}
