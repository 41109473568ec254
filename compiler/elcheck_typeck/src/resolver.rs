// Path type resolver: the engine behind expression validation
//
// The driving parser reports the root variable, then each property in
// order. For every property the resolver settles the type (lookup, then
// override, then unknown fallback), records the property in the path, runs
// the filters and hands back a mock value to carry into the next step.

use elcheck_ast::{normalize_segment, ExpressionPath};
use elcheck_env::ValidatorConfig;
use elcheck_type::{ElType, LookupError, MockValueFactory, TypeLookup, Value};

use crate::error::{InternalFailure, ResolveError, ValidationError};

/// Outcome of one resolution step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStep {
    /// Never "no type": indeterminate types collapse to `ElType::Unknown`.
    pub ty: ElType,
    pub value: Value,
}

/// Resolves the steps of a single expression.
///
/// Holds the mutable path of that expression, so each expression needs its
/// own resolver. The configuration and the two capabilities are only read and
/// may be shared between resolvers.
pub struct PathTypeResolver<'a> {
    config: &'a ValidatorConfig,
    lookup: &'a dyn TypeLookup,
    factory: &'a dyn MockValueFactory,
    path: ExpressionPath,
}

impl<'a> PathTypeResolver<'a> {
    pub fn new(
        config: &'a ValidatorConfig,
        lookup: &'a dyn TypeLookup,
        factory: &'a dyn MockValueFactory,
    ) -> Self {
        Self {
            config,
            lookup,
            factory,
            path: ExpressionPath::new(),
        }
    }

    /// The path resolved so far.
    pub fn path(&self) -> &ExpressionPath {
        &self.path
    }

    pub fn into_path(self) -> ExpressionPath {
        self.path
    }

    /// Notification that the expression starts with the free variable `name`.
    ///
    /// Returns the value to resolve the first property against.
    pub fn variable_encountered(&mut self, name: &str) -> Result<Value, ResolveError> {
        self.resolve_variable(name).map(|step| step.value)
    }

    /// Notification that `property` is accessed on `carrier`.
    ///
    /// Returns the mock value to resolve the next property against.
    pub fn property_encountered(
        &mut self,
        carrier: &Value,
        property: &str,
    ) -> Result<Value, ResolveError> {
        self.resolve_property(carrier, property).map(|step| step.value)
    }

    /// Like [`variable_encountered`](Self::variable_encountered), keeping the resolved type.
    pub fn resolve_variable(&mut self, name: &str) -> Result<ResolvedStep, ResolveError> {
        self.path.set_variable(name);
        self.config.filters().apply(&self.path)?;

        if let Some(value) = self.config.extra_variable(name) {
            log::trace!("variable '{name}' is a registered extra variable");
            return Ok(ResolvedStep {
                ty: value.el_type(),
                value: value.clone(),
            });
        }

        let ty = match self.config.overrides().lookup_root(name) {
            Some(forced) => {
                log::debug!("variable '{name}': using {forced} as requested");
                forced.clone()
            }
            None => self
                .lookup
                .resolve_property_type(None, name)
                .map_err(|e| match e {
                    LookupError::PropertyNotFound { .. } => ValidationError::VariableNotFound {
                        name: name.to_string(),
                    },
                    // Nothing precedes the variable: report the empty path.
                    other => ValidationError::GenericEvaluation {
                        property: name.to_string(),
                        path: ExpressionPath::new(),
                        source: other,
                    },
                })?
                .unwrap_or(ElType::Unknown),
        };

        let value = self.mock_value(&ty, name)?;
        log::trace!("resolved variable '{name}' to {ty}");
        Ok(ResolvedStep { ty, value })
    }

    /// Like [`property_encountered`](Self::property_encountered), keeping the resolved type.
    pub fn resolve_property(
        &mut self,
        carrier: &Value,
        property: &str,
    ) -> Result<ResolvedStep, ResolveError> {
        let property = normalize_segment(property);
        let original = self.type_of_collection_or_bean(carrier, &property)?;
        let ty = self.determine_final_type(&property, original);

        // Overrides are keyed by the parent path: append only once the type is final.
        self.path.add_property(&property);
        self.config.filters().apply(&self.path)?;

        let value = self.mock_value(&ty, &property)?;
        log::trace!("resolved '{}' to {ty}", self.path);
        Ok(ResolvedStep { ty, value })
    }

    /// Pick the type for `property` on the current path: override, else
    /// `original`, else the unknown marker.
    pub fn determine_final_type(&self, property: &str, original: Option<ElType>) -> ElType {
        match self.config.overrides().lookup(&self.path.key(), property) {
            Some(forced) => {
                log::debug!(
                    "property '{property}' of '{}': overriding {original:?} with {forced} as requested",
                    self.path
                );
                forced.clone()
            }
            // Common for raw collections whose element type cannot be determined
            None => original.unwrap_or(ElType::Unknown),
        }
    }

    fn type_of_collection_or_bean(
        &self,
        carrier: &Value,
        property: &str,
    ) -> Result<Option<ElType>, ValidationError> {
        // Arrays are typed by declaration; an empty one has no element to index anyway.
        if let Some(element) = carrier.array_element_type() {
            return Ok(Some(element.clone()));
        }
        // No runtime element inspection: defer to overrides or the unknown marker.
        if carrier.is_list() || carrier.is_unknown() {
            return Ok(None);
        }

        self.lookup
            .resolve_property_type(Some(carrier), property)
            .map_err(|e| match e {
                LookupError::PropertyNotFound { property, target } => {
                    ValidationError::PropertyNotFound {
                        property,
                        target,
                        path: self.path.clone(),
                    }
                }
                other => self.evaluation_error(property, other),
            })
    }

    fn evaluation_error(&self, property: &str, source: LookupError) -> ValidationError {
        ValidationError::GenericEvaluation {
            property: property.to_string(),
            path: self.path.clone(),
            source,
        }
    }

    fn mock_value(&self, ty: &ElType, hint: &str) -> Result<Value, InternalFailure> {
        self.factory.value_of_type(ty, hint).map_err(|source| {
            log::error!(
                "failed to mock {ty} for '{hint}' of expression '{}': {source}",
                self.path
            );
            InternalFailure {
                property: hint.to_string(),
                path: self.path.clone(),
                source,
            }
        })
    }
}
