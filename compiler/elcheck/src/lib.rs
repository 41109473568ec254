//! Static validation of EL property-path expressions.
//!
//! [`ExpressionValidator`] reads an expression such as `#{order.items[0].price}`,
//! walks it segment by segment against a [`TypeLookup`] and reports the type of
//! the last segment, or why the expression cannot be valid. Nothing is ever
//! evaluated against real application data: every step works on mock values.

pub mod report;

use elcheck_env::ValidatorConfig;
use elcheck_parser::{parse_path, ParseError};
use elcheck_type::{DefaultValueFactory, MockValueFactory, TypeLookup};
use elcheck_typeck::{PathTypeResolver, ResolveError, ResolvedStep};

pub use report::{ExpressionReport, Outcome, ValidationReport};

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ValidateError {
    /// False only when the validator itself failed; a malformed expression is invalid.
    pub fn is_validation_failure(&self) -> bool {
        match self {
            ValidateError::Parse(_) => true,
            ValidateError::Resolve(e) => e.is_validation_failure(),
        }
    }
}

pub struct ExpressionValidator {
    config: ValidatorConfig,
    lookup: Box<dyn TypeLookup>,
    factory: Box<dyn MockValueFactory>,
}

impl ExpressionValidator {
    pub fn new(
        config: ValidatorConfig,
        lookup: impl TypeLookup + 'static,
        factory: impl MockValueFactory + 'static,
    ) -> Self {
        Self {
            config,
            lookup: Box::new(lookup),
            factory: Box::new(factory),
        }
    }

    /// Validator mocking every type with [`DefaultValueFactory`].
    pub fn with_default_factory(config: ValidatorConfig, lookup: impl TypeLookup + 'static) -> Self {
        Self::new(config, lookup, DefaultValueFactory::new())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one expression, returning the resolved type and mock value of its last segment.
    pub fn validate(&self, expression: &str) -> Result<ResolvedStep, ValidateError> {
        let parsed = parse_path(expression)?;
        let mut resolver =
            PathTypeResolver::new(&self.config, self.lookup.as_ref(), self.factory.as_ref());

        let mut step = resolver.resolve_variable(&parsed.variable)?;
        for property in &parsed.properties {
            step = resolver.resolve_property(&step.value, property)?;
        }
        log::debug!("'{expression}' resolves to {}", step.ty);
        Ok(step)
    }

    /// Validate every expression, collecting all verdicts instead of stopping at the first.
    pub fn validate_all<'e, I>(&self, expressions: I) -> ValidationReport
    where
        I: IntoIterator<Item = &'e str>,
    {
        let mut report = ValidationReport::default();
        for expression in expressions {
            let outcome = match self.validate(expression) {
                Ok(step) => Outcome::Valid {
                    ty: step.ty.to_string(),
                },
                Err(e) => {
                    if e.is_validation_failure() {
                        log::info!("invalid expression '{expression}': {e}");
                    }
                    Outcome::from_error(&e)
                }
            };
            report.push(expression, outcome);
        }
        log::info!(
            "validated {} expressions: {} valid, {} invalid, {} internal failures",
            report.len(),
            report.valid_count(),
            report.invalid_count(),
            report.internal_count()
        );
        report
    }
}
