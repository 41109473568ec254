// Error taxonomy of the resolver
//
// `ValidationError` is a verdict on the expression. `InternalFailure` means
// the engine itself could not proceed and says nothing about the expression.

use elcheck_ast::ExpressionPath;
use elcheck_env::FilterRejection;
use elcheck_type::{LookupError, UnableToCreateValue};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The property does not exist on the resolved type.
    #[error("property '{property}' not found on {target} (expression '{path}')")]
    PropertyNotFound {
        property: String,
        target: String,
        /// Path resolved before the failing property.
        path: ExpressionPath,
    },

    /// The lookup failed for a reason other than absence.
    ///
    /// `path` excludes the failing property.
    #[error("failed to evaluate property '{property}' of expression '{path}'")]
    GenericEvaluation {
        property: String,
        path: ExpressionPath,
        #[source]
        source: LookupError,
    },

    /// A registered filter vetoed the path.
    #[error("expression '{path}' rejected by filter '{filter}'")]
    RejectedByFilter {
        filter: String,
        /// Path at rejection time, the rejected segment included.
        path: ExpressionPath,
    },

    #[error("variable '{name}' is not defined")]
    VariableNotFound { name: String },
}

impl ValidationError {
    /// Path snapshot attached to the failure, if any.
    ///
    /// Lookup failures carry the path preceding the failing segment (empty
    /// for a root variable). Filter rejections carry the path including it.
    pub fn path(&self) -> Option<&ExpressionPath> {
        match self {
            ValidationError::PropertyNotFound { path, .. }
            | ValidationError::GenericEvaluation { path, .. }
            | ValidationError::RejectedByFilter { path, .. } => Some(path),
            ValidationError::VariableNotFound { .. } => None,
        }
    }
}

impl From<FilterRejection> for ValidationError {
    fn from(rejection: FilterRejection) -> Self {
        ValidationError::RejectedByFilter {
            filter: rejection.filter,
            path: rejection.path,
        }
    }
}

/// The mock factory could not produce a value for an otherwise valid step.
#[derive(Debug, thiserror::Error)]
#[error("internal validator failure: cannot mock property '{property}' of expression '{path}'")]
pub struct InternalFailure {
    pub property: String,
    pub path: ExpressionPath,
    #[source]
    pub source: UnableToCreateValue,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] InternalFailure),
}

impl ResolveError {
    /// True when the expression itself is invalid, false when the engine failed.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, ResolveError::Invalid(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ResolveError::Invalid(e) => Some(e),
            ResolveError::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalFailure> {
        match self {
            ResolveError::Internal(e) => Some(e),
            ResolveError::Invalid(_) => None,
        }
    }
}

impl From<FilterRejection> for ResolveError {
    fn from(rejection: FilterRejection) -> Self {
        ResolveError::Invalid(rejection.into())
    }
}
