// Batch validation results

use serde::Serialize;

use crate::ValidateError;
use elcheck_typeck::ResolveError;

/// Verdict on a single expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Valid {
        #[serde(rename = "type")]
        ty: String,
    },
    Invalid {
        reason: String,
        /// Dot-joined path at the point of failure, when one was reached.
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// The validator failed; the expression may well be fine.
    Internal { reason: String },
}

impl Outcome {
    pub fn from_error(error: &ValidateError) -> Self {
        match error {
            ValidateError::Parse(e) => Outcome::Invalid {
                reason: e.to_string(),
                path: None,
            },
            ValidateError::Resolve(ResolveError::Invalid(e)) => Outcome::Invalid {
                reason: e.to_string(),
                path: e.path().map(|p| p.key()),
            },
            ValidateError::Resolve(ResolveError::Internal(e)) => Outcome::Internal {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionReport {
    pub expression: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    valid: usize,
    invalid: usize,
    internal: usize,
    expressions: Vec<ExpressionReport>,
}

impl ValidationReport {
    pub fn push(&mut self, expression: impl Into<String>, outcome: Outcome) {
        match outcome {
            Outcome::Valid { .. } => self.valid += 1,
            Outcome::Invalid { .. } => self.invalid += 1,
            Outcome::Internal { .. } => self.internal += 1,
        }
        self.expressions.push(ExpressionReport {
            expression: expression.into(),
            outcome,
        });
    }

    pub fn entries(&self) -> &[ExpressionReport] {
        &self.expressions
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.valid
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid
    }

    pub fn internal_count(&self) -> usize {
        self.internal
    }

    /// True when every expression validated.
    pub fn is_clean(&self) -> bool {
        self.invalid == 0 && self.internal == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
