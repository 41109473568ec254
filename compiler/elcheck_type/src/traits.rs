// Capabilities the resolver consumes but does not implement itself

use std::error::Error;

use crate::types::ElType;
use crate::value::Value;

/// Boxed root cause of a lookup failure.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Failure of an underlying type lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The carrier has no property of that name.
    #[error("property '{property}' not found on {target}")]
    PropertyNotFound { property: String, target: String },

    /// Any other lookup failure (ambiguous resolution, missing metadata, ...).
    #[error("failed to resolve property '{property}': {message}")]
    Evaluation {
        property: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl LookupError {
    pub fn not_found(property: impl Into<String>, target: impl Into<String>) -> Self {
        LookupError::PropertyNotFound {
            property: property.into(),
            target: target.into(),
        }
    }

    pub fn evaluation(property: impl Into<String>, message: impl Into<String>) -> Self {
        LookupError::Evaluation {
            property: property.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(self, cause: impl Into<BoxError>) -> Self {
        match self {
            LookupError::Evaluation {
                property, message, ..
            } => LookupError::Evaluation {
                property,
                message,
                source: Some(cause.into()),
            },
            other => other,
        }
    }
}

/// Resolves the declared type of a property.
pub trait TypeLookup {
    /// Returns the type of `property` on `carrier`.
    ///
    /// `carrier` is `None` when `property` is a root variable. `Ok(None)`
    /// means the property exists but its type is legitimately indeterminate.
    fn resolve_property_type(
        &self,
        carrier: Option<&Value>,
        property: &str,
    ) -> Result<Option<ElType>, LookupError>;
}

/// The factory could not produce a placeholder for a type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unable to create a mock value of type {ty} for '{hint}': {reason}")]
pub struct UnableToCreateValue {
    pub ty: ElType,
    pub hint: String,
    pub reason: String,
}

/// Produces a representative instance of a type.
pub trait MockValueFactory {
    /// `hint` is the property or variable name the value is created for.
    fn value_of_type(&self, ty: &ElType, hint: &str) -> Result<Value, UnableToCreateValue>;
}
