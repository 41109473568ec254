use elcheck_parser::ParseError;
use elcheck_type::{ElType, TypeParseError, UnableToCreateValue};

/// Problems found while building a validator configuration.
///
/// These abort setup; they never describe an expression.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the type override for '{key}' is already defined; current: {existing}, new: {new}")]
    DuplicateOverride {
        key: String,
        existing: ElType,
        new: ElType,
    },

    #[error("override key must not be empty")]
    EmptyOverrideKey,

    #[error("invalid override key '{key}'")]
    InvalidOverrideKey {
        key: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot create a value for extra variable '{name}'")]
    UnableToCreateValue {
        name: String,
        #[source]
        source: UnableToCreateValue,
    },

    #[error("invalid type '{text}' given for '{key}'")]
    InvalidType {
        key: String,
        text: String,
        #[source]
        source: TypeParseError,
    },

    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}
