//! Configuration side of the elcheck validator: type overrides, expression
//! filters, extra variables and the in-memory bean model.

pub mod config;
pub mod env;
pub mod error;
pub mod filters;
pub mod overrides;

pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use env::{BeanModel, BeanType};
pub use error::ConfigError;
pub use filters::{
    ExpressionFilter, FilterChain, FilterRejection, PredicateFilter, SegmentBlacklist,
    VariableWhitelist,
};
pub use overrides::{OverrideTable, IMPLICIT_MAP_OBJECTS};
