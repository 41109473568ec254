// Path type resolver for elcheck: resolves one property access at a time
pub mod error;
pub mod resolver;

pub use error::{InternalFailure, ResolveError, ValidationError};
pub use resolver::{PathTypeResolver, ResolvedStep};
