//! Expression paths for the elcheck validator.
//!
//! An [`ExpressionPath`] is the chain of variable and property accesses
//! resolved so far for one expression. Its dotted rendering is the key the
//! override table is probed with.

pub mod path;

pub use path::{child_key, children_key, normalize_segment, ExpressionPath, WILDCARD};
