// Type system for elcheck: what a property yields and what stands in for it
pub mod mock;
pub mod traits;
pub mod types;
pub mod value;

pub use mock::*;
pub use traits::*;
pub use types::*;
pub use value::*;
