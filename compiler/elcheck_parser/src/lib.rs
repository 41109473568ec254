pub mod parser;

pub use parser::{parse_override_key, parse_path, OverrideKey, ParseError, ParsedPath};
