// Type descriptors for properties reachable from an EL expression

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The declared type of a variable or property.
///
/// `Unknown` is the distinguished "type unknown" marker: it is what a step
/// resolves to when neither an override nor the type lookup can say anything
/// more precise (e.g. elements of a raw collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElType {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    /// Array with a declared element type.
    Array(Box<ElType>),
    /// Collection whose element type has been erased.
    List,
    Map,
    /// A named bean type; its properties are known to the type lookup.
    Bean(String),
    Unknown,
}

impl ElType {
    pub fn bean(name: impl Into<String>) -> Self {
        ElType::Bean(name.into())
    }

    pub fn array_of(element: ElType) -> Self {
        ElType::Array(Box::new(element))
    }
}

impl fmt::Display for ElType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElType::String => write!(f, "String"),
            ElType::Int => write!(f, "int"),
            ElType::Long => write!(f, "long"),
            ElType::Float => write!(f, "float"),
            ElType::Double => write!(f, "double"),
            ElType::Bool => write!(f, "boolean"),
            ElType::Char => write!(f, "char"),
            ElType::Array(element) => write!(f, "{element}[]"),
            ElType::List => write!(f, "List"),
            ElType::Map => write!(f, "Map"),
            ElType::Bean(name) => write!(f, "{name}"),
            ElType::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("type name must not be empty")]
    Empty,
    #[error("'{0}' is not a valid type name")]
    InvalidName(String),
}

impl FromStr for ElType {
    type Err = TypeParseError;

    /// Parses the type names accepted in configuration documents.
    ///
    /// Primitive names accept both their primitive and boxed spelling
    /// (`int`/`Integer`), `T[]` declares an array and any other identifier
    /// (optionally package-qualified) names a bean type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TypeParseError::Empty);
        }
        if let Some(element) = s.strip_suffix("[]") {
            return Ok(ElType::array_of(element.parse()?));
        }
        let ty = match s {
            "String" | "string" | "java.lang.String" => ElType::String,
            "int" | "Integer" | "short" | "Short" | "byte" | "Byte" => ElType::Int,
            "long" | "Long" => ElType::Long,
            "float" | "Float" => ElType::Float,
            "double" | "Double" => ElType::Double,
            "boolean" | "Boolean" | "bool" => ElType::Bool,
            "char" | "Character" => ElType::Char,
            "List" | "Collection" | "Set" => ElType::List,
            "Map" => ElType::Map,
            "Unknown" | "?" => ElType::Unknown,
            name if is_type_name(name) => ElType::Bean(name.to_string()),
            other => return Err(TypeParseError::InvalidName(other.to_string())),
        };
        Ok(ty)
    }
}

fn is_type_name(name: &str) -> bool {
    name.split('.').all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    })
}
