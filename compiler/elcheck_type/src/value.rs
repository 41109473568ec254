// Mock values: stand-ins for the runtime objects an expression walks through

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::ElType;

/// A synthesized value carried from one resolution step to the next.
///
/// Values never hold real application data. Beans and unknown placeholders
/// remember the property (or variable) name they were created for, which is
/// only used in diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Str(String),
    Array { element: ElType, items: Vec<Value> },
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Bean { type_name: String, hint: String },
    Unknown { hint: String },
}

impl Value {
    pub fn bean(type_name: impl Into<String>, hint: impl Into<String>) -> Self {
        Value::Bean {
            type_name: type_name.into(),
            hint: hint.into(),
        }
    }

    pub fn unknown(hint: impl Into<String>) -> Self {
        Value::Unknown { hint: hint.into() }
    }

    pub fn empty_array(element: ElType) -> Self {
        Value::Array {
            element,
            items: Vec::new(),
        }
    }

    /// The runtime type of this value as the type lookup sees it.
    pub fn el_type(&self) -> ElType {
        match self {
            Value::Null | Value::Unknown { .. } => ElType::Unknown,
            Value::Bool(_) => ElType::Bool,
            Value::Char(_) => ElType::Char,
            Value::Int(_) => ElType::Int,
            Value::Long(_) => ElType::Long,
            Value::Float(_) => ElType::Float,
            Value::Double(_) => ElType::Double,
            Value::Str(_) => ElType::String,
            Value::Array { element, .. } => ElType::array_of(element.clone()),
            Value::List(_) => ElType::List,
            Value::Map(_) => ElType::Map,
            Value::Bean { type_name, .. } => ElType::Bean(type_name.clone()),
        }
    }

    /// Lists have no per-element type; maps are left to the type lookup.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown { .. })
    }

    /// Declared element type when this value is an array; independent of its length.
    pub fn array_element_type(&self) -> Option<&ElType> {
        match self {
            Value::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}
