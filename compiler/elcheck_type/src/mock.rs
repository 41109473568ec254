// Stock mock value factory

use std::collections::{BTreeMap, HashSet};

use crate::traits::{MockValueFactory, UnableToCreateValue};
use crate::types::ElType;
use crate::value::Value;

/// Produces default instances: zero scalars, empty containers and bean
/// placeholders tagged with the hint.
///
/// Bean types registered as unmockable cannot be synthesized; asking for one
/// is an [`UnableToCreateValue`] error.
#[derive(Debug, Clone, Default)]
pub struct DefaultValueFactory {
    unmockable: HashSet<String>,
}

impl DefaultValueFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a bean type as impossible to synthesize.
    pub fn with_unmockable(mut self, type_name: impl Into<String>) -> Self {
        self.unmockable.insert(type_name.into());
        self
    }

    pub fn is_unmockable(&self, type_name: &str) -> bool {
        self.unmockable.contains(type_name)
    }
}

impl MockValueFactory for DefaultValueFactory {
    fn value_of_type(&self, ty: &ElType, hint: &str) -> Result<Value, UnableToCreateValue> {
        let value = match ty {
            ElType::String => Value::Str(String::new()),
            ElType::Int => Value::Int(0),
            ElType::Long => Value::Long(0),
            ElType::Float => Value::Float(0.0),
            ElType::Double => Value::Double(0.0),
            ElType::Bool => Value::Bool(false),
            ElType::Char => Value::Char('\0'),
            // Elements are only mocked when an index step reaches them.
            ElType::Array(element) => Value::empty_array((**element).clone()),
            ElType::List => Value::List(Vec::new()),
            ElType::Map => Value::Map(BTreeMap::new()),
            ElType::Bean(name) => {
                if self.is_unmockable(name) {
                    return Err(unmockable(ty, hint, name));
                }
                Value::bean(name.clone(), hint)
            }
            ElType::Unknown => Value::unknown(hint),
        };
        log::trace!("mocked {ty} for '{hint}'");
        Ok(value)
    }
}

fn unmockable(ty: &ElType, hint: &str, name: &str) -> UnableToCreateValue {
    UnableToCreateValue {
        ty: ty.clone(),
        hint: hint.to_string(),
        reason: format!("type {name} is registered as unmockable"),
    }
}
