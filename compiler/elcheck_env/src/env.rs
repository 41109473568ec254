// Bean model: the known variables and the properties of each bean type
//
// This is the in-memory `TypeLookup` used when no framework-specific
// introspection is available. Variables map to types, bean types map property
// names to types.

use std::collections::{BTreeMap, HashMap};

use elcheck_type::{ElType, LookupError, TypeLookup, Value};

/// Declared properties of one bean type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeanType {
    properties: BTreeMap<String, ElType>,
}

impl BeanType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: ElType) -> Self {
        self.properties.insert(name.into(), ty);
        self
    }

    pub fn property(&self, name: &str) -> Option<&ElType> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &ElType)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BeanModel {
    variables: HashMap<String, ElType>,
    types: HashMap<String, BeanType>,
}

impl BeanModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a root variable (typically a managed bean) and its type.
    pub fn with_variable(mut self, name: impl Into<String>, ty: ElType) -> Self {
        self.insert_variable(name, ty);
        self
    }

    /// Declare the properties of a bean type.
    pub fn with_type(mut self, name: impl Into<String>, bean: BeanType) -> Self {
        self.insert_type(name, bean);
        self
    }

    pub fn insert_variable(&mut self, name: impl Into<String>, ty: ElType) {
        self.variables.insert(name.into(), ty);
    }

    pub fn insert_type(&mut self, name: impl Into<String>, bean: BeanType) {
        self.types.insert(name.into(), bean);
    }

    pub fn variable(&self, name: &str) -> Option<&ElType> {
        self.variables.get(name)
    }

    pub fn bean_type(&self, name: &str) -> Option<&BeanType> {
        self.types.get(name)
    }

    fn bean_property(&self, type_name: &str, property: &str) -> Result<Option<ElType>, LookupError> {
        let bean = self.bean_type(type_name).ok_or_else(|| {
            LookupError::evaluation(
                property,
                format!("no property metadata registered for bean type {type_name}"),
            )
        })?;
        match bean.property(property) {
            Some(ElType::Unknown) => Ok(None),
            Some(ty) => Ok(Some(ty.clone())),
            None => Err(LookupError::not_found(property, type_name)),
        }
    }
}

impl TypeLookup for BeanModel {
    fn resolve_property_type(
        &self,
        carrier: Option<&Value>,
        property: &str,
    ) -> Result<Option<ElType>, LookupError> {
        let Some(carrier) = carrier else {
            return match self.variable(property) {
                Some(ElType::Unknown) => Ok(None),
                Some(ty) => Ok(Some(ty.clone())),
                None => Err(LookupError::not_found(property, "the variable scope")),
            };
        };

        match carrier {
            Value::Bean { type_name, .. } => self.bean_property(type_name, property),
            // Map keys are free-form and untyped
            Value::Map(_) | Value::List(_) | Value::Unknown { .. } | Value::Null => Ok(None),
            Value::Array { element, .. } => Ok(Some(element.clone())),
            scalar => Err(LookupError::not_found(property, scalar.el_type().to_string())),
        }
    }
}
