use std::collections::HashMap;

use crate::error::SchemaError;
use crate::model::SchemaType;

/// The canonical map of schema type name to its definition, built once by the
/// parser and owned read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, SchemaType>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Inserts a newly-parsed type, rejecting a name already present.
    pub(crate) fn insert(&mut self, ty: SchemaType) -> Result<(), SchemaError> {
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType {
                name,
                xpath: ty.origin().to_string(),
            });
        }
        self.types.insert(name, ty);
        Ok(())
    }
}
