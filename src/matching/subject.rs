use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An instance checked against rule conditions in memory
pub trait Subject {
    /// Name of the entity type, as registered in the catalog
    fn entity_type(&self) -> &str;

    /// Stored value of an attribute; enum attributes report their label
    fn read_attribute(&self, name: &str) -> Option<Value>;
}

/// Map-backed subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity_type: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            attributes: Map::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Subject for Record {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}
