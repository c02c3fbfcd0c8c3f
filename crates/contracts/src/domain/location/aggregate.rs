use serde::{Deserialize, Serialize};

use crate::domain::common::{require_text, EntityId, EntityMetadata, FieldErrors, Identified};

/// A depot or station the company operates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub region: String,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for Location {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub address: String,
    pub region: String,
}

impl LocationDraft {
    pub fn from_record(record: &Location) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            address: record.address.clone(),
            region: record.region.clone(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Location name is required");
        require_text(&mut errors, "address", &self.address, "Address is required");
        require_text(&mut errors, "region", &self.region, "Region is required");
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.trim(),
            "address": self.address.trim(),
            "region": self.region.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_are_required() {
        let errors = LocationDraft::default().validate();
        assert_eq!(errors.len(), 3);
    }
}
