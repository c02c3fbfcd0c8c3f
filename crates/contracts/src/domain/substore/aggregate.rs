use serde::{Deserialize, Serialize};

use crate::domain::common::{require_text, EntityId, EntityMetadata, FieldErrors, Identified};

/// A named sub-inventory attached to a location, run by a storekeeper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substore {
    pub id: EntityId,
    pub name: String,
    pub location_id: EntityId,
    #[serde(default)]
    pub location_name: String,
    pub keeper: String,
    pub active: bool,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for Substore {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubstoreDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub location_id: String,
    pub keeper: String,
    pub active: bool,
}

impl SubstoreDraft {
    pub fn from_record(record: &Substore) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            location_id: record.location_id.as_string(),
            keeper: record.keeper.clone(),
            active: record.active,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Substore name is required");
        require_text(&mut errors, "location_id", &self.location_id, "Location is required");
        require_text(&mut errors, "keeper", &self.keeper, "Storekeeper is required");
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.trim(),
            "location_id": EntityId::from_string(self.location_id.trim()),
            "keeper": self.keeper.trim(),
            "active": self.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_name_location_and_keeper() {
        let errors = SubstoreDraft::default().validate();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("location_id").is_some());
    }
}
