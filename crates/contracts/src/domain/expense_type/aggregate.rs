use serde::{Deserialize, Serialize};

use crate::domain::common::{
    parse_amount, require_text, EntityId, EntityMetadata, FieldErrors, Identified,
};

/// A category of station expense (diesel top-up, generator service, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub requires_approval: bool,
    #[serde(default)]
    pub approval_limit: Option<f64>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for ExpenseType {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseTypeDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub requires_approval: bool,
    pub approval_limit: String,
}

impl ExpenseTypeDraft {
    pub fn from_record(record: &ExpenseType) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            requires_approval: record.requires_approval,
            approval_limit: record
                .approval_limit
                .map(|limit| format!("{:.2}", limit))
                .unwrap_or_default(),
        }
    }

    /// `approval_limit` is required only while `requires_approval` is
    /// set; otherwise the field is ignored entirely.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Name is required");
        if self.requires_approval {
            parse_amount(
                &mut errors,
                "approval_limit",
                &self.approval_limit,
                "Approval limit is required when approval is enabled",
            );
        }
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        let limit = if self.requires_approval {
            self.approval_limit.trim().parse::<f64>().ok()
        } else {
            None
        };
        serde_json::json!({
            "name": self.name.trim(),
            "description": if self.description.trim().is_empty() { None } else { Some(self.description.trim()) },
            "requires_approval": self.requires_approval,
            "approval_limit": limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_limit_is_conditional_on_the_flag() {
        let mut draft = ExpenseTypeDraft {
            name: "Generator service".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_empty());

        draft.requires_approval = true;
        assert!(draft.validate().get("approval_limit").is_some());

        draft.approval_limit = "50000".to_string();
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn limit_is_dropped_from_payload_when_approval_is_off() {
        let draft = ExpenseTypeDraft {
            name: "Sundries".to_string(),
            requires_approval: false,
            approval_limit: "9999".to_string(),
            ..Default::default()
        };
        let payload = draft.to_payload();
        assert!(payload["approval_limit"].is_null());
    }
}
