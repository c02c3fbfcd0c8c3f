use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    parse_amount, parse_date, require_text, EntityId, EntityMetadata, FieldErrors, Identified,
};

// ============================================================================
// Status workflow
// ============================================================================

/// Workflow states of a bank lodgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LodgementStatus {
    Pending,
    Cleared,
    Bounced,
    Cancelled,
}

impl LodgementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LodgementStatus::Pending => "Pending",
            LodgementStatus::Cleared => "Cleared",
            LodgementStatus::Bounced => "Bounced",
            LodgementStatus::Cancelled => "Cancelled",
        }
    }

    /// Transitions the backend accepts from this state. Terminal states
    /// accept none; the row actions render from this list.
    pub fn transitions(&self) -> &'static [&'static str] {
        match self {
            LodgementStatus::Pending => &["clear", "bounce", "cancel"],
            _ => &[],
        }
    }

    pub fn allows(&self, action: &str) -> bool {
        self.transitions().contains(&action)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// A bank lodgement of daily takings recorded by a teller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lodgement {
    pub id: EntityId,
    pub teller_no: String,
    pub account_name: String,
    pub bank: String,
    pub amount: f64,
    pub lodged_on: NaiveDate,
    pub status: LodgementStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for Lodgement {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

// ============================================================================
// Form draft
// ============================================================================

/// Create/edit form draft. Text fields mirror the inputs verbatim;
/// `validate` parses them into typed values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LodgementDraft {
    pub id: Option<EntityId>,
    pub teller_no: String,
    pub account_name: String,
    pub bank: String,
    pub amount: String,
    pub lodged_on: String,
    pub remarks: String,
}

impl LodgementDraft {
    pub fn from_record(record: &Lodgement) -> Self {
        Self {
            id: Some(record.id.clone()),
            teller_no: record.teller_no.clone(),
            account_name: record.account_name.clone(),
            bank: record.bank.clone(),
            amount: format!("{:.2}", record.amount),
            lodged_on: record.lodged_on.format("%Y-%m-%d").to_string(),
            remarks: record.remarks.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "teller_no", &self.teller_no, "Teller number is required");
        require_text(&mut errors, "account_name", &self.account_name, "Account name is required");
        require_text(&mut errors, "bank", &self.bank, "Bank is required");
        parse_amount(&mut errors, "amount", &self.amount, "Amount must be a positive number");
        parse_date(&mut errors, "lodged_on", &self.lodged_on, "Lodgement date is required");
        errors
    }

    /// Request body for create/update. Only meaningful after `validate`
    /// returned no errors; unparseable values degrade to defaults.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "teller_no": self.teller_no.trim(),
            "account_name": self.account_name.trim(),
            "bank": self.bank.trim(),
            "amount": self.amount.trim().parse::<f64>().unwrap_or(0.0),
            "lodged_on": self.lodged_on.trim(),
            "remarks": if self.remarks.trim().is_empty() { None } else { Some(self.remarks.trim()) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> LodgementDraft {
        LodgementDraft {
            id: None,
            teller_no: "TL-0042".to_string(),
            account_name: "Main collections".to_string(),
            bank: "Zenith".to_string(),
            amount: "125000.00".to_string(),
            lodged_on: "2026-03-02".to_string(),
            remarks: String::new(),
        }
    }

    #[test]
    fn only_pending_lodgements_can_transition() {
        assert!(LodgementStatus::Pending.allows("clear"));
        assert!(LodgementStatus::Pending.allows("bounce"));
        assert!(LodgementStatus::Pending.allows("cancel"));
        assert!(!LodgementStatus::Cleared.allows("bounce"));
        assert!(!LodgementStatus::Cancelled.allows("clear"));
    }

    #[test]
    fn valid_draft_produces_no_errors() {
        assert!(valid_draft().validate().is_empty());
    }

    #[test]
    fn each_field_rule_is_independent() {
        let draft = LodgementDraft {
            teller_no: String::new(),
            amount: "-5".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("teller_no").is_some());
        assert!(errors.get("amount").is_some());
        assert!(errors.get("bank").is_none());
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let status: LodgementStatus = serde_json::from_str("\"cleared\"").unwrap();
        assert_eq!(status, LodgementStatus::Cleared);
    }
}
