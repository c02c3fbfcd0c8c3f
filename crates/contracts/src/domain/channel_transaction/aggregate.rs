use serde::{Deserialize, Serialize};

use crate::domain::common::{
    parse_amount, require_text, EntityId, EntityMetadata, FieldErrors, Identified,
};

/// Service channels that sell outside the fuel court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceChannel {
    CarWash,
    Lubebay,
}

impl ServiceChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceChannel::CarWash => "Car wash",
            ServiceChannel::Lubebay => "Lubebay",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceChannel::CarWash => "car_wash",
            ServiceChannel::Lubebay => "lubebay",
        }
    }
}

/// Confirmation workflow of a channel ticket. Attendants submit,
/// supervisors confirm or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelTransactionStatus {
    Pending,
    AwaitingConfirmation,
    Confirmed,
    Rejected,
}

impl ChannelTransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelTransactionStatus::Pending => "Pending",
            ChannelTransactionStatus::AwaitingConfirmation => "Awaiting confirmation",
            ChannelTransactionStatus::Confirmed => "Confirmed",
            ChannelTransactionStatus::Rejected => "Rejected",
        }
    }

    pub fn transitions(&self) -> &'static [&'static str] {
        match self {
            ChannelTransactionStatus::Pending => &["submit"],
            ChannelTransactionStatus::AwaitingConfirmation => &["confirm", "reject"],
            _ => &[],
        }
    }

    pub fn allows(&self, action: &str) -> bool {
        self.transitions().contains(&action)
    }
}

/// A car-wash or lubebay service ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTransaction {
    pub id: EntityId,
    pub channel: ServiceChannel,
    pub vehicle_no: String,
    pub service: String,
    pub attendant: String,
    pub amount: f64,
    pub status: ChannelTransactionStatus,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for ChannelTransaction {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTransactionDraft {
    pub id: Option<EntityId>,
    pub channel: ServiceChannel,
    pub vehicle_no: String,
    pub service: String,
    pub attendant: String,
    pub amount: String,
}

impl Default for ChannelTransactionDraft {
    fn default() -> Self {
        Self {
            id: None,
            channel: ServiceChannel::CarWash,
            vehicle_no: String::new(),
            service: String::new(),
            attendant: String::new(),
            amount: String::new(),
        }
    }
}

impl ChannelTransactionDraft {
    pub fn from_record(record: &ChannelTransaction) -> Self {
        Self {
            id: Some(record.id.clone()),
            channel: record.channel,
            vehicle_no: record.vehicle_no.clone(),
            service: record.service.clone(),
            attendant: record.attendant.clone(),
            amount: format!("{:.2}", record.amount),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "vehicle_no", &self.vehicle_no, "Vehicle number is required");
        require_text(&mut errors, "service", &self.service, "Service description is required");
        require_text(&mut errors, "attendant", &self.attendant, "Attendant is required");
        parse_amount(&mut errors, "amount", &self.amount, "Amount must be a positive number");
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "channel": self.channel,
            "vehicle_no": self.vehicle_no.trim(),
            "service": self.service.trim(),
            "attendant": self.attendant.trim(),
            "amount": self.amount.trim().parse::<f64>().unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_is_only_reachable_from_awaiting() {
        assert!(ChannelTransactionStatus::AwaitingConfirmation.allows("confirm"));
        assert!(ChannelTransactionStatus::AwaitingConfirmation.allows("reject"));
        assert!(!ChannelTransactionStatus::Pending.allows("confirm"));
        assert!(!ChannelTransactionStatus::Confirmed.allows("reject"));
    }

    #[test]
    fn draft_requires_vehicle_and_positive_amount() {
        let draft = ChannelTransactionDraft {
            service: "Executive wash".to_string(),
            attendant: "B. Okoro".to_string(),
            amount: "0".to_string(),
            ..Default::default()
        };
        let errors = draft.validate();
        assert!(errors.get("vehicle_no").is_some());
        assert!(errors.get("amount").is_some());
        assert!(errors.get("service").is_none());
    }

    #[test]
    fn channel_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ServiceChannel::CarWash).unwrap(),
            "\"car_wash\""
        );
    }
}
