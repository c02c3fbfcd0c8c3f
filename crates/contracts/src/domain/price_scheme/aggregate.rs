use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    parse_amount, parse_date, require_text, EntityId, EntityMetadata, FieldErrors, Identified,
};

/// A unit price for a product, valid over a closed date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceScheme {
    pub id: EntityId,
    pub name: String,
    pub product_code: String,
    pub unit_price: f64,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl PriceScheme {
    /// Both window edges are inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }

    /// Schemes whose window has opened are frozen; only future windows
    /// may still be edited.
    pub fn is_editable_on(&self, today: NaiveDate) -> bool {
        today < self.valid_from
    }
}

impl Identified for PriceScheme {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSchemeDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub product_code: String,
    pub unit_price: String,
    pub valid_from: String,
    pub valid_to: String,
}

impl PriceSchemeDraft {
    pub fn from_record(record: &PriceScheme) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            product_code: record.product_code.clone(),
            unit_price: format!("{:.2}", record.unit_price),
            valid_from: record.valid_from.format("%Y-%m-%d").to_string(),
            valid_to: record.valid_to.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Scheme name is required");
        require_text(&mut errors, "product_code", &self.product_code, "Product code is required");
        parse_amount(&mut errors, "unit_price", &self.unit_price, "Unit price must be a positive number");
        let from = parse_date(&mut errors, "valid_from", &self.valid_from, "Start date is required");
        let to = parse_date(&mut errors, "valid_to", &self.valid_to, "End date is required");
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                errors.set("valid_to", "Validity window ends before it starts");
            }
        }
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.trim(),
            "product_code": self.product_code.trim(),
            "unit_price": self.unit_price.trim().parse::<f64>().unwrap_or(0.0),
            "valid_from": self.valid_from.trim(),
            "valid_to": self.valid_to.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheme() -> PriceScheme {
        PriceScheme {
            id: EntityId::Int(1),
            name: "PMS pump price Q2".to_string(),
            product_code: "PMS".to_string(),
            unit_price: 617.0,
            valid_from: date(2026, 4, 1),
            valid_to: date(2026, 6, 30),
            metadata: EntityMetadata::default(),
        }
    }

    #[test]
    fn window_edges_are_inclusive() {
        let scheme = scheme();
        assert!(!scheme.is_active_on(date(2026, 3, 31)));
        assert!(scheme.is_active_on(date(2026, 4, 1)));
        assert!(scheme.is_active_on(date(2026, 6, 30)));
        assert!(!scheme.is_active_on(date(2026, 7, 1)));
    }

    #[test]
    fn schemes_freeze_once_the_window_opens() {
        let scheme = scheme();
        assert!(scheme.is_editable_on(date(2026, 3, 31)));
        assert!(!scheme.is_editable_on(date(2026, 4, 1)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let draft = PriceSchemeDraft {
            name: "AGO promo".to_string(),
            product_code: "AGO".to_string(),
            unit_price: "980".to_string(),
            valid_from: "2026-05-10".to_string(),
            valid_to: "2026-05-01".to_string(),
            ..Default::default()
        };
        let errors = draft.validate();
        assert_eq!(errors.get("valid_to"), Some("Validity window ends before it starts"));
    }

    #[test]
    fn single_day_window_is_allowed() {
        let draft = PriceSchemeDraft {
            name: "One-day promo".to_string(),
            product_code: "PMS".to_string(),
            unit_price: "600".to_string(),
            valid_from: "2026-05-01".to_string(),
            valid_to: "2026-05-01".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_empty());
    }
}
