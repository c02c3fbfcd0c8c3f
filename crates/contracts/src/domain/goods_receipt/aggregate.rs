use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    parse_date, require_text, EntityId, EntityMetadata, FieldErrors, Identified,
};

// ============================================================================
// Lines and reconciliation
// ============================================================================

/// One waybill line: what the supplier said was sent vs what the
/// storekeeper counted on the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product: String,
    pub unit: String,
    pub expected_qty: f64,
    pub received_qty: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineVariance {
    Exact,
    Short(f64),
    Over(f64),
}

impl ReceiptLine {
    pub fn variance(&self) -> LineVariance {
        let diff = self.received_qty - self.expected_qty;
        if diff == 0.0 {
            LineVariance::Exact
        } else if diff < 0.0 {
            LineVariance::Short(-diff)
        } else {
            LineVariance::Over(diff)
        }
    }
}

/// Totals shown to the storekeeper before the receipt is posted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptSummary {
    pub total_expected: f64,
    pub total_received: f64,
    pub exact_lines: usize,
    pub short_lines: usize,
    pub over_lines: usize,
}

impl ReceiptSummary {
    pub fn has_variance(&self) -> bool {
        self.short_lines > 0 || self.over_lines > 0
    }
}

/// Single pass over the lines; no rounding, quantities are compared as
/// entered.
pub fn reconcile(lines: &[ReceiptLine]) -> ReceiptSummary {
    let mut summary = ReceiptSummary::default();
    for line in lines {
        summary.total_expected += line.expected_qty;
        summary.total_received += line.received_qty;
        match line.variance() {
            LineVariance::Exact => summary.exact_lines += 1,
            LineVariance::Short(_) => summary.short_lines += 1,
            LineVariance::Over(_) => summary.over_lines += 1,
        }
    }
    summary
}

// ============================================================================
// Aggregate
// ============================================================================

/// A storekeeper's record of goods received against a waybill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsReceipt {
    pub id: EntityId,
    pub waybill_no: String,
    pub substore_id: EntityId,
    pub received_on: NaiveDate,
    pub lines: Vec<ReceiptLine>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for GoodsReceipt {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

// ============================================================================
// Form draft
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptLineDraft {
    pub product: String,
    pub unit: String,
    pub expected_qty: String,
    pub received_qty: String,
}

impl ReceiptLineDraft {
    /// Typed line, or `None` while the quantities don't parse yet.
    pub fn to_line(&self) -> Option<ReceiptLine> {
        let expected = self.expected_qty.trim().parse::<f64>().ok()?;
        let received = self.received_qty.trim().parse::<f64>().ok()?;
        Some(ReceiptLine {
            product: self.product.trim().to_string(),
            unit: self.unit.trim().to_string(),
            expected_qty: expected,
            received_qty: received,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoodsReceiptDraft {
    pub waybill_no: String,
    pub substore_id: String,
    pub received_on: String,
    pub lines: Vec<ReceiptLineDraft>,
}

impl GoodsReceiptDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "waybill_no", &self.waybill_no, "Waybill number is required");
        require_text(&mut errors, "substore_id", &self.substore_id, "Substore is required");
        parse_date(&mut errors, "received_on", &self.received_on, "Receipt date is required");

        if self.lines.is_empty() {
            errors.set("lines", "At least one line is required");
        }
        for (index, line) in self.lines.iter().enumerate() {
            if line.product.trim().is_empty() {
                errors.set(format!("lines[{}].product", index), "Product is required");
            }
            match line.expected_qty.trim().parse::<f64>() {
                Ok(q) if q > 0.0 => {}
                _ => errors.set(
                    format!("lines[{}].expected_qty", index),
                    "Expected quantity must be greater than zero",
                ),
            }
            match line.received_qty.trim().parse::<f64>() {
                Ok(q) if q >= 0.0 => {}
                _ => errors.set(
                    format!("lines[{}].received_qty", index),
                    "Received quantity must be zero or more",
                ),
            }
        }
        errors
    }

    pub fn to_payload(&self) -> serde_json::Value {
        let lines: Vec<ReceiptLine> = self.lines.iter().filter_map(ReceiptLineDraft::to_line).collect();
        serde_json::json!({
            "waybill_no": self.waybill_no.trim(),
            "substore_id": EntityId::from_string(self.substore_id.trim()),
            "received_on": self.received_on.trim(),
            "lines": lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, expected: f64, received: f64) -> ReceiptLine {
        ReceiptLine {
            product: product.to_string(),
            unit: "carton".to_string(),
            expected_qty: expected,
            received_qty: received,
        }
    }

    #[test]
    fn reconcile_counts_short_over_and_exact_lines() {
        let lines = vec![
            line("Engine oil 1L", 40.0, 40.0),
            line("Coolant 4L", 12.0, 10.0),
            line("Wiper fluid", 6.0, 8.0),
        ];
        let summary = reconcile(&lines);
        assert_eq!(summary.total_expected, 58.0);
        assert_eq!(summary.total_received, 58.0);
        assert_eq!(summary.exact_lines, 1);
        assert_eq!(summary.short_lines, 1);
        assert_eq!(summary.over_lines, 1);
        assert!(summary.has_variance());
    }

    #[test]
    fn variance_reports_magnitude() {
        assert_eq!(line("x", 12.0, 10.0).variance(), LineVariance::Short(2.0));
        assert_eq!(line("x", 6.0, 8.0).variance(), LineVariance::Over(2.0));
        assert_eq!(line("x", 5.0, 5.0).variance(), LineVariance::Exact);
    }

    #[test]
    fn draft_flags_bad_quantities_per_line() {
        let draft = GoodsReceiptDraft {
            waybill_no: "WB-1207".to_string(),
            substore_id: "3".to_string(),
            received_on: "2026-03-02".to_string(),
            lines: vec![
                ReceiptLineDraft {
                    product: "Engine oil 1L".to_string(),
                    unit: "carton".to_string(),
                    expected_qty: "40".to_string(),
                    received_qty: "-1".to_string(),
                },
                ReceiptLineDraft {
                    product: String::new(),
                    unit: String::new(),
                    expected_qty: "0".to_string(),
                    received_qty: "2".to_string(),
                },
            ],
        };
        let errors = draft.validate();
        assert!(errors.get("lines[0].received_qty").is_some());
        assert!(errors.get("lines[1].product").is_some());
        assert!(errors.get("lines[1].expected_qty").is_some());
        assert!(errors.get("lines[0].product").is_none());
    }

    #[test]
    fn empty_receipt_is_rejected() {
        let errors = GoodsReceiptDraft::default().validate();
        assert!(errors.get("lines").is_some());
    }
}
