use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, EntityMetadata, Identified};

/// An in-app notification delivered by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Identified for Notification {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Per-user delivery toggles, saved as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default)]
    pub lodgement_cleared: bool,
    #[serde(default)]
    pub receipt_variance: bool,
    #[serde(default)]
    pub daily_summary: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            low_stock: true,
            lodgement_cleared: true,
            receipt_variance: true,
            daily_summary: false,
        }
    }
}

impl NotificationPreferences {
    /// Stable (key, label, value) listing so the settings panel renders
    /// one row per toggle without knowing the struct.
    pub fn toggles(&self) -> Vec<(&'static str, &'static str, bool)> {
        vec![
            ("low_stock", "Low stock alerts", self.low_stock),
            ("lodgement_cleared", "Lodgement cleared", self.lodgement_cleared),
            ("receipt_variance", "Receiving variance", self.receipt_variance),
            ("daily_summary", "Daily summary digest", self.daily_summary),
        ]
    }

    pub fn set(&mut self, key: &str, value: bool) {
        match key {
            "low_stock" => self.low_stock = value,
            "lodgement_cleared" => self.lodgement_cleared = value,
            "receipt_variance" => self.receipt_variance = value,
            "daily_summary" => self.daily_summary = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_round_trip_through_set() {
        let mut prefs = NotificationPreferences::default();
        prefs.set("daily_summary", true);
        prefs.set("low_stock", false);
        let toggles = prefs.toggles();
        assert_eq!(toggles.iter().find(|t| t.0 == "daily_summary").unwrap().2, true);
        assert_eq!(toggles.iter().find(|t| t.0 == "low_stock").unwrap().2, false);
    }

    #[test]
    fn unknown_toggle_keys_are_ignored() {
        let mut prefs = NotificationPreferences::default();
        let before = prefs;
        prefs.set("does_not_exist", true);
        assert_eq!(prefs, before);
    }
}
