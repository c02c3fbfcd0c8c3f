use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field-name -> message map produced by draft validators.
///
/// Backend validation errors (HTTP 400 with an `errors` object) merge
/// into the same map, so client-side and server-side failures render
/// identically next to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merge another error map in; entries from `other` win, since the
    /// backend's verdict supersedes the client-side guess.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Require a non-blank text input.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.set(field, message);
    }
}

/// Parse a money/quantity input. Records an error and returns `None`
/// unless the value is a number greater than zero.
pub fn parse_amount(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n > 0.0 => Some(n),
        _ => {
            errors.set(field, message);
            None
        }
    }
}

/// Parse an `<input type="date">` value (`YYYY-MM-DD`).
pub fn parse_date(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.set(field, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_override_client_errors_on_merge() {
        let mut client = FieldErrors::new();
        client.set("amount", "Amount must be a positive number");
        client.set("bank", "Bank is required");

        let server: FieldErrors = [("amount".to_string(), "Amount exceeds teller limit".to_string())]
            .into_iter()
            .collect();

        client.merge(server);
        assert_eq!(client.get("amount"), Some("Amount exceeds teller limit"));
        assert_eq!(client.get("bank"), Some("Bank is required"));
        assert_eq!(client.len(), 2);
    }

    #[test]
    fn parse_amount_rejects_zero_and_garbage() {
        let mut errors = FieldErrors::new();
        assert_eq!(parse_amount(&mut errors, "amount", "0", "bad"), None);
        assert_eq!(parse_amount(&mut errors, "amount", "12k", "bad"), None);
        assert_eq!(parse_amount(&mut errors, "amount", " 150.50 ", "bad"), Some(150.5));
    }

    #[test]
    fn parse_date_accepts_html_date_input_format() {
        let mut errors = FieldErrors::new();
        let d = parse_date(&mut errors, "lodged_on", "2026-02-14", "bad").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        assert!(errors.is_empty());

        assert_eq!(parse_date(&mut errors, "lodged_on", "14/02/2026", "bad"), None);
        assert_eq!(errors.get("lodged_on"), Some("bad"));
    }
}
