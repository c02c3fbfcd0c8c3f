//! HTTP client for the backend API.
//!
//! All requests funnel through here so every failure is caught at this
//! boundary and mapped to an `ApiError`; nothing above the client ever
//! sees a raw transport error.

use gloo_net::http::{Request, Response};
use serde_json::Value;
use thiserror::Error;

use contracts::domain::common::FieldErrors;

/// Message shown when the transport gave us nothing better.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorKind {
    /// Request never reached the server, or no response came back.
    Transport,
    /// 4xx carrying per-field errors; rendered inline next to inputs.
    Validation,
    /// Other 4xx (not found, conflict, ...); toast only.
    Request,
    /// 5xx; toast plus a retry affordance on list screens.
    Server,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub field_errors: FieldErrors,
}

impl ApiError {
    pub fn transport() -> Self {
        Self {
            message: UNKNOWN_ERROR.to_string(),
            status: None,
            field_errors: FieldErrors::new(),
        }
    }

    /// Classify a non-2xx response. The backend sends
    /// `{ "message": ..., "errors": { field: message } }` on validation
    /// failures; both parts are optional in practice.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        let field_errors = body
            .as_ref()
            .and_then(|b| b.get("errors"))
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(field, value)| {
                        value.as_str().map(|msg| (field.clone(), msg.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            message,
            status: Some(status),
            field_errors,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            None => ApiErrorKind::Transport,
            Some(status) if status >= 500 => ApiErrorKind::Server,
            Some(_) if !self.field_errors.is_empty() => ApiErrorKind::Validation,
            Some(_) => ApiErrorKind::Request,
        }
    }
}

/// Base URL for API requests, derived from the window location. The
/// backend listens on port 3000 next to whatever serves the bundle.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

#[derive(Debug, Clone)]
pub struct Api {
    base: String,
}

impl Api {
    pub fn new() -> Self {
        Self { base: api_base() }
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = Request::get(&self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| transport_error("GET", path, err))?;
        handle(response).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        let builder = Request::post(&self.url(path)).header("Accept", "application/json");
        let request = match body {
            Some(body) => builder.json(body).map_err(|err| transport_error("POST", path, err))?,
            None => builder
                .build()
                .map_err(|err| transport_error("POST", path, err))?,
        };
        let response = request
            .send()
            .await
            .map_err(|err| transport_error("POST", path, err))?;
        handle(response).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let request = Request::put(&self.url(path))
            .header("Accept", "application/json")
            .json(body)
            .map_err(|err| transport_error("PUT", path, err))?;
        let response = request
            .send()
            .await
            .map_err(|err| transport_error("PUT", path, err))?;
        handle(response).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let request = Request::patch(&self.url(path))
            .header("Accept", "application/json")
            .json(body)
            .map_err(|err| transport_error("PATCH", path, err))?;
        let response = request
            .send()
            .await
            .map_err(|err| transport_error("PATCH", path, err))?;
        handle(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = Request::delete(&self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| transport_error("DELETE", path, err))?;
        handle(response).await
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_error(method: &str, path: &str, err: gloo_net::Error) -> ApiError {
    log::error!("{} {} failed before a response arrived: {}", method, path, err);
    ApiError::transport()
}

async fn handle(response: Response) -> Result<Option<Value>, ApiError> {
    let status = response.status();
    if response.ok() {
        // 204s and empty bodies are fine; a 2xx body that fails to parse
        // is treated as absent and left to the normalizer's degrade path
        match response.text().await {
            Ok(text) if !text.trim().is_empty() => Ok(serde_json::from_str(&text).ok()),
            _ => Ok(None),
        }
    } else {
        let body = response.json::<Value>().await.ok();
        let error = ApiError::from_response(status, body);
        log::warn!("request rejected with HTTP {}: {}", status, error.message);
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_errors_carry_field_messages() {
        let body = json!({
            "message": "Validation failed",
            "errors": { "amount": "Amount exceeds teller limit" }
        });
        let error = ApiError::from_response(400, Some(body));
        assert_eq!(error.kind(), ApiErrorKind::Validation);
        assert_eq!(error.message, "Validation failed");
        assert_eq!(error.field_errors.get("amount"), Some("Amount exceeds teller limit"));
    }

    #[test]
    fn four_xx_without_field_errors_is_a_plain_request_error() {
        let error = ApiError::from_response(404, Some(json!({ "message": "No such lodgement" })));
        assert_eq!(error.kind(), ApiErrorKind::Request);
        assert_eq!(error.message, "No such lodgement");
    }

    #[test]
    fn five_xx_is_a_server_error_with_status_fallback_message() {
        let error = ApiError::from_response(502, None);
        assert_eq!(error.kind(), ApiErrorKind::Server);
        assert_eq!(error.message, "HTTP 502");
    }

    #[test]
    fn transport_failures_fall_back_to_the_generic_message() {
        let error = ApiError::transport();
        assert_eq!(error.kind(), ApiErrorKind::Transport);
        assert_eq!(error.message, UNKNOWN_ERROR);
    }

    #[test]
    fn non_string_error_entries_are_skipped() {
        let body = json!({ "errors": { "amount": ["a", "b"], "bank": "Bank is closed" } });
        let error = ApiError::from_response(400, Some(body));
        assert_eq!(error.field_errors.len(), 1);
        assert_eq!(error.field_errors.get("bank"), Some("Bank is closed"));
    }
}
