//! Request and response logging with automatic secret redaction.
//!
//! Lines go to the `stencil::executor` target: method/URL and status at
//! info, headers at debug, bodies at trace. Headers that commonly carry
//! credentials are replaced with `[REDACTED]` before they reach the log
//! stream.

use reqwest::header::HeaderMap;
use tracing::{debug, info, trace};

/// Redacts a sensitive value, preserving emptiness.
#[must_use]
pub fn redact_sensitive_value(value: &str) -> String {
    if value.is_empty() {
        value.to_string()
    } else {
        "[REDACTED]".to_string()
    }
}

/// Whether a header's value should be redacted before logging.
#[must_use]
pub fn should_redact_header(header_name: &str) -> bool {
    let lower = header_name.to_lowercase();
    matches!(
        lower.as_str(),
        "authorization"
            | "proxy-authorization"
            | "x-api-key"
            | "x-access-token"
            | "x-auth-token"
            | "api-key"
            | "api_key"
            | "token"
            | "secret"
            | "password"
            | "cookie"
    )
}

/// Logs an outgoing request.
pub fn log_request(method: &str, url: &str, headers: &HeaderMap, body: Option<&str>) {
    info!(target: "stencil::executor", "→ {} {}", method.to_uppercase(), url);
    log_headers("Request", headers);
    if let Some(content) = body {
        trace!(target: "stencil::executor", "Request body: {}", content);
    }
}

/// Logs a completed response, truncating the body at `max_body_len`.
pub fn log_response(status: u16, duration_ms: u128, headers: &HeaderMap, body: &str, max_body_len: usize) {
    info!(target: "stencil::executor", "← {} ({}ms)", status, duration_ms);
    log_headers("Response", headers);
    if body.len() > max_body_len {
        trace!(
            target: "stencil::executor",
            "Response body: {} (truncated at {} chars)",
            &body[..max_body_len],
            max_body_len
        );
    } else if !body.is_empty() {
        trace!(target: "stencil::executor", "Response body: {}", body);
    }
}

fn log_headers(direction: &str, headers: &HeaderMap) {
    if headers.is_empty() {
        return;
    }
    debug!(target: "stencil::executor", "{} headers:", direction);
    for (name, value) in headers {
        let display_value = if should_redact_header(name.as_str()) {
            "[REDACTED]".to_string()
        } else {
            String::from_utf8_lossy(value.as_bytes()).to_string()
        };
        debug!(target: "stencil::executor", "  {}: {}", name.as_str(), display_value);
    }
}

/// Maximum logged response-body length, from `STENCIL_LOG_MAX_BODY`.
#[must_use]
pub fn max_body_len() -> usize {
    std::env::var("STENCIL_LOG_MAX_BODY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_credential_headers() {
        assert!(should_redact_header("Authorization"));
        assert!(should_redact_header("AUTHORIZATION"));
        assert!(should_redact_header("X-API-Key"));
        assert!(should_redact_header("api_key"));
        assert!(should_redact_header("Cookie"));
    }

    #[test]
    fn keeps_regular_headers() {
        assert!(!should_redact_header("Content-Type"));
        assert!(!should_redact_header("User-Agent"));
        assert!(!should_redact_header("Accept"));
    }

    #[test]
    fn redaction_preserves_emptiness() {
        assert_eq!(redact_sensitive_value("secret123"), "[REDACTED]");
        assert_eq!(redact_sensitive_value(""), "");
    }

    #[test]
    fn max_body_len_defaults_without_env() {
        std::env::remove_var("STENCIL_LOG_MAX_BODY");
        assert_eq!(max_body_len(), 1000);
    }
}
