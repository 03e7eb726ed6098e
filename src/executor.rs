//! Realizes finalized descriptors into concrete HTTP requests.
//!
//! The [`Executor`] owns everything the descriptor deliberately does not:
//! path placeholder substitution, query-string encoding, merging the three
//! header collections with their precedence rules, body serialization, and
//! honoring the cancellation signal while the request is in flight.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::constants;
use crate::descriptor::{BodyEncoding, BodyParameter, BodyValue, RequestDescriptor};
use crate::error::Error;
use crate::logging;

/// Sends descriptors against a fixed base URL.
#[derive(Debug, Clone)]
pub struct Executor {
    client: reqwest::Client,
    base_url: String,
}

/// Flattened outcome of one HTTP exchange. Returned for any status code —
/// interpreting non-success statuses is the caller's policy.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Executor {
    /// Creates an executor with a default client (30 second timeout).
    ///
    /// # Errors
    /// Returns [`Error::ClientBuild`] if the underlying client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::ClientBuild { reason: e.to_string() })?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates an executor around a caller-configured client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Renders the request that would be sent, without any network I/O.
    ///
    /// Sensitive header values are redacted, so the result is safe to print
    /// or log.
    ///
    /// # Errors
    /// Returns a construction error if the descriptor cannot be realized.
    pub fn preview(&self, descriptor: &RequestDescriptor) -> Result<Value, Error> {
        let url = build_url(&self.base_url, descriptor)?;
        let headers = merge_headers(descriptor)?;

        let header_map: HashMap<String, String> = headers
            .iter()
            .map(|(name, value)| {
                let text = String::from_utf8_lossy(value.as_bytes()).to_string();
                let display = if logging::should_redact_header(name.as_str()) {
                    logging::redact_sensitive_value(&text)
                } else {
                    text
                };
                (name.as_str().to_string(), display)
            })
            .collect();

        let body = descriptor
            .body()
            .map(|body| encode_body(body).map(|(_, bytes)| String::from_utf8_lossy(&bytes).to_string()))
            .transpose()?;

        Ok(serde_json::json!({
            "method": descriptor.method().to_string(),
            "url": url,
            "headers": header_map,
            "body": body,
        }))
    }

    /// Sends the request described by `descriptor` and flattens the
    /// response.
    ///
    /// # Errors
    /// Construction errors if the descriptor cannot be realized, transport
    /// errors if the exchange fails, and [`Error::Cancelled`] if the
    /// descriptor's cancellation signal fires first.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, Error> {
        let url = build_url(&self.base_url, descriptor)?;
        let mut headers = merge_headers(descriptor)?;

        let mut payload = None;
        if let Some(body) = descriptor.body() {
            let (content_type, bytes) = encode_body(body)?;
            if let Some(content_type) = content_type {
                if !headers.contains_key(reqwest::header::CONTENT_TYPE) {
                    headers.insert(
                        reqwest::header::CONTENT_TYPE,
                        HeaderValue::from_static(content_type),
                    );
                }
            }
            payload = Some(bytes);
        }

        let body_text = payload.as_deref().map(|bytes| String::from_utf8_lossy(bytes).to_string());
        logging::log_request(descriptor.method().as_str(), &url, &headers, body_text.as_deref());

        let mut request =
            self.client.request(descriptor.method().clone(), url.as_str()).headers(headers);
        if let Some(bytes) = payload {
            request = request.body(bytes);
        }

        let signal = descriptor.cancellation();
        if signal.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let started = Instant::now();
        let response = tokio::select! {
            () = signal.cancelled() => return Err(Error::Cancelled),
            result = request.send() => result.map_err(Error::Network)?,
        };

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = tokio::select! {
            () = signal.cancelled() => return Err(Error::Cancelled),
            result = response.text() => {
                result.map_err(|e| Error::ResponseRead { reason: e.to_string() })?
            }
        };

        logging::log_response(
            status,
            started.elapsed().as_millis(),
            &response_headers,
            &body,
            logging::max_body_len(),
        );

        let headers = response_headers
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), value.to_str().unwrap_or("").to_string())
            })
            .collect();

        Ok(HttpResponse { status, headers, body })
    }
}

/// Builds the full URL: base, path template with placeholders substituted,
/// and the query string in recorded order.
fn build_url(base_url: &str, descriptor: &RequestDescriptor) -> Result<String, Error> {
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), descriptor.path());

    // Substitute {name} placeholders left to right.
    let mut start = 0;
    while let Some(open) = url[start..].find('{') {
        let open_pos = start + open;
        let Some(close) = url[open_pos..].find('}') else {
            break;
        };
        let close_pos = open_pos + close;
        let name = url[open_pos + 1..close_pos].to_string();
        let value = resolve_path_param(descriptor, &name)?;
        url.replace_range(open_pos..=close_pos, &value);
        start = open_pos + value.len();
    }

    let query: Vec<String> = descriptor
        .query_params()
        .iter()
        .map(|(name, value)| match value {
            Some(value) => {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            }
            None => urlencoding::encode(name).into_owned(),
        })
        .collect();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    Ok(url)
}

/// Resolves a placeholder against the recorded path parameters. When a name
/// was recorded more than once, the last recording wins. A parameter that
/// was never recorded, or was recorded without a value, cannot resolve a
/// placeholder.
fn resolve_path_param(descriptor: &RequestDescriptor, name: &str) -> Result<String, Error> {
    descriptor
        .path_params()
        .iter()
        .rev()
        .find(|(param, _)| param == name)
        .and_then(|(_, value)| value.clone())
        .ok_or_else(|| Error::MissingPathParameter { name: name.to_string() })
}

/// Merges the three header collections with the defined precedence:
/// method-level headers override interface-level ones, and per-call header
/// parameters are applied last. A header parameter without a value removes
/// the header entirely.
fn merge_headers(descriptor: &RequestDescriptor) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

    for raw in descriptor.interface_headers().iter().chain(descriptor.method_headers()) {
        let (name, value) = parse_raw_header(raw)?;
        headers.insert(header_name(&name)?, header_value(&name, &value)?);
    }

    for (name, value) in descriptor.header_params() {
        let parsed = header_name(name)?;
        match value {
            Some(value) => {
                headers.insert(parsed, header_value(name, value)?);
            }
            None => {
                headers.remove(parsed);
            }
        }
    }

    Ok(headers)
}

/// Splits a raw `"Name: Value"` token.
fn parse_raw_header(raw: &str) -> Result<(String, String), Error> {
    let colon = raw.find(':').ok_or_else(|| Error::InvalidHeaderFormat { header: raw.to_string() })?;
    let name = raw[..colon].trim();
    let value = raw[colon + 1..].trim();
    if name.is_empty() {
        return Err(Error::EmptyHeaderName);
    }
    Ok((name.to_string(), value.to_string()))
}

fn header_name(name: &str) -> Result<HeaderName, Error> {
    HeaderName::from_str(name)
        .map_err(|e| Error::InvalidHeaderName { name: name.to_string(), reason: e.to_string() })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    if value.chars().any(|c| c == '\r' || c == '\n' || c == '\0') {
        return Err(Error::InvalidHeaderValue {
            name: name.to_string(),
            reason: "value contains control characters".to_string(),
        });
    }
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidHeaderValue { name: name.to_string(), reason: e.to_string() })
}

/// Encodes the body per its serialization tag. Returns the implied content
/// type (if any) and the payload bytes.
fn encode_body(body: &BodyParameter) -> Result<(Option<&'static str>, Vec<u8>), Error> {
    match (body.encoding, &body.value) {
        (BodyEncoding::Json, BodyValue::Json(value)) => {
            let bytes = serde_json::to_vec(value)
                .map_err(|e| Error::BodyEncoding { reason: e.to_string() })?;
            Ok((Some(constants::CONTENT_TYPE_JSON), bytes))
        }
        (BodyEncoding::Json, BodyValue::Text(text)) => {
            Ok((Some(constants::CONTENT_TYPE_JSON), text.clone().into_bytes()))
        }
        (BodyEncoding::Json, BodyValue::Bytes(bytes)) => {
            Ok((Some(constants::CONTENT_TYPE_JSON), bytes.clone()))
        }
        (BodyEncoding::UrlEncoded, BodyValue::Json(Value::Object(fields))) => {
            let pairs: Vec<(String, String)> = fields
                .iter()
                .map(|(key, value)| (key.clone(), form_field_string(value)))
                .collect();
            let encoded = serde_urlencoded::to_string(&pairs)
                .map_err(|e| Error::BodyEncoding { reason: e.to_string() })?;
            Ok((Some(constants::CONTENT_TYPE_FORM), encoded.into_bytes()))
        }
        (BodyEncoding::UrlEncoded, BodyValue::Json(other)) => Err(Error::BodyEncoding {
            reason: format!("form encoding requires an object payload, got {other}"),
        }),
        (BodyEncoding::UrlEncoded, BodyValue::Text(text)) => {
            Ok((Some(constants::CONTENT_TYPE_FORM), text.clone().into_bytes()))
        }
        (BodyEncoding::UrlEncoded, BodyValue::Bytes(bytes)) => {
            Ok((Some(constants::CONTENT_TYPE_FORM), bytes.clone()))
        }
        (BodyEncoding::Raw, BodyValue::Json(value)) => {
            let bytes = serde_json::to_vec(value)
                .map_err(|e| Error::BodyEncoding { reason: e.to_string() })?;
            Ok((None, bytes))
        }
        (BodyEncoding::Raw, BodyValue::Text(text)) => Ok((None, text.clone().into_bytes())),
        (BodyEncoding::Raw, BodyValue::Bytes(bytes)) => Ok((None, bytes.clone())),
    }
}

/// Renders a JSON scalar as a form-field value. Strings stay bare, null
/// becomes empty, everything else takes its JSON rendering.
fn form_field_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_header_token() {
        assert_eq!(
            parse_raw_header("Accept: application/json").unwrap(),
            ("Accept".to_string(), "application/json".to_string())
        );
        // Whitespace-tolerant, colon in value allowed.
        assert_eq!(
            parse_raw_header("X-Time:12:30").unwrap(),
            ("X-Time".to_string(), "12:30".to_string())
        );
    }

    #[test]
    fn rejects_malformed_raw_headers() {
        assert!(matches!(
            parse_raw_header("NoColonHere"),
            Err(Error::InvalidHeaderFormat { .. })
        ));
        assert!(matches!(parse_raw_header(": value"), Err(Error::EmptyHeaderName)));
    }

    #[test]
    fn rejects_control_characters_in_header_values() {
        assert!(matches!(
            header_value("X-Test", "bad\r\nvalue"),
            Err(Error::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn form_fields_render_scalars_bare() {
        assert_eq!(form_field_string(&Value::String("plain".to_string())), "plain");
        assert_eq!(form_field_string(&Value::Null), "");
        assert_eq!(form_field_string(&serde_json::json!(3)), "3");
        assert_eq!(form_field_string(&serde_json::json!(true)), "true");
    }
}
