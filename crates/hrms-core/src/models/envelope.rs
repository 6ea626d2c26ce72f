use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(feature = "actix")]
use actix_web::{http::StatusCode, HttpResponse};

/// Headers attached to every response, success or failure.
pub const STANDARD_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
];

/// Normalized response returned by every handler.
///
/// `body` always holds JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn standard_headers() -> BTreeMap<String, String> {
    STANDARD_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Serialize `payload` into a response envelope carrying the standard headers.
///
/// A serialization failure is returned to the caller, which must report it as an
/// internal error.
pub fn format_response<T>(status_code: u16, payload: &T) -> Result<ResponseEnvelope, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_string(payload)?;
    Ok(ResponseEnvelope {
        status_code,
        headers: standard_headers(),
        body,
    })
}

impl ResponseEnvelope {
    /// `{"message": ...}` envelope. Cannot fail: the payload is built as a JSON value.
    pub fn message(status_code: u16, message: &str) -> Self {
        let body = serde_json::json!({ "message": message });
        Self {
            status_code,
            headers: standard_headers(),
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(feature = "actix")]
impl From<ResponseEnvelope> for HttpResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        let status =
            StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut builder = HttpResponse::build(status);
        for (name, value) in &envelope.headers {
            builder.insert_header((name.as_str(), value.as_str()));
        }
        builder.body(envelope.body)
    }
}
