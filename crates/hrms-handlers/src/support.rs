use serde::de::DeserializeOwned;
use serde::Serialize;

use hrms_core::{format_response, HrmsError, RequestEvent, ResponseEnvelope};

/// Fold a handler outcome into the envelope returned to the caller.
pub(crate) fn respond<T: Serialize>(
    operation: &'static str,
    user_id: Option<&str>,
    outcome: Result<T, HrmsError>,
) -> ResponseEnvelope {
    let result =
        outcome.and_then(|payload| format_response(200, &payload).map_err(HrmsError::internal));

    match result {
        Ok(envelope) => envelope,
        Err(err) => {
            let user_id = user_id.unwrap_or("-");
            if err.is_server_error() {
                tracing::error!(operation, user_id, kind = err.kind(), error = %err, "request failed");
            } else {
                tracing::info!(operation, user_id, kind = err.kind(), "request rejected");
            }
            err.to_response()
        }
    }
}

pub(crate) fn parse_body<T: DeserializeOwned>(event: &RequestEvent) -> Result<T, HrmsError> {
    let raw = event
        .body
        .as_deref()
        .ok_or_else(|| HrmsError::MalformedPayload("request body is missing".to_string()))?;
    serde_json::from_str(raw).map_err(|err| HrmsError::MalformedPayload(err.to_string()))
}
