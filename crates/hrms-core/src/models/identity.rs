use serde_json::Value;

use crate::RequestEvent;

/// Claim carrying the authenticated subject.
pub const SUBJECT_CLAIM: &str = "sub";
/// Body field / query parameter carrying a caller-supplied user id.
pub const USER_ID_FIELD: &str = "userId";

/// Resolve the acting user for an inbound event.
///
/// Sources are consulted in a fixed order and the first non-empty value wins:
/// 1. the authorizer `sub` claim,
/// 2. a string `userId` field in a JSON body,
/// 3. the `userId` query parameter.
///
/// A body that is not valid JSON is skipped, never reported. Returns `None` when no
/// source carries an identity; callers decide whether that is fatal.
pub fn resolve_identity(event: &RequestEvent) -> Option<String> {
    let resolved = subject_from_claims(event)
        .or_else(|| user_id_from_body(event))
        .or_else(|| user_id_from_query(event));

    if resolved.is_none() {
        tracing::warn!(
            has_authorizer = event.claims().is_some(),
            has_body = event.body.is_some(),
            has_query = event.query_string_parameters.is_some(),
            "userId not found in request event"
        );
    }

    resolved
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn subject_from_claims(event: &RequestEvent) -> Option<String> {
    event
        .claim(SUBJECT_CLAIM)
        .and_then(Value::as_str)
        .and_then(non_empty)
}

fn user_id_from_body(event: &RequestEvent) -> Option<String> {
    let raw = event.body.as_deref()?;
    let body: Value = match serde_json::from_str(raw) {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = %err, "request body is not JSON; skipping it for identity");
            return None;
        }
    };

    body.get(USER_ID_FIELD)
        .and_then(Value::as_str)
        .and_then(non_empty)
}

fn user_id_from_query(event: &RequestEvent) -> Option<String> {
    event.query_param(USER_ID_FIELD).and_then(non_empty)
}
