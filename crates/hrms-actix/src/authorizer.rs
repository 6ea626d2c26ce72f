use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use std::collections::HashMap;

use hrms_core::ResponseEnvelope;

/// Verifies bearer tokens and exposes their claims the way a gateway authorizer would.
#[derive(Clone)]
pub struct BearerAuthorizer {
    key: DecodingKey,
    validation: Validation,
}

/// The presented token could not be verified.
#[derive(Debug)]
pub struct Rejected(pub jsonwebtoken::errors::Error);

impl Rejected {
    pub fn to_response(&self) -> ResponseEnvelope {
        ResponseEnvelope::message(401, "Unauthorized")
    }
}

impl BearerAuthorizer {
    /// HS256 tokens signed with `secret`. `exp` is required and enforced.
    pub fn hs256(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Claims of the request's bearer token.
    ///
    /// `Ok(None)` when no token is presented; requests without a token are passed through
    /// and identity resolution falls back to the body or query.
    pub fn claims(&self, req: &HttpRequest) -> Result<Option<HashMap<String, Value>>, Rejected> {
        let Some(token) = bearer_token(req) else {
            return Ok(None);
        };

        let data = decode::<HashMap<String, Value>>(token, &self.key, &self.validation).map_err(
            |err| {
                tracing::info!(error = %err, "bearer token rejected");
                Rejected(err)
            },
        )?;
        Ok(Some(data.claims))
    }
}

/// `Authorization: Bearer <token>`, or the bare token as a gateway would accept it.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}
