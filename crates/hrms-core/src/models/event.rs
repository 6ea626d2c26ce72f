use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Inbound request as delivered by the routing layer.
///
/// Field names follow the API-Gateway proxy event so that raw gateway payloads
/// deserialize directly; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

/// Claims attached by an upstream authorizer (e.g. a verified bearer token).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorizer {
    #[serde(default)]
    pub claims: Option<HashMap<String, Value>>,
}

impl RequestEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json_body(self, body: &Value) -> Self {
        self.with_body(body.to_string())
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_claims(mut self, claims: HashMap<String, Value>) -> Self {
        self.request_context = Some(RequestContext {
            authorizer: Some(Authorizer {
                claims: Some(claims),
            }),
        });
        self
    }

    pub fn with_claim(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut claims = self.claims().cloned().unwrap_or_default();
        claims.insert(key.into(), value.into());
        self.with_claims(claims)
    }

    pub fn claims(&self) -> Option<&HashMap<String, Value>> {
        self.request_context
            .as_ref()?
            .authorizer
            .as_ref()?
            .claims
            .as_ref()
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims()?.get(name)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
    }
}
