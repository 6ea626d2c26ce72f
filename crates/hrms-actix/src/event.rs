use actix_web::HttpRequest;
use serde_json::Value;
use std::collections::HashMap;
use url::form_urlencoded;

use hrms_core::{Authorizer, RequestContext, RequestEvent};

/// Translate an HTTP request into the event shape the handlers consume.
///
/// An empty body or query string is reported as absent. Repeated query keys keep the last
/// value.
pub fn request_event(
    req: &HttpRequest,
    body: &[u8],
    claims: Option<HashMap<String, Value>>,
) -> RequestEvent {
    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned());

    let query: HashMap<String, String> = form_urlencoded::parse(req.query_string().as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let query_string_parameters = (!query.is_empty()).then_some(query);

    let request_context = claims.map(|claims| RequestContext {
        authorizer: Some(Authorizer {
            claims: Some(claims),
        }),
    });

    RequestEvent {
        body,
        query_string_parameters,
        request_context,
    }
}
