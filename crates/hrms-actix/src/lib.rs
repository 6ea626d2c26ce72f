//! Actix-web HTTP surface for the HRMS backend.
//!
//! Requests are translated into `RequestEvent`s, dispatched to `hrms-handlers`, and the
//! returned envelopes are written back verbatim. Domain types live in `hrms-core`.

pub mod authorizer;
pub mod event;
pub mod handlers;
pub mod routes;

pub use authorizer::BearerAuthorizer;
pub use routes::configure;
