//! Library exports.
//!
//! The workspace crates under stable module names, for additional binaries (the OpenAPI
//! exporter) and the integration tests.

pub use hrms_actix as http;
pub use hrms_config as config;
pub use hrms_core as models;
pub use hrms_handlers as handlers;
pub use hrms_identity_cognito as identity;
pub use hrms_observability as telemetry;
pub use hrms_openapi as openapi;
pub use hrms_ports as ports;
pub use hrms_server as server;
pub use hrms_storage_factory as storage;
