//! Request handlers for the HRMS backend.
//!
//! Every handler takes a [`HandlerContext`] and a [`hrms_core::RequestEvent`] and always
//! returns a [`hrms_core::ResponseEnvelope`]; failures are folded into the envelope, never
//! propagated. Identity-scoped handlers reject a request with no resolvable identity
//! before touching any collaborator.

pub mod auth;
pub mod context;
pub mod document;
pub mod feedback;
pub mod leave;
pub mod profile;

mod support;

#[cfg(test)]
mod test_support;

pub use context::HandlerContext;
