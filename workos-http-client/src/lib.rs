//! Typed client for the parts of the WorkOS API used by SSO and Directory Sync.
//!
//! The layout mirrors a generated OpenAPI client: `apis` holds one module per
//! API group plus the shared [`apis::configuration::Configuration`], `models`
//! holds the request/response types.

pub mod apis;
pub mod models;
