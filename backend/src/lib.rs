//! In-memory user registry served over HTTP.
//!
//! Layout follows ports and adapters: [`domain`] holds the record types,
//! validation and the registry service; [`inbound`] exposes them over
//! actix-web; [`outbound`] provides the in-memory store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
