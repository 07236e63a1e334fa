//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: the in-memory user record store
//!
//! Adapters are thin translators between domain types and storage. They
//! contain no business logic.

pub mod persistence;
