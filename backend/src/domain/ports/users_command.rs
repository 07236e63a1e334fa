//! Driving port for user registry mutations.
//!
//! Inbound adapters hand raw, unvalidated field values to this port. Field
//! validation, email uniqueness and the partial-update merge all happen
//! behind it, so every adapter gets the same rules.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Raw fields for registering a user.
///
/// `first_name`, `last_name`, `email`, `date_of_birth` and `gender` are
/// required; `other_names` is optional and blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    pub email: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date_of_birth: Option<String>,
    /// One of `MALE`, `FEMALE`, `OTHERS`.
    pub gender: Option<String>,
}

/// Raw fields for a partial update. Absent or blank fields keep their stored
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
}

/// Use-case port for creating, updating and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new user.
    ///
    /// # Errors
    /// - `invalid_request` when a field is missing or malformed.
    /// - `conflict` when another user already holds the email.
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Merge `request` into the user identified by `id`.
    ///
    /// # Errors
    /// - `invalid_request` when a supplied field is malformed.
    /// - `not_found` when no user has the identifier.
    /// - `conflict` when the new email belongs to another user.
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, Error>;

    /// Remove the user identified by `id`, returning the removed record.
    ///
    /// # Errors
    /// - `not_found` when no user has the identifier.
    async fn remove(&self, id: &str) -> Result<User, Error>;
}
