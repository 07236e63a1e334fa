//! Port abstraction for the user record store and its errors.
//!
//! The store owns every registered [`User`] for the lifetime of the process.
//! It preserves insertion order, hands out copies rather than references, and
//! performs no validation of its own: callers check uniqueness before calling
//! [`UserRepository::append`].

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user record store adapters.
    pub enum UserRepositoryError {
        /// A replacement targeted a record that is no longer stored.
        Missing { id: String } => "user record {id} is not stored",
        /// The backing store could not serve the request.
        Unavailable { message: String } => "user store unavailable: {message}",
    }
}

/// Ordered collection of user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Add a record to the end of the collection.
    async fn append(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch the record with the given identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the record registered under `email` (exact match).
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Return every record in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Number of records currently stored.
    async fn count(&self) -> Result<usize, UserRepositoryError>;

    /// Overwrite the stored record sharing `user`'s identifier, in place.
    ///
    /// Returns [`UserRepositoryError::Missing`] when no such record exists.
    async fn replace(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Remove and return the record with the given identifier.
    async fn remove_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}
