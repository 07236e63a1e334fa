//! Driving port for user registry reads.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for reading registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user in registration order. Never fails on an empty
    /// registry.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user identified by `id`.
    ///
    /// # Errors
    /// - `not_found`, carrying the requested identifier, when absent.
    async fn find_user(&self, id: &str) -> Result<User, Error>;
}
