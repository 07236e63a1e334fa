//! User registry domain service.
//!
//! Implements the [`UsersCommand`] and [`UsersQuery`] driving ports on top of
//! a [`UserRepository`]. Every mutation runs behind a single write gate so the
//! email uniqueness check and the sequence number assignment observe the same
//! snapshot of the store as the write that follows them.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateUserRequest, UpdateUserRequest, UserRepository, UserRepositoryError, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    EmailAddress, Error, User, UserId, UserValidationError, validate_new_user,
    validate_user_patch,
};

/// Registry service implementing the user driving ports.
pub struct UsersService<R> {
    repo: Arc<R>,
    write_gate: Mutex<()>,
}

impl<R> UsersService<R> {
    /// Create a new service over `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            write_gate: Mutex::new(()),
        }
    }
}

impl<R> UsersService<R>
where
    R: UserRepository,
{
    fn map_validation_error(error: UserValidationError) -> Error {
        let field = error.field().map(|field| field.as_str());
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": field,
            "code": error.code(),
        }))
    }

    fn map_repository_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Missing { id } => Self::not_found(&id),
            UserRepositoryError::Unavailable { message } => {
                Error::internal(format!("user store unavailable: {message}"))
            }
        }
    }

    fn not_found(id: &str) -> Error {
        Error::not_found(format!("user {id} not found")).with_details(json!({ "id": id }))
    }

    fn email_taken(email: &EmailAddress) -> Error {
        warn!(%email, "email already registered");
        Error::conflict(format!("a user with email {email} already exists")).with_details(
            json!({
                "field": "email",
                "code": "email_taken",
            }),
        )
    }

    /// Identifiers that are not UUIDs can never be stored, so they resolve to
    /// `not_found` rather than a validation failure.
    fn parse_id(id: &str) -> Result<UserId, Error> {
        UserId::new(id).map_err(|_| Self::not_found(id))
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_email(email)
            .await
            .map_err(Self::map_repository_error)?;
        match existing {
            Some(holder) if Some(holder.id()) != owner => Err(Self::email_taken(email)),
            _ => Ok(()),
        }
    }

    async fn fetch(&self, id: &str) -> Result<User, Error> {
        let user_id = Self::parse_id(id)?;
        self.repo
            .find_by_id(&user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error> {
        let details = validate_new_user(request).map_err(Self::map_validation_error)?;

        let _guard = self.write_gate.lock().await;
        self.ensure_email_free(&details.email, None).await?;
        let count = self
            .repo
            .count()
            .await
            .map_err(Self::map_repository_error)?;
        let user = User::new(UserId::random(), count as u64 + 1, details);
        self.repo
            .append(&user)
            .await
            .map_err(Self::map_repository_error)?;

        info!(
            user_id = %user.id(),
            sequence_number = user.sequence_number(),
            "user registered"
        );
        Ok(user)
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, Error> {
        let patch = validate_user_patch(request).map_err(Self::map_validation_error)?;

        let _guard = self.write_gate.lock().await;
        let current = self.fetch(id).await?;
        if patch.is_empty() {
            debug!(user_id = %current.id(), "empty update left user unchanged");
            return Ok(current);
        }
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(current.id())).await?;
        }

        let updated = current.apply(patch);
        self.repo
            .replace(&updated)
            .await
            .map_err(Self::map_repository_error)?;

        info!(user_id = %updated.id(), "user updated");
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<User, Error> {
        let user_id = Self::parse_id(id)?;

        let _guard = self.write_gate.lock().await;
        let removed = self
            .repo
            .remove_by_id(&user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;

        info!(user_id = %removed.id(), "user removed");
        Ok(removed)
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repo
            .list_all()
            .await
            .map_err(Self::map_repository_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn find_user(&self, id: &str) -> Result<User, Error> {
        let user = self.fetch(id).await?;
        debug!(user_id = %user.id(), "fetched user");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
