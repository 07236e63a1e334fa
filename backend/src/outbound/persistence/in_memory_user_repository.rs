//! Process-local `UserRepository` adapter.
//!
//! Records live in a `Vec` behind a Tokio `RwLock`, so insertion order is the
//! list order and every read returns owned copies. Nothing survives a
//! restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

/// In-memory user record store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn append(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn count(&self) -> Result<usize, UserRepositoryError> {
        Ok(self.users.read().await.len())
    }

    async fn replace(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .ok_or_else(|| UserRepositoryError::missing(user.id().to_string()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn remove_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut users = self.users.write().await;
        let position = users.iter().position(|user| user.id() == id);
        Ok(position.map(|index| users.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for ordering and in-place replacement.
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Gender, PersonName, UserDetails, UserField};

    fn user(sequence_number: u64, email: &str) -> User {
        let details = UserDetails {
            first_name: PersonName::new(UserField::FirstName, format!("User {sequence_number}"))
                .expect("valid name"),
            last_name: PersonName::new(UserField::LastName, "Test").expect("valid name"),
            other_names: None,
            email: EmailAddress::new(email).expect("valid email"),
            date_of_birth: NaiveDate::from_ymd_opt(2011, 10, 5).expect("valid date"),
            gender: Gender::Others,
        };
        User::new(UserId::random(), sequence_number, details)
    }

    #[fixture]
    fn seeded() -> (InMemoryUserRepository, Vec<User>) {
        let users = vec![
            user(1, "user1@test.com"),
            user(2, "user2@test.com"),
            user(3, "user3@test.com"),
        ];
        let repo = InMemoryUserRepository {
            users: RwLock::new(users.clone()),
        };
        (repo, users)
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.list_all().await.expect("list").is_empty());
        assert_eq!(repo.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn append_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        let first = user(1, "user1@test.com");
        let second = user(2, "user2@test.com");
        repo.append(&first).await.expect("append");
        repo.append(&second).await.expect("append");

        assert_eq!(repo.list_all().await.expect("list"), vec![first, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_match_id_and_exact_email(seeded: (InMemoryUserRepository, Vec<User>)) {
        let (repo, users) = seeded;

        let by_id = repo.find_by_id(users[1].id()).await.expect("lookup");
        assert_eq!(by_id.as_ref(), Some(&users[1]));

        let email = EmailAddress::new("user3@test.com").expect("valid email");
        let by_email = repo.find_by_email(&email).await.expect("lookup");
        assert_eq!(by_email.as_ref(), Some(&users[2]));

        let shouted = EmailAddress::new("USER3@test.com").expect("valid email");
        assert!(repo.find_by_email(&shouted).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn replace_overwrites_in_place(seeded: (InMemoryUserRepository, Vec<User>)) {
        let (repo, users) = seeded;
        let patched = users[1].clone().apply(crate::domain::UserDetailsPatch {
            gender: Some(Gender::Female),
            ..Default::default()
        });

        repo.replace(&patched).await.expect("replace");

        let listed = repo.list_all().await.expect("list");
        assert_eq!(listed, vec![users[0].clone(), patched, users[2].clone()]);
    }

    #[tokio::test]
    async fn replace_reports_missing_record() {
        let repo = InMemoryUserRepository::new();
        let stray = user(1, "user1@test.com");

        let error = repo.replace(&stray).await.expect_err("missing");
        assert_eq!(error, UserRepositoryError::missing(stray.id().to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_returns_record_and_closes_gap(seeded: (InMemoryUserRepository, Vec<User>)) {
        let (repo, users) = seeded;

        let removed = repo.remove_by_id(users[0].id()).await.expect("remove");
        assert_eq!(removed.as_ref(), Some(&users[0]));
        assert_eq!(
            repo.list_all().await.expect("list"),
            vec![users[1].clone(), users[2].clone()]
        );

        let again = repo.remove_by_id(users[0].id()).await.expect("remove");
        assert!(again.is_none());
    }
}
