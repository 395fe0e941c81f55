use async_trait::async_trait;

use super::store::{MemoryStore, UserRecord};
use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tables = self.store.write().await;
        if tables.user_by_email(&input.email).is_some() {
            return Err(DomainError::AlreadyExists(format!("email: {}", input.email)));
        }

        let id = tables.allocate_user_id();
        let user = User::new(id, input.name, input.email, input.headline, input.avatar_url)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        tables.users.push(UserRecord {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.user_by_email(email).map(|record| UserCredentials {
            user: record.user.clone(),
            password_hash: record.password_hash.clone(),
        }))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.user(id).map(|record| record.user.clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.store.read().await;
        Ok(tables.users.iter().map(|record| record.user.clone()).collect())
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let mut tables = self.store.write().await;
        if let Some(email) = patch.email.as_deref()
            && tables
                .user_by_email(email)
                .is_some_and(|record| record.user.id != id)
        {
            return Err(DomainError::AlreadyExists(format!("email: {email}")));
        }

        let Some(record) = tables.users.iter_mut().find(|r| r.user.id == id) else {
            return Ok(None);
        };
        let user = &mut record.user;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(headline) = patch.headline {
            user.headline = Some(headline);
        }
        if let Some(avatar_url) = patch.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::MemoryUserRepository;
    use crate::data::user_repository::{NewUser, UserPatch, UserRepository};
    use crate::data::repositories::memory::seed::demo_tables;
    use crate::data::repositories::memory::store::MemoryStore;
    use crate::domain::error::DomainError;

    fn demo_repo() -> MemoryUserRepository {
        MemoryUserRepository::new(MemoryStore::with_tables(demo_tables(Utc::now(), "hash")))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Newcomer".to_string(),
            email: email.to_string(),
            password_hash: "argon-hash".to_string(),
            headline: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn create_user_assigns_next_id_and_stores_hash() {
        let repo = demo_repo();

        let user = repo
            .create_user(new_user("new@example.com"))
            .await
            .expect("create");
        assert_eq!(user.id, 7);

        let creds = repo
            .find_by_email("NEW@example.com")
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(creds.user.id, 7);
        assert_eq!(creds.password_hash, "argon-hash");
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email_in_any_case() {
        let repo = demo_repo();

        let err = repo
            .create_user(new_user("John@Example.com"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert_eq!(repo.list_users().await.expect("list").len(), 6);
    }

    #[tokio::test]
    async fn update_user_keeps_missing_fields_and_guards_email() {
        let repo = demo_repo();

        let updated = repo
            .update_user(
                1,
                UserPatch {
                    headline: Some("Rustacean".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update")
            .expect("exists");
        assert_eq!(updated.name, "John Doe");
        assert_eq!(updated.headline.as_deref(), Some("Rustacean"));

        let err = repo
            .update_user(
                1,
                UserPatch {
                    email: Some("jane@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("taken");
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let same = repo
            .update_user(
                1,
                UserPatch {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("own email is fine");
        assert!(same.is_some());

        assert!(
            repo.update_user(999, UserPatch::default())
                .await
                .expect("update")
                .is_none()
        );
    }
}
