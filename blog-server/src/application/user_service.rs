use tracing::info;

use crate::data::user_repository::{UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{UpdateProfileRequest, User};

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list_users().await
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))
    }

    /// Пустой патч просто возвращает текущий профиль.
    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let req = req.validate()?;
        if req.is_empty() {
            return self.get_user(user_id).await;
        }

        let patch = UserPatch {
            name: req.name,
            email: req.email,
            headline: req.headline,
            avatar_url: req.avatar_url,
        };
        let user = self
            .repo
            .update_user(user_id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))?;
        info!(user_id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::UserService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{UpdateProfileRequest, User};

    #[derive(Clone)]
    struct FakeUserRepo {
        user: User,
        applied_patch: Arc<Mutex<Option<UserPatch>>>,
    }

    impl FakeUserRepo {
        fn new() -> Self {
            Self {
                user: User::new(1, "Jane", "jane@example.com", None, None)
                    .expect("sample user must be valid"),
                applied_patch: Arc::new(Mutex::new(None)),
            }
        }

        fn patch(&self) -> Option<UserPatch> {
            self.applied_patch.lock().expect("patch mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, _input: NewUser) -> Result<User, DomainError> {
            Ok(self.user.clone())
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(None)
        }

        async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
            Ok(Some(self.user.clone()).filter(|user| user.id == id))
        }

        async fn list_users(&self) -> Result<Vec<User>, DomainError> {
            Ok(vec![self.user.clone()])
        }

        async fn update_user(
            &self,
            id: i64,
            patch: UserPatch,
        ) -> Result<Option<User>, DomainError> {
            if id != self.user.id {
                return Ok(None);
            }
            let mut user = self.user.clone();
            if let Some(name) = patch.name.clone() {
                user.name = name;
            }
            *self.applied_patch.lock().expect("patch mutex poisoned") = Some(patch);
            Ok(Some(user))
        }
    }

    #[tokio::test]
    async fn get_user_maps_missing_to_not_found() {
        let service = UserService::new(FakeUserRepo::new());

        assert_eq!(service.get_user(1).await.expect("exists").name, "Jane");
        let err = service.get_user(2).await.expect_err("missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_profile_normalizes_fields() {
        let repo = FakeUserRepo::new();
        let service = UserService::new(repo.clone());

        let user = service
            .update_profile(
                1,
                UpdateProfileRequest {
                    name: Some("  Janet ".to_string()),
                    email: Some(" JANET@Example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(user.name, "Janet");
        let patch = repo.patch().expect("patch applied");
        assert_eq!(patch.email.as_deref(), Some("janet@example.com"));
        assert!(patch.headline.is_none());
    }

    #[tokio::test]
    async fn empty_profile_patch_returns_current_user_without_writing() {
        let repo = FakeUserRepo::new();
        let service = UserService::new(repo.clone());

        let user = service
            .update_profile(1, UpdateProfileRequest::default())
            .await
            .expect("noop");
        assert_eq!(user.name, "Jane");
        assert!(repo.patch().is_none());
    }

    #[tokio::test]
    async fn invalid_profile_fields_are_rejected() {
        let service = UserService::new(FakeUserRepo::new());

        let err = service
            .update_profile(
                1,
                UpdateProfileRequest {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("bad email");
        assert!(matches!(err, DomainError::Validation { field: "email", .. }));
    }
}
