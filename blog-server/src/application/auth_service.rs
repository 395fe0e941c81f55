use std::sync::Arc;

use tracing::{debug, info};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;

const DEFAULT_HEADLINE: &str = "New User";
const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
    passwords: PasswordService,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>, passwords: PasswordService) -> Self {
        Self {
            repo,
            jwt,
            passwords,
        }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let password_hash = self.passwords.hash(&req.password)?;
        let user = self
            .repo
            .create_user(Self::into_new_user(req, password_hash))
            .await?;
        info!(user_id = user.id, "user registered");

        let access_token = self.issue_token(&user)?;
        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_email(&req.email).await? {
            Some(user_creds) => user_creds,
            None => {
                // стремимся к одинаковому времени проверки если user не найден
                self.passwords.verify_dummy(&req.password)?;
                debug!("login for unknown email");
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.passwords
            .verify(&req.password, &user_creds.password_hash)?;

        let access_token = self.issue_token(&user_creds.user)?;
        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    /// Resolves a bearer token to a live user. Any failure is `Unauthorized`.
    pub(crate) async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.jwt.verify_token(token).map_err(|err| {
            debug!(error = %err, "token rejected");
            DomainError::Unauthorized
        })?;
        self.current_user(claims.id).await
    }

    pub(crate) async fn current_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .get_user(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(user)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn into_new_user(req: RegisterRequest, password_hash: String) -> NewUser {
        NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            headline: Some(DEFAULT_HEADLINE.to_string()),
            avatar_url: Some(DEFAULT_AVATAR_URL.to_string()),
        }
    }
}
