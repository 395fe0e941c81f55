use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) password_confirmation: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let email = normalize_email(&self.email)?;
        if self.password.chars().count() < 6 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be at least 6 characters",
            });
        }
        if self.password != self.password_confirmation {
            return Err(DomainError::Validation {
                field: "password_confirmation",
                message: "password confirmation does not match",
            });
        }
        Ok(Self {
            name,
            email,
            password: self.password,
            password_confirmation: self.password_confirmation,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "password is required",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) headline: Option<String>,
    pub(crate) avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.as_deref().map(normalize_name).transpose()?;
        let email = self.email.as_deref().map(normalize_email).transpose()?;
        let headline = self.headline.as_deref().map(normalize_headline).transpose()?;
        let avatar_url = self.avatar_url.map(|url| url.trim().to_string());

        Ok(Self {
            name,
            email,
            headline,
            avatar_url,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.headline.is_none()
            && self.avatar_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) headline: Option<String>,
    pub(crate) avatar_url: Option<String>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        headline: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let name = normalize_name(&name.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            name,
            email,
            headline,
            avatar_url,
        })
    }
}

/// Snapshot of a user embedded into posts and comments at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) headline: Option<String>,
    pub(crate) avatar_url: Option<String>,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            headline: user.headline.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..100 chars",
        });
    }
    Ok(name.to_string())
}

fn normalize_headline(headline: &str) -> Result<String, DomainError> {
    let headline = headline.trim();
    if headline.chars().count() > 200 {
        return Err(DomainError::Validation {
            field: "headline",
            message: "must be at most 200 chars",
        });
    }
    Ok(headline.to_string())
}

pub(crate) fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "invalid email format",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::{
        Author, DomainError, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
        normalize_email, normalize_name,
    };

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "Valid Name", "test@example.com", None, None);
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn name_rules_are_applied() {
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name(&"x".repeat(101)).is_err());
        assert_eq!(normalize_name("  Jane  ").expect("must be valid"), "Jane");
    }

    #[test]
    fn register_checks_password_length_and_confirmation() {
        let short = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "12345".to_string(),
            password_confirmation: "12345".to_string(),
        };
        assert_validation_field(short.validate().expect_err("too short"), "password");

        let mismatch = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret-1".to_string(),
            password_confirmation: "secret-2".to_string(),
        };
        assert_validation_field(
            mismatch.validate().expect_err("mismatch"),
            "password_confirmation",
        );

        let ok = RegisterRequest {
            name: "  Jane  ".to_string(),
            email: " JANE@example.com ".to_string(),
            password: "secret-1".to_string(),
            password_confirmation: "secret-1".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.name, "Jane");
        assert_eq!(validated.email, "jane@example.com");
    }

    #[test]
    fn login_requires_password() {
        let req = LoginRequest {
            email: "john@example.com".to_string(),
            password: String::new(),
        };
        assert_validation_field(req.validate().expect_err("empty password"), "password");
    }

    #[test]
    fn update_profile_normalizes_present_fields_only() {
        let req = UpdateProfileRequest {
            name: Some("  New Name ".to_string()),
            headline: Some("  Rustacean  ".to_string()),
            ..Default::default()
        };
        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.name.as_deref(), Some("New Name"));
        assert_eq!(validated.headline.as_deref(), Some("Rustacean"));
        assert!(validated.email.is_none());
        assert!(!validated.is_empty());
        assert!(UpdateProfileRequest::default().is_empty());
    }

    #[test]
    fn author_snapshot_copies_user_fields() {
        let user = User::new(
            3,
            "Mike",
            "mike@example.com",
            Some("Designer".to_string()),
            None,
        )
        .expect("valid user");
        let author = Author::from(&user);
        assert_eq!(author.id, 3);
        assert_eq!(author.name, "Mike");
        assert_eq!(author.headline.as_deref(), Some("Designer"));
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected DomainError::Validation, got {other:?}"),
        }
    }
}
