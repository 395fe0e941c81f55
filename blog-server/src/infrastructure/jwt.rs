use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::User;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    pub(crate) const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        self.encode_claims(&Claims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp(),
        })
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Claims, JwtError, JwtService};
    use crate::domain::user::User;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn user() -> User {
        User::new(7, "Jane", "jane@example.com", None, None).expect("valid user")
    }

    #[test]
    fn token_round_trips_identity_claims() {
        let jwt = JwtService::new(SECRET, 60);

        let token = jwt.generate_token(&user()).expect("encode");
        let claims = jwt.verify_token(&token).expect("decode");

        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.name, "Jane");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtService::new("another-secret-another-secret-123", 60)
            .generate_token(&user())
            .expect("encode");

        let err = JwtService::new(SECRET, 60)
            .verify_token(&token)
            .expect_err("must fail");
        assert!(matches!(err, JwtError::Decode(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtService::new(SECRET, 60);
        let token = jwt
            .encode_claims(&Claims {
                id: 7,
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
                exp: (Utc::now() - Duration::minutes(5)).timestamp(),
            })
            .expect("encode");

        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new(SECRET, 0);
        assert_eq!(jwt.ttl_seconds, JwtService::DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn garbage_is_rejected() {
        let jwt = JwtService::new(SECRET, 60);
        assert!(jwt.verify_token("not-a-jwt").is_err());
    }
}
