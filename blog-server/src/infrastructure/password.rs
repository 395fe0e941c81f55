use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::error::DomainError;

const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Argon2id с настраиваемой стоимостью.
#[derive(Debug, Clone)]
pub(crate) struct PasswordService {
    params: Params,
    dummy_hash: String,
}

impl PasswordService {
    pub(crate) fn new(memory_kib: u32, iterations: u32) -> Result<Self, DomainError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        let mut service = Self {
            params,
            dummy_hash: String::new(),
        };
        service.dummy_hash = service.hash(DUMMY_PASSWORD)?;
        Ok(service)
    }

    pub(crate) fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2()
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify(&self, raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        self.argon2()
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })
    }

    /// Burns one verification for a missing account so that unknown emails
    /// take as long as wrong passwords.
    pub(crate) fn verify_dummy(&self, raw_password: &str) -> Result<(), DomainError> {
        match self.verify(raw_password, &self.dummy_hash) {
            Ok(()) | Err(DomainError::InvalidCredentials) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}
