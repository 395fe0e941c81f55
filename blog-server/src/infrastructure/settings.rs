use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub max_image_bytes: usize,
    pub seed_demo_data: bool,
    pub seed_user_password: String,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let jwt_secret = env.required("JWT_SECRET")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }
        let jwt_ttl_seconds: i64 = env
            .or("JWT_TTL_SECONDS", "86400")
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        let http_addr = env.or("HTTP_ADDR", "0.0.0.0:8080");
        let cors_origins = parse_cors_origins(&env.or("CORS_ORIGINS", "*"));
        let log_level = env.or("LOG_LEVEL", "info");
        let http_request_body_limit_bytes =
            env.positive("HTTP_REQUEST_BODY_LIMIT_BYTES", 6 * 1024 * 1024)?;
        let http_concurrency_limit = env.positive("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = env.positive("HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let max_image_bytes = env.positive("MAX_IMAGE_BYTES", 5 * 1024 * 1024)?;

        if max_image_bytes >= http_request_body_limit_bytes {
            return Err(anyhow!(
                "MAX_IMAGE_BYTES must be smaller than HTTP_REQUEST_BODY_LIMIT_BYTES"
            ));
        }

        let seed_demo_data = parse_bool("SEED_DEMO_DATA", &env.or("SEED_DEMO_DATA", "true"))?;
        let seed_user_password = env.or("SEED_USER_PASSWORD", "password123");
        let argon2_memory_kib = env.positive("ARGON2_MEMORY_KIB", 19 * 1024)?;
        let argon2_iterations = env.positive("ARGON2_ITERATIONS", 2)?;

        Ok(Self {
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            max_image_bytes,
            seed_demo_data,
            seed_user_password,
            argon2_memory_kib,
            argon2_iterations,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &str) -> Result<String> {
        let value = (self.0)(key).with_context(|| format!("{key} is required"))?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(anyhow!("{key} must not be empty"));
        }
        Ok(value)
    }

    fn or(&self, key: &str, default: &str) -> String {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn positive<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + PartialEq + Default + ToString,
    {
        let value = self
            .or(key, &default.to_string())
            .parse::<T>()
            .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?;

        if value == T::default() {
            return Err(anyhow!("{key} must be > 0"));
        }
        Ok(value)
    }
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("Failed to parse {key}, expecting boolean")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let s = settings(&[("JWT_SECRET", SECRET)]).expect("valid settings");

        assert_eq!(s.jwt_ttl_seconds, 86_400);
        assert_eq!(s.http_addr, "0.0.0.0:8080");
        assert_eq!(s.cors_origins, vec!["*"]);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.http_request_body_limit_bytes, 6 * 1024 * 1024);
        assert_eq!(s.max_image_bytes, 5 * 1024 * 1024);
        assert!(s.seed_demo_data);
        assert_eq!(s.seed_user_password, "password123");
        assert_eq!(s.argon2_memory_kib, 19 * 1024);
        assert_eq!(s.argon2_iterations, 2);
    }

    #[test]
    fn secret_is_required_and_long_enough() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("JWT_SECRET", "   ")]).is_err());
        assert!(settings(&[("JWT_SECRET", "short")]).is_err());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let s = settings(&[
            ("JWT_SECRET", SECRET),
            ("CORS_ORIGINS", " http://a.test , ,http://b.test"),
        ])
        .expect("valid settings");
        assert_eq!(s.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn numeric_values_must_be_positive_integers() {
        assert!(settings(&[("JWT_SECRET", SECRET), ("HTTP_CONCURRENCY_LIMIT", "0")]).is_err());
        assert!(settings(&[("JWT_SECRET", SECRET), ("HTTP_REQUEST_TIMEOUT_SECS", "ten")]).is_err());
        assert!(settings(&[("JWT_SECRET", SECRET), ("JWT_TTL_SECONDS", "abc")]).is_err());
    }

    #[test]
    fn image_limit_must_fit_into_body_limit() {
        let err = settings(&[
            ("JWT_SECRET", SECRET),
            ("HTTP_REQUEST_BODY_LIMIT_BYTES", "1000"),
            ("MAX_IMAGE_BYTES", "1000"),
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn seed_flag_accepts_common_spellings() {
        let off = settings(&[("JWT_SECRET", SECRET), ("SEED_DEMO_DATA", "false")])
            .expect("valid settings");
        assert!(!off.seed_demo_data);

        let on = settings(&[("JWT_SECRET", SECRET), ("SEED_DEMO_DATA", "YES")])
            .expect("valid settings");
        assert!(on.seed_demo_data);

        assert!(settings(&[("JWT_SECRET", SECRET), ("SEED_DEMO_DATA", "maybe")]).is_err());
    }
}
