//! Server Settings
//!
//! Read once at startup from the environment (and `.env`, loaded by `main`).

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use chrono::{TimeDelta, Utc};
use platform::crypto::random_secret;
use platform::token::{DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS, TokenConfig};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_url: String,
    /// Unset means the in-memory user cache
    pub redis_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let secret = match get("SECRET_KEY") {
            Some(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using a random secret for this run");
                random_secret()
            }
            _ => bail!("SECRET_KEY must be set in production"),
        };

        let access_ttl = token_ttl(&get, "ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        let refresh_ttl =
            token_ttl(&get, "REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?;

        let token = TokenConfig {
            algorithm: get("ALGORITHM").unwrap_or_else(|| "HS256".to_string()),
            access_token_ttl: access_ttl,
            refresh_token_ttl: refresh_ttl,
            ..TokenConfig::new(secret)
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            database_url,
            redis_url: get("REDIS_URL").filter(|url| !url.is_empty()),
            frontend_origins,
            auth: AuthConfig::new(token),
        })
    }
}

/// Positive lifetime whose expiry, counted from now, is a representable date
fn token_ttl(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default_secs: i64,
) -> anyhow::Result<TimeDelta> {
    let secs: i64 = parse_or(get, key, default_secs)?;
    if secs <= 0 {
        bail!("{key} must be positive");
    }

    let ttl = TimeDelta::try_seconds(secs).with_context(|| format!("{key}={secs} is too large"))?;
    Utc::now()
        .checked_add_signed(ttl)
        .with_context(|| format!("{key}={secs} puts token expiry out of range"))?;

    Ok(ttl)
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key}={raw}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SECRET_KEY", "s3cret"),
        ])
        .unwrap();

        assert_eq!(settings.port, 8000);
        assert_eq!(settings.redis_url, None);
        assert_eq!(settings.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(settings.auth.token.secret, "s3cret");
        assert_eq!(settings.auth.token.algorithm, "HS256");
        assert_eq!(settings.auth.token.access_token_ttl, TimeDelta::seconds(60));
        assert_eq!(settings.auth.token.refresh_token_ttl, TimeDelta::days(5));
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SECRET_KEY", "s3cret"),
            ("ALGORITHM", "HS512"),
            ("ACCESS_TOKEN_TTL_SECS", "900"),
            ("PORT", "9000"),
            ("REDIS_URL", "redis://localhost:6379"),
            ("FRONTEND_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();

        assert_eq!(settings.port, 9000);
        assert_eq!(settings.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(settings.frontend_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(settings.auth.token.algorithm, "HS512");
        assert_eq!(settings.auth.token.access_token_ttl, TimeDelta::minutes(15));
    }

    #[test]
    fn test_missing_database_url() {
        assert!(settings(&[("SECRET_KEY", "s3cret")]).is_err());
    }

    #[test]
    fn test_invalid_numbers() {
        let base = [
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SECRET_KEY", "s3cret"),
        ];

        let mut vars = base.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(settings(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("ACCESS_TOKEN_TTL_SECS", "0"));
        assert!(settings(&vars).is_err());
    }

    #[test]
    fn test_token_ttl_out_of_range() {
        let base = [
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SECRET_KEY", "s3cret"),
        ];

        // Representable as a duration, but the expiry date is not
        let mut vars = base.to_vec();
        vars.push(("ACCESS_TOKEN_TTL_SECS", "1000000000000000"));
        assert!(settings(&vars).is_err());

        // Not representable as a duration at all
        let mut vars = base.to_vec();
        vars.push(("REFRESH_TOKEN_TTL_SECS", "9223372036854775807"));
        assert!(settings(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("REFRESH_TOKEN_TTL_SECS", "31536000"));
        assert_eq!(
            settings(&vars).unwrap().auth.token.refresh_token_ttl,
            TimeDelta::days(365)
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_random_secret_in_debug() {
        let settings = settings(&[("DATABASE_URL", "postgres://localhost/app")]).unwrap();
        assert_eq!(settings.auth.token.secret.len(), 43);
    }
}
