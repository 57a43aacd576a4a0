/*
 * Responsibility
 * - Read environment / .env settings (bind port, token key, claim policy, transport limits)
 * - Validate them once at startup (missing or invalid => startup failure)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::services::auth::token::MAX_LEEWAY_SECONDS;

pub const DEFAULT_PUBLIC_KEY_PATH: &str = "rs256.rsa.pub";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the platform's RSA public key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    Pem(String),
    File(PathBuf),
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Pem(_) => write!(f, "inline PEM"),
            KeySource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub token_public_key: KeySource,
    pub token_leeway_seconds: u64,
    pub token_issuer: Option<String>,
    pub token_audience: Option<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        // Inline PEM wins over the key file.
        let token_public_key = match get("TOKEN_PUBLIC_KEY_PEM") {
            Some(pem) => KeySource::Pem(pem.replace("\\n", "\n")),
            None => KeySource::File(PathBuf::from(
                get("TOKEN_PUBLIC_KEY_PATH").unwrap_or_else(|| DEFAULT_PUBLIC_KEY_PATH.to_string()),
            )),
        };

        let token_leeway_seconds = match get("TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|v| *v <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let token_issuer = get("TOKEN_ISSUER");
        let token_audience = get("TOKEN_AUDIENCE");

        let request_timeout_seconds = get("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        let request_body_limit_bytes = get("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(64 * 1024);

        Ok(Self {
            addr,
            app_env,
            token_public_key,
            token_leeway_seconds,
            token_issuer,
            token_audience,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(
            config.token_public_key,
            KeySource::File(PathBuf::from(DEFAULT_PUBLIC_KEY_PATH))
        );
        assert_eq!(config.token_leeway_seconds, 0);
        assert_eq!(config.token_issuer, None);
        assert_eq!(config.token_audience, None);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.request_body_limit_bytes, 64 * 1024);
    }

    #[test]
    fn inline_pem_takes_precedence_over_path() {
        let config = config_from(&[
            ("TOKEN_PUBLIC_KEY_PEM", "-----BEGIN PUBLIC KEY-----\\nabc\\n-----END PUBLIC KEY-----"),
            ("TOKEN_PUBLIC_KEY_PATH", "/etc/keys/platform.pub"),
        ])
        .unwrap();
        assert_eq!(
            config.token_public_key,
            KeySource::Pem("-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----".into())
        );
    }

    #[test]
    fn reads_policy_and_env() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("TOKEN_PUBLIC_KEY_PATH", "/etc/keys/platform.pub"),
            ("TOKEN_LEEWAY_SECONDS", "5"),
            ("TOKEN_ISSUER", "https://lms.example.edu"),
            ("TOKEN_AUDIENCE", "  "),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.token_public_key,
            KeySource::File(PathBuf::from("/etc/keys/platform.pub"))
        );
        assert_eq!(config.token_leeway_seconds, 5);
        assert_eq!(config.token_issuer.as_deref(), Some("https://lms.example.edu"));
        assert_eq!(config.token_audience, None);
    }

    #[test]
    fn invalid_numbers_fail_startup() {
        assert_eq!(
            config_from(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            config_from(&[("TOKEN_LEEWAY_SECONDS", "-1")]).unwrap_err(),
            ConfigError::Invalid("TOKEN_LEEWAY_SECONDS")
        );
        assert_eq!(
            config_from(&[("TOKEN_LEEWAY_SECONDS", "18446744073709551615")]).unwrap_err(),
            ConfigError::Invalid("TOKEN_LEEWAY_SECONDS")
        );
        assert_eq!(
            config_from(&[("TOKEN_LEEWAY_SECONDS", "86401")]).unwrap_err(),
            ConfigError::Invalid("TOKEN_LEEWAY_SECONDS")
        );
        assert_eq!(
            config_from(&[("TOKEN_LEEWAY_SECONDS", "86400")])
                .unwrap()
                .token_leeway_seconds,
            MAX_LEEWAY_SECONDS
        );
    }

    #[test]
    fn key_source_display_hides_pem() {
        let source = KeySource::Pem("-----BEGIN PUBLIC KEY-----".into());
        assert_eq!(source.to_string(), "inline PEM");
        assert_eq!(format!("{source:?}"), "inline PEM");
    }
}
