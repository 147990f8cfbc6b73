// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory for the file-backed article store | unset (in-memory) |
//! | `AUTH_JWT_SECRET` | HS256 shared secret | one of secret/public key required |
//! | `AUTH_JWT_PUBLIC_KEY_PATH` | RS256 PEM public key file | one of secret/public key required |
//! | `AUTH_ISSUER` | Expected JWT issuer claim | Optional |
//! | `AUTH_AUDIENCE` | Expected JWT audience claim | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::AuthConfig;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the article data directory.
///
/// When unset, articles live in memory and are lost on restart.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const AUTH_JWT_SECRET_ENV: &str = "AUTH_JWT_SECRET";
pub const AUTH_JWT_PUBLIC_KEY_PATH_ENV: &str = "AUTH_JWT_PUBLIC_KEY_PATH";
pub const AUTH_ISSUER_ENV: &str = "AUTH_ISSUER";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid value: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("either {AUTH_JWT_SECRET_ENV} or {AUTH_JWT_PUBLIC_KEY_PATH_ENV} must be set")]
    MissingAuthKey,

    #[error("failed to read public key {path}: {source}")]
    PublicKeyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid public key {path}: {source}")]
    PublicKeyInvalid {
        path: PathBuf,
        source: jsonwebtoken::errors::Error,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Where the verification key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthKeySource {
    Secret(String),
    PublicKeyPath(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub auth_key: AuthKeySource,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidValue {
                name: LOG_FORMAT_ENV,
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        // The shared secret wins when both are configured
        let auth_key = match (get(AUTH_JWT_SECRET_ENV), get(AUTH_JWT_PUBLIC_KEY_PATH_ENV)) {
            (Some(secret), _) => AuthKeySource::Secret(secret),
            (None, Some(path)) => AuthKeySource::PublicKeyPath(PathBuf::from(path)),
            (None, None) => return Err(ConfigError::MissingAuthKey),
        };

        Ok(Self {
            host,
            port,
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from),
            auth_key,
            auth_issuer: get(AUTH_ISSUER_ENV),
            auth_audience: get(AUTH_AUDIENCE_ENV),
            log_format,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: HOST_ENV,
                value: self.host.clone(),
            })
    }

    /// Build the token verification settings, reading the PEM file if needed.
    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        let mut config = match &self.auth_key {
            AuthKeySource::Secret(secret) => AuthConfig::hmac(secret),
            AuthKeySource::PublicKeyPath(path) => {
                let pem = std::fs::read(path).map_err(|source| ConfigError::PublicKeyRead {
                    path: path.clone(),
                    source,
                })?;
                AuthConfig::rsa_pem(pem).map_err(|source| ConfigError::PublicKeyInvalid {
                    path: path.clone(),
                    source,
                })?
            }
        };

        if let Some(issuer) = &self.auth_issuer {
            config = config.with_issuer(issuer);
        }
        if let Some(audience) = &self.auth_audience {
            config = config.with_audience(audience);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_with_only_a_secret() {
        let config = load(&[(AUTH_JWT_SECRET_ENV, "s3cret")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.auth_key, AuthKeySource::Secret("s3cret".into()));
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingAuthKey)));
        assert!(matches!(
            load(&[(AUTH_JWT_SECRET_ENV, "  ")]),
            Err(ConfigError::MissingAuthKey)
        ));
    }

    #[test]
    fn explicit_values_are_read() {
        let config = load(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (DATA_DIR_ENV, "/var/lib/blog"),
            (AUTH_JWT_PUBLIC_KEY_PATH_ENV, "/etc/blog/jwt.pem"),
            (AUTH_ISSUER_ENV, "https://issuer.example"),
            (AUTH_AUDIENCE_ENV, "blog"),
            (LOG_FORMAT_ENV, "JSON"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/blog")));
        assert_eq!(
            config.auth_key,
            AuthKeySource::PublicKeyPath(PathBuf::from("/etc/blog/jwt.pem"))
        );
        assert_eq!(config.auth_issuer.as_deref(), Some("https://issuer.example"));
        assert_eq!(config.auth_audience.as_deref(), Some("blog"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[(AUTH_JWT_SECRET_ENV, "s"), (PORT_ENV, "eighty")]),
            Err(ConfigError::InvalidValue { name: PORT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(AUTH_JWT_SECRET_ENV, "s"), (LOG_FORMAT_ENV, "xml")]),
            Err(ConfigError::InvalidValue { name: LOG_FORMAT_ENV, .. })
        ));
    }

    #[test]
    fn auth_config_carries_issuer_and_audience() {
        let config = load(&[
            (AUTH_JWT_SECRET_ENV, "s3cret"),
            (AUTH_ISSUER_ENV, "iss"),
            (AUTH_AUDIENCE_ENV, "aud"),
        ])
        .unwrap();

        let auth = config.auth_config().unwrap();
        assert_eq!(auth.issuer.as_deref(), Some("iss"));
        assert_eq!(auth.audience.as_deref(), Some("aud"));
    }

    #[test]
    fn unreadable_public_key_is_reported() {
        let config = load(&[(AUTH_JWT_PUBLIC_KEY_PATH_ENV, "/nonexistent/key.pem")]).unwrap();
        assert!(matches!(
            config.auth_config(),
            Err(ConfigError::PublicKeyRead { .. })
        ));
    }
}
