// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into
//! [`AppConfig`] and handed to the components that need it. Business logic
//! never reads the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HS256 token signing secret | Required |
//! | `JWT_TTL_SECS` | Token lifetime in seconds, at most one year | `86400` |
//! | `DATA_DIR` | Directory for the store snapshot | In-memory only |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `FRONTEND_URL` | Allowed CORS origin | Any origin |
//! | `ADMIN_SCOPE` | `any` or `own`: which tenants an admin may upgrade | `any` |
//! | `SEED_DEMO_DATA` | Seed demo tenants and users into an empty store | `false` |
//! | `TLS_CERT_PATH` | PEM certificate chain for HTTPS | Plain HTTP |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | Plain HTTP |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use chrono::Duration;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_TTL_SECS_ENV: &str = "JWT_TTL_SECS";
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";
pub const ADMIN_SCOPE_ENV: &str = "ADMIN_SCOPE";
pub const SEED_DEMO_DATA_ENV: &str = "SEED_DEMO_DATA";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

/// Which tenants an admin may upgrade by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminScope {
    /// Any tenant, as long as the caller is an admin.
    #[default]
    AnyTenant,
    /// Only the admin's own tenant; other slugs look like unknown tenants.
    OwnTenant,
}

impl AdminScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "any" => Some(AdminScope::AnyTenant),
            "own" => Some(AdminScope::OwnTenant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Token signing secret. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: Secret,
    pub token_ttl: Duration,
    pub data_dir: Option<PathBuf>,
    pub frontend_url: Option<String>,
    pub admin_scope: AdminScope,
    pub seed_demo_data: bool,
    pub tls: Option<TlsPaths>,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let jwt_secret = get(JWT_SECRET_ENV)
            .map(Secret::new)
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let token_ttl = match get(JWT_TTL_SECS_ENV) {
            None => Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
                .and_then(Duration::try_seconds)
                .ok_or(ConfigError::Invalid {
                    name: JWT_TTL_SECS_ENV,
                    value: raw.clone(),
                    reason: "expected 1 to 31536000 seconds",
                })?,
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip: IpAddr = host.trim().parse().map_err(|_| ConfigError::Invalid {
            name: HOST_ENV,
            value: host.clone(),
            reason: "expected an IP address",
        })?;

        let port = match get(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw.clone(),
                reason: "expected a port number",
            })?,
        };

        let admin_scope = match get(ADMIN_SCOPE_ENV) {
            None => AdminScope::default(),
            Some(raw) => AdminScope::parse(&raw).ok_or(ConfigError::Invalid {
                name: ADMIN_SCOPE_ENV,
                value: raw.clone(),
                reason: "expected `any` or `own`",
            })?,
        };

        let seed_demo_data = match get(SEED_DEMO_DATA_ENV) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: SEED_DEMO_DATA_ENV,
                value: raw.clone(),
                reason: "expected true/false",
            })?,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (None, None) => None,
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            _ => return Err(ConfigError::IncompleteTls),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            jwt_secret,
            token_ttl,
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from),
            frontend_url: get(FRONTEND_URL_ENV).map(|url| url.trim().trim_end_matches('/').to_string()),
            admin_scope,
            seed_demo_data,
            tls,
        })
    }

    /// Whether the signing secret is shorter than recommended.
    pub fn has_weak_secret(&self) -> bool {
        self.jwt_secret.expose().len() < RECOMMENDED_SECRET_LEN
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
