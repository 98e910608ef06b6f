//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERBASE_*` environment variables and an
//! optional configuration file, in the precedence OrthoConfig applies.
//! String-valued options are validated by the typed accessors.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::{StorageBackend, UnknownStorageBackend};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Deployment environment, selecting the log format and default verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnv {
    /// Human-readable logs at debug level.
    #[default]
    Local,
    /// JSON logs at debug level.
    Dev,
    /// JSON logs at info level.
    Prod,
}

impl AppEnv {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(ConfigError::UnknownEnvironment {
                value: s.to_owned(),
            }),
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown environment `{value}` (expected `local`, `dev` or `prod`)")]
    UnknownEnvironment { value: String },
    #[error(transparent)]
    UnknownStorage(#[from] UnknownStorageBackend),
    #[error("invalid host `{value}`: expected an IP address")]
    InvalidHost { value: String },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Settings controlling the HTTP listener, logging and storage selection.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERBASE")]
pub struct ServerSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Deployment environment: `local`, `dev` or `prod`.
    pub env: Option<String>,
    /// Storage backend: `memory` or `relational`.
    pub storage: Option<String>,
    /// Per-request deadline in milliseconds. Unset means no deadline.
    pub request_timeout_ms: Option<u64>,
    /// File that receives log output instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Configured environment, defaulting to [`AppEnv::Local`].
    pub fn environment(&self) -> Result<AppEnv, ConfigError> {
        self.env
            .as_deref()
            .map_or(Ok(AppEnv::default()), AppEnv::from_str)
    }

    /// Configured storage backend, defaulting to [`StorageBackend::Memory`].
    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        match self.storage.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(StorageBackend::default()),
        }
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost {
                    value: raw.to_owned(),
                })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port))
    }

    /// Per-request deadline budget, if configured.
    pub fn request_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.request_timeout_ms {
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(ms) => Ok(Some(Duration::from_millis(ms))),
            None => Ok(None),
        }
    }
}
