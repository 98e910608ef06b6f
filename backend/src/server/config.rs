//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use userbase::config::{ConfigError, ServerSettings};
use userbase::outbound::StorageBackend;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageBackend,
    pub(crate) request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage and no deadline.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: StorageBackend::default(),
            request_timeout: None,
        }
    }

    /// Select the storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Apply a per-request deadline budget.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate loaded settings into a server configuration.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.bind_addr()?)
            .with_storage(settings.storage_backend()?)
            .with_request_timeout(settings.request_timeout()?))
    }
}
