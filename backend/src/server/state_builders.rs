//! Composition root for the user registry.
//!
//! The store is built here, once per process, and shared with every worker
//! through the registry's `Arc`.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use userbase::domain::UserRegistryService;
use userbase::domain::ports::UserRegistry;
use userbase::inbound::http::state::HttpState;
use userbase::outbound::{InMemoryUserRepository, StorageBackend};

use super::ServerConfig;

/// Failures while assembling application state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("storage backend `{backend}` is not implemented yet; use `memory`")]
    UnsupportedStorage { backend: StorageBackend },
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err)
    }
}

/// Build the user registry over the configured storage backend.
pub fn build_user_registry(
    backend: StorageBackend,
) -> Result<Arc<dyn UserRegistry>, StartupError> {
    match backend {
        StorageBackend::Memory => {
            info!(storage = %backend, "using process-local user storage");
            Ok(Arc::new(UserRegistryService::new(Arc::new(
                InMemoryUserRepository::new(),
            ))))
        }
        // TODO: add a Diesel-backed UserRepository under outbound and wire it here.
        StorageBackend::Relational => Err(StartupError::UnsupportedStorage { backend }),
    }
}

/// Build the shared HTTP state for `config`.
pub fn build_http_state(config: &ServerConfig) -> Result<HttpState, StartupError> {
    let users = build_user_registry(config.storage)?;
    Ok(HttpState::new(users).with_request_timeout(config.request_timeout))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use super::*;
    use rstest::rstest;
    use userbase::domain::{NewUser, RequestContext};

    #[rstest]
    #[tokio::test]
    async fn memory_backend_serves_requests() {
        let registry = build_user_registry(StorageBackend::Memory).expect("memory backend");
        let ctx = RequestContext::background();
        let user = registry
            .create(&ctx, NewUser::default())
            .await
            .expect("create");
        assert_eq!(user.id().get(), 1);
    }

    #[rstest]
    fn relational_backend_fails_fast() {
        let err = build_user_registry(StorageBackend::Relational)
            .err()
            .expect("relational is not available");
        assert!(err.to_string().contains("relational"));
    }

    #[rstest]
    fn http_state_carries_request_timeout() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
            .with_request_timeout(Some(Duration::from_secs(5)));
        let state = build_http_state(&config).expect("state");
        assert_eq!(state.request_timeout(), Some(Duration::from_secs(5)));
    }
}
