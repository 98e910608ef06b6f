//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the [`UserRegistry`] port and remain testable without storage.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::UserRegistry;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRegistry>,
    request_timeout: Option<Duration>,
}

impl HttpState {
    /// Construct state around the user registry with no request deadline.
    pub fn new(users: Arc<dyn UserRegistry>) -> Self {
        Self {
            users,
            request_timeout: None,
        }
    }

    /// Give every request context a deadline `timeout` after it is extracted.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Deadline budget applied to each request, if configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
