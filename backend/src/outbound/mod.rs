//! Outbound adapters implementing domain ports for storage.
//!
//! Adapters are thin translators between domain types and a concrete store.
//! They hold no business rules: cancellation checks and error classification
//! live in the domain service.
//!
//! - **memory**: process-local store guarded by a single mutex.
//! - **relational**: selectable by name but not yet implemented.

mod memory;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use memory::InMemoryUserRepository;

/// Storage backends the server can be started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// [`InMemoryUserRepository`]; data lives for the process lifetime.
    #[default]
    Memory,
    /// SQL-backed storage. Startup fails when this is selected.
    Relational,
}

impl StorageBackend {
    /// Configuration name of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Relational => "relational",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a configured backend name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown storage backend `{value}` (expected `memory` or `relational`)")]
pub struct UnknownStorageBackend {
    value: String,
}

impl FromStr for StorageBackend {
    type Err = UnknownStorageBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "relational" => Ok(Self::Relational),
            _ => Err(UnknownStorageBackend {
                value: s.to_owned(),
            }),
        }
    }
}
