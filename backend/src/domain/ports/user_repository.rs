//! Port abstraction for user storage adapters and their errors.
//!
//! Adapters report failures through [`UserPersistenceError`] so callers can
//! classify them by variant instead of inspecting messages.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewUser, RequestContext, User, UserId};

/// Persistence errors raised by user storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// No user is stored under the identifier.
    #[error("user {id} not found")]
    NotFound { id: UserId },
    /// A secondary uniqueness constraint rejected the write.
    #[error("user already exists: {message}")]
    AlreadyExists { message: String },
    /// Backing store connection could not be established.
    #[error("user storage connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user storage query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Build a [`UserPersistenceError::NotFound`].
    pub fn not_found(id: impl Into<UserId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Build a [`UserPersistenceError::AlreadyExists`].
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    /// Build a [`UserPersistenceError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserPersistenceError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Whether the error reports a missing user.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the error reports a uniqueness conflict.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Storage contract for user records.
///
/// Implementations must apply each mutation atomically: no caller may observe
/// a partially applied insert, update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user. Order is unspecified; an empty store yields
    /// an empty vector.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: UserId,
    ) -> Result<User, UserPersistenceError>;

    /// Store a new user under a freshly allocated identifier.
    async fn insert(&self, ctx: &RequestContext, user: NewUser)
    -> Result<User, UserPersistenceError>;

    /// Replace every attribute of an existing user, keeping its identifier.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        user: NewUser,
    ) -> Result<User, UserPersistenceError>;

    /// Remove a user, returning the record as it was stored.
    async fn delete(&self, ctx: &RequestContext, id: UserId)
    -> Result<User, UserPersistenceError>;
}
