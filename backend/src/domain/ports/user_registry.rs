//! Driving port for user record use-cases.
//!
//! Inbound adapters depend on this trait only, so HTTP handlers can be tested
//! against a mock without any storage wiring.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, RequestContext, User, UserId};

/// Use-case port mirroring the storage operations one-to-one.
///
/// Every method fails fast with [`crate::domain::ErrorCode::Cancelled`] when
/// the context is already cancelled.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// List every user.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, Error>;

    /// Fetch one user.
    async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, Error>;

    /// Create a user, returning it with its assigned identifier.
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> Result<User, Error>;

    /// Replace a user's attributes.
    async fn update(&self, ctx: &RequestContext, id: UserId, user: NewUser)
    -> Result<User, Error>;

    /// Delete a user, returning the removed record.
    async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<User, Error>;
}
