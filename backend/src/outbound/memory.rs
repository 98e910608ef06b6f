//! Process-local user storage.
//!
//! Every operation takes one mutex, so each mutation is atomic and all
//! callers observe a single total order of writes. Identifiers come from a
//! counter that starts at [`UserId::FIRST`] and only moves forward; deleted
//! identifiers are never handed out again.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, RequestContext, User, UserId};

#[derive(Debug)]
struct MemoryState {
    users: BTreeMap<UserId, User>,
    next_id: Option<UserId>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: Some(UserId::FIRST),
        }
    }
}

/// In-memory [`UserRepository`] owned by the composition root.
///
/// # Examples
/// ```
/// use userbase::domain::ports::UserRepository;
/// use userbase::domain::{NewUser, RequestContext};
/// use userbase::outbound::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let ctx = RequestContext::background();
/// let first = repo.insert(&ctx, NewUser::default()).await.expect("insert");
/// let second = repo.insert(&ctx, NewUser::default()).await.expect("insert");
/// assert_eq!((first.id().get(), second.id().get()), (1, 2));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryUserRepository {
    /// Create an empty store whose first insert receives id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `users`, assigning ids 1..=N in order.
    ///
    /// Seeds beyond the identifier space are dropped.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = NewUser>) -> Self {
        let mut state = MemoryState::default();
        for draft in users {
            let Some(id) = state.next_id else { break };
            state.next_id = id.next();
            state.users.insert(id, User::new(id, draft));
        }
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, _ctx: &RequestContext) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock()?;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        _ctx: &RequestContext,
        id: UserId,
    ) -> Result<User, UserPersistenceError> {
        let state = self.lock()?;
        state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }

    async fn insert(
        &self,
        _ctx: &RequestContext,
        user: NewUser,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        let id = state
            .next_id
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        state.next_id = id.next();
        let stored = User::new(id, user);
        state.users.insert(id, stored.clone());
        debug!(user_id = %id, "stored user");
        Ok(stored)
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        id: UserId,
        user: NewUser,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        let slot = state
            .users
            .get_mut(&id)
            .ok_or_else(|| UserPersistenceError::not_found(id))?;
        *slot = User::new(id, user);
        Ok(slot.clone())
    }

    async fn delete(
        &self,
        _ctx: &RequestContext,
        id: UserId,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        state
            .users
            .remove(&id)
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }
}

#[cfg(test)]
mod tests;
