//! User registry domain service.
//!
//! Implements the [`UserRegistry`] driving port on top of any
//! [`UserRepository`]. The service owns two concerns: refusing work for
//! cancelled contexts and translating storage failures into domain errors
//! tagged with the operation that produced them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use crate::domain::ports::{UserPersistenceError, UserRegistry, UserRepository};
use crate::domain::{Error, NewUser, RequestContext, User, UserId};

const LIST_OP: &str = "users.list";
const GET_OP: &str = "users.get";
const CREATE_OP: &str = "users.create";
const UPDATE_OP: &str = "users.update";
const DELETE_OP: &str = "users.delete";

/// User registry service implementing the driving port.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use userbase::domain::ports::UserRegistry;
/// use userbase::domain::{NewUser, RequestContext, UserRegistryService};
/// use userbase::outbound::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = UserRegistryService::new(Arc::new(InMemoryUserRepository::new()));
/// let ctx = RequestContext::background();
/// let user = service
///     .create(&ctx, NewUser::default().with_attribute("name", "Alice"))
///     .await
///     .expect("insert succeeds");
/// assert_eq!(user.id().get(), 1);
/// # });
/// ```
pub struct UserRegistryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserRegistryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserRegistryService<R> {
    /// Create a new service backed by the given repository.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserRegistryService<R>
where
    R: UserRepository + ?Sized,
{
    fn ensure_active(ctx: &RequestContext, operation: &'static str) -> Result<(), Error> {
        match ctx.cancellation() {
            Some(reason) => {
                debug!(operation, %reason, "skipping storage call for cancelled context");
                Err(Error::cancelled(format!("{operation}: {reason}")))
            }
            None => Ok(()),
        }
    }

    fn map_persistence_error(operation: &'static str, err: UserPersistenceError) -> Error {
        match err {
            UserPersistenceError::NotFound { .. } => {
                warn!(operation, error = %err, "user not found");
                Error::not_found(format!("{operation}: {err}"))
            }
            UserPersistenceError::AlreadyExists { .. } => {
                warn!(operation, error = %err, "user already exists");
                Error::already_exists(format!("{operation}: {err}"))
            }
            UserPersistenceError::Connection { .. } | UserPersistenceError::Query { .. } => {
                error!(operation, error = %err, "user storage failed");
                Error::internal(format!("{operation}: {err}"))
            }
        }
    }
}

#[async_trait]
impl<R> UserRegistry for UserRegistryService<R>
where
    R: UserRepository + ?Sized,
{
    #[instrument(skip(self, ctx))]
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, Error> {
        Self::ensure_active(ctx, LIST_OP)?;
        self.repository
            .list(ctx)
            .await
            .map_err(|err| Self::map_persistence_error(LIST_OP, err))
    }

    #[instrument(skip(self, ctx), fields(user_id = %id))]
    async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, Error> {
        Self::ensure_active(ctx, GET_OP)?;
        self.repository
            .find_by_id(ctx, id)
            .await
            .map_err(|err| Self::map_persistence_error(GET_OP, err))
    }

    #[instrument(skip(self, ctx, user))]
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> Result<User, Error> {
        Self::ensure_active(ctx, CREATE_OP)?;
        let created = self
            .repository
            .insert(ctx, user)
            .await
            .map_err(|err| Self::map_persistence_error(CREATE_OP, err))?;
        debug!(user_id = %created.id(), "user created");
        Ok(created)
    }

    #[instrument(skip(self, ctx, user), fields(user_id = %id))]
    async fn update(&self, ctx: &RequestContext, id: UserId, user: NewUser) -> Result<User, Error> {
        Self::ensure_active(ctx, UPDATE_OP)?;
        self.repository
            .update(ctx, id, user)
            .await
            .map_err(|err| Self::map_persistence_error(UPDATE_OP, err))
    }

    #[instrument(skip(self, ctx), fields(user_id = %id))]
    async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<User, Error> {
        Self::ensure_active(ctx, DELETE_OP)?;
        self.repository
            .delete(ctx, id)
            .await
            .map_err(|err| Self::map_persistence_error(DELETE_OP, err))
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
