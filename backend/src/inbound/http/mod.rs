//! HTTP inbound adapter exposing the REST endpoints.

pub mod context;
pub mod error;
pub mod health;
pub mod response;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope: the health check and the user resource.
///
/// Handlers expect a `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use userbase::domain::UserRegistryService;
/// use userbase::inbound::http::{configure, state::HttpState};
/// use userbase::outbound::InMemoryUserRepository;
///
/// let service = UserRegistryService::new(Arc::new(InMemoryUserRepository::new()));
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::new(Arc::new(service))))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .service(users::list_users)
            .service(users::create_user)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
