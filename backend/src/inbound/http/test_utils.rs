//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use crate::domain::ports::UserRegistry;
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Build an application serving the `/api` routes against `users`.
pub fn test_app(
    users: Arc<dyn UserRegistry>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(users)))
        .wrap(Trace)
        .configure(configure)
}
