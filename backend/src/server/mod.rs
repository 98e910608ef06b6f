//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use userbase::Trace;
#[cfg(debug_assertions)]
use userbase::doc::ApiDoc;
use userbase::inbound::http::configure;
use userbase::inbound::http::health::{HealthState, live, ready};
use userbase::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over freshly built storage.
///
/// # Errors
/// Returns [`std::io::Error`] when the storage backend is unavailable or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, storage = %config.storage, "listening");
    health_state.mark_ready();
    Ok(server)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use actix_web::rt::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = actix_web::rt::signal::ctrl_c() => {
                        if let Err(error) = result {
                            warn!(%error, "SIGINT handler failed");
                        }
                    }
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable; waiting for SIGINT"),
        }
    }
    if let Err(error) = actix_web::rt::signal::ctrl_c().await {
        warn!(%error, "SIGINT handler failed");
    }
}

/// Drain the server on SIGINT or SIGTERM.
///
/// Liveness fails first so orchestrators stop routing, then in-flight
/// requests are allowed to finish.
pub fn spawn_shutdown_listener(handle: ServerHandle, health_state: web::Data<HealthState>) {
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received; draining");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    async fn probe(uri: &str) -> StatusCode {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let http_state = web::Data::new(build_http_state(&config).expect("state"));
        let app = test::init_service(build_app(web::Data::new(HealthState::new()), http_state))
            .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
            .await
            .status()
    }

    #[rstest]
    #[case("/api/health-check", StatusCode::OK)]
    #[case("/api/users", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn app_routes_are_mounted(#[case] uri: &str, #[case] expected: StatusCode) {
        assert_eq!(probe(uri).await, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn relational_storage_refuses_to_start() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
            .with_storage(userbase::outbound::StorageBackend::Relational);
        let err = create_server(web::Data::new(HealthState::new()), config)
            .err()
            .expect("startup fails");
        assert!(err.to_string().contains("not implemented"));
    }
}
