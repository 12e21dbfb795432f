//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppConfig;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer, Scope};
use color_eyre::eyre::{Result, WrapErr};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::categories::list_categories;
use crate::inbound::http::habit_logs::{check_in, list_logs, undo_check_in};
use crate::inbound::http::habits::{create_habit, delete_habit, get_habit, list_habits, update_habit};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::upsert_user;
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// All REST endpoints mounted under `/api/v1`.
///
/// Exposed so integration tests assemble the exact routing the server uses.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(upsert_user)
        .service(list_categories)
        .service(list_habits)
        .service(create_habit)
        .service(get_habit)
        .service(update_habit)
        .service(delete_habit)
        .service(list_logs)
        .service(check_in)
        .service(undo_check_in)
}

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
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct the Actix HTTP server from configuration.
///
/// Applies pending migrations and seeds the default categories before the
/// listener is bound, then marks the health state ready.
///
/// # Errors
/// Fails when the database is unreachable, migrations cannot be applied, or
/// the socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: AppConfig,
) -> Result<Server> {
    let http_state = web::Data::new(build_http_state(&config).await?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind((config.host(), config.port()))
    .wrap_err_with(|| format!("failed to bind {}:{}", config.host(), config.port()))?
    .run();

    health_state.mark_ready();
    Ok(server)
}
