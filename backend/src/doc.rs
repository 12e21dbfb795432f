//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer plus the response schemas. The generated
//! document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::responses::{
    CategoryResponse, HabitLogResponse, HabitResponse, HabitStatsResponse, UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Habit tracker backend API",
        description = "HTTP interface for habit tracking: users, categories, habits, and completion logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::upsert_user,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::get_habit,
        crate::inbound::http::habits::update_habit,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::habit_logs::list_logs,
        crate::inbound::http::habit_logs::check_in,
        crate::inbound::http::habit_logs::undo_check_in,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserResponse,
        CategoryResponse,
        HabitResponse,
        HabitStatsResponse,
        HabitLogResponse,
    )),
    tags(
        (name = "users", description = "User profile upserts"),
        (name = "categories", description = "Habit categories"),
        (name = "habits", description = "Habit CRUD with derived statistics"),
        (name = "logs", description = "Completion logs and check-ins"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document structure.

    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn openapi_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/v1/users",
            "/api/v1/categories",
            "/api/v1/habits",
            "/api/v1/habits/{habitId}",
            "/api/v1/habits/{habitId}/logs",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }

    #[test]
    fn openapi_registers_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("Error"));
        assert!(schemas.contains_key("HabitResponse"));
    }
}
