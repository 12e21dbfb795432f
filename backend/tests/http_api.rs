//! End-to-end tests for the REST surface.
//!
//! Drives the real Actix routing over the in-memory adapters and asserts the
//! JSON envelopes, status codes, and error taxonomy the frontend depends on.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::StatusCode, test, web, App};
use backend::domain::{HabitService, UserService};
use backend::outbound::memory::{
    MemoryCategoryRepository, MemoryHabitLogRepository, MemoryHabitRepository, MemoryStore,
    MemoryUserRepository,
};
use backend::domain::ports::CategoryRepository;
use backend::domain::DEFAULT_CATEGORIES;
use backend::inbound::http::state::HttpState;
use backend::server::api_scope;
use backend::Trace;
use serde_json::{json, Value};

async fn build_state() -> HttpState {
    let store = MemoryStore::new();
    let category_repo = Arc::new(MemoryCategoryRepository::new(store.clone()));
    category_repo
        .seed_defaults(&DEFAULT_CATEGORIES)
        .await
        .expect("seed categories");
    let user_repo = Arc::new(MemoryUserRepository::new(store.clone()));
    let habit_service = HabitService::new(
        user_repo.clone(),
        category_repo,
        Arc::new(MemoryHabitRepository::new(store.clone())),
        Arc::new(MemoryHabitLogRepository::new(store)),
        Arc::new(mockable::DefaultClock),
    );
    HttpState::new(habit_service, UserService::new(user_repo))
}

async fn spawn_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = build_state().await;
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

async fn create_user(app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>) {
    let request = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "id": "auth0|tester",
            "email": "ada@example.com",
            "name": "Ada",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn create_habit(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Value {
    let categories_request = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let categories: Value = test::call_and_read_body_json(app, categories_request).await;
    let category_id = categories[0]["id"].as_str().expect("category id");

    let request = test::TestRequest::post()
        .uri("/api/v1/habits")
        .set_json(json!({
            "userId": "auth0|tester",
            "name": "Read",
            "description": "Ten pages",
            "categoryId": category_id,
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

#[actix_web::test]
async fn user_upsert_returns_the_stored_profile() {
    let app = spawn_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "id": "auth0|tester",
            "email": "ada@example.com",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["id"], "auth0|tester");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["createdAt"].is_string());
}

#[actix_web::test]
async fn user_upsert_without_email_is_a_bad_request() {
    let app = spawn_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "id": "auth0|tester" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "email");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn categories_are_seeded_and_sorted_by_name() {
    let app = spawn_app().await;

    let request = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|category| category["name"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec![
            "Creative",
            "Health",
            "Learning",
            "Mindfulness",
            "Productivity",
            "Social"
        ]
    );
}

#[actix_web::test]
async fn habit_creation_returns_the_full_overview_shape() {
    let app = spawn_app().await;
    create_user(&app).await;

    let habit = create_habit(&app).await;
    assert_eq!(habit["name"], "Read");
    assert_eq!(habit["userId"], "auth0|tester");
    assert_eq!(habit["isActive"], true);
    assert_eq!(habit["stats"]["currentStreak"], 0);
    assert_eq!(habit["stats"]["completionRate"], 0);
    assert_eq!(habit["stats"]["completedToday"], false);
    assert_eq!(habit["logs"], json!([]));
    assert_eq!(habit["color"], habit["category"]["color"]);
}

#[actix_web::test]
async fn habit_list_requires_a_user_id() {
    let app = spawn_app().await;

    let request = test::TestRequest::get().uri("/api/v1/habits").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "userId");
}

#[actix_web::test]
async fn habit_list_rejects_unknown_filter_buckets() {
    let app = spawn_app().await;

    let request = test::TestRequest::get()
        .uri("/api/v1/habits?userId=auth0%7Ctester&rate=extreme")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_filter");
    assert_eq!(body["details"]["value"], "extreme");
}

#[actix_web::test]
async fn another_users_habit_reads_as_not_found() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let uri = format!("/api/v1/habits/{habit_id}?userId=auth0%7Cintruder");
    let request = test::TestRequest::get().uri(&uri).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "habit not found");
}

#[actix_web::test]
async fn a_malformed_habit_id_is_a_bad_request_not_a_500() {
    let app = spawn_app().await;

    let request = test::TestRequest::get()
        .uri("/api/v1/habits/not-a-uuid?userId=auth0%7Ctester")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn double_check_in_answers_conflict_with_the_day() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let uri = format!("/api/v1/habits/{habit_id}/logs");
    let payload = json!({
        "userId": "auth0|tester",
        "completedDate": "2024-01-05",
    });

    let request = test::TestRequest::post()
        .uri(&uri)
        .set_json(payload.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log: Value = test::read_body_json(response).await;
    assert_eq!(log["completedDate"], "2024-01-05");

    let request = test::TestRequest::post().uri(&uri).set_json(payload).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["details"]["completedDate"], "2024-01-05");
}

#[actix_web::test]
async fn undoing_a_day_without_a_completion_is_not_found() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let uri = format!(
        "/api/v1/habits/{habit_id}/logs?userId=auth0%7Ctester&completedDate=2024-01-05"
    );
    let request = test::TestRequest::delete().uri(&uri).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn check_in_then_undo_round_trips_through_the_wire() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let post_uri = format!("/api/v1/habits/{habit_id}/logs");
    let request = test::TestRequest::post()
        .uri(&post_uri)
        .set_json(json!({
            "userId": "auth0|tester",
            "completedDate": "2024-01-05",
            "notes": "morning session",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let list_uri = format!("/api/v1/habits/{habit_id}/logs?userId=auth0%7Ctester");
    let request = test::TestRequest::get().uri(&list_uri).to_request();
    let logs: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(logs.as_array().expect("array").len(), 1);
    assert_eq!(logs[0]["notes"], "morning session");

    let delete_uri = format!(
        "/api/v1/habits/{habit_id}/logs?userId=auth0%7Ctester&completedDate=2024-01-05"
    );
    let request = test::TestRequest::delete().uri(&delete_uri).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = test::TestRequest::get().uri(&list_uri).to_request();
    let logs: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(logs.as_array().expect("array").len(), 0);
}

#[actix_web::test]
async fn deleting_a_habit_empties_the_list() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let uri = format!("/api/v1/habits/{habit_id}?userId=auth0%7Ctester");
    let request = test::TestRequest::delete().uri(&uri).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = test::TestRequest::get()
        .uri("/api/v1/habits?userId=auth0%7Ctester")
        .to_request();
    let habits: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(habits.as_array().expect("array").len(), 0);
}

#[actix_web::test]
async fn habit_update_changes_name_over_the_wire() {
    let app = spawn_app().await;
    create_user(&app).await;
    let habit = create_habit(&app).await;
    let habit_id = habit["id"].as_str().expect("habit id");

    let uri = format!("/api/v1/habits/{habit_id}");
    let request = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "userId": "auth0|tester",
            "name": "Read more",
            "description": null,
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["name"], "Read more");
    assert_eq!(body["description"], Value::Null);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id_header() {
    let app = spawn_app().await;

    let request = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.headers().contains_key("trace-id"));

    let request = test::TestRequest::get().uri("/api/v1/habits").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key("trace-id"));
}
