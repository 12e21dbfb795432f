//! Completion log HTTP handlers.
//!
//! ```text
//! GET    /api/v1/habits/{habitId}/logs
//! POST   /api/v1/habits/{habitId}/logs
//! DELETE /api/v1/habits/{habitId}/logs
//! ```
//!
//! A check-in without a `completedDate` lands on the current UTC day. A
//! second check-in for the same day answers 409 with the day in the error
//! details.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CheckInRequest, Error, LogQuery, UserId};
use crate::inbound::http::habits::{parse_habit_path, parse_owner};
use crate::inbound::http::responses::HabitLogResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_day, parse_optional_day, require_field, FieldName,
};
use crate::inbound::http::ApiResult;

/// Request payload for a check-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    pub user_id: Option<String>,
    /// Calendar date or RFC 3339 timestamp; defaults to today (UTC).
    pub completed_date: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for listing a habit's logs.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsQuery {
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<u32>,
}

/// Query parameters for undoing a check-in.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UndoQuery {
    pub user_id: Option<String>,
    pub completed_date: Option<String>,
}

fn parse_list_query(query: ListLogsQuery) -> Result<(UserId, LogQuery), Error> {
    let user_id = parse_owner(query.user_id)?;
    let bounds = LogQuery {
        start: parse_optional_day(query.start_date, FieldName::new("startDate"))?,
        end: parse_optional_day(query.end_date, FieldName::new("endDate"))?,
        limit: query.limit,
    };
    Ok((user_id, bounds))
}

/// List a habit's completion logs, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{habitId}/logs",
    params(
        ("habitId" = String, Path, description = "Habit UUID"),
        ("userId" = String, Query, description = "Owning user identifier"),
        ("startDate" = Option<String>, Query, description = "Earliest day to include (inclusive)"),
        ("endDate" = Option<String>, Query, description = "Latest day to include (inclusive)"),
        ("limit" = Option<u32>, Query, description = "Maximum number of logs")
    ),
    responses(
        (status = 200, description = "Completion logs, newest first", body = [HabitLogResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["logs"],
    operation_id = "listHabitLogs"
)]
#[get("/habits/{habit_id}/logs")]
pub async fn list_logs(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListLogsQuery>,
) -> ApiResult<web::Json<Vec<HabitLogResponse>>> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let (user_id, bounds) = parse_list_query(query.into_inner())?;
    let logs = state.habits.list_logs(&user_id, &habit_id, bounds).await?;
    Ok(web::Json(
        logs.into_iter().map(HabitLogResponse::from).collect(),
    ))
}

/// Record a completion for a habit.
#[utoipa::path(
    post,
    path = "/api/v1/habits/{habitId}/logs",
    params(("habitId" = String, Path, description = "Habit UUID")),
    request_body = CheckInBody,
    responses(
        (status = 201, description = "Completion recorded", body = HabitLogResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit not found", body = Error),
        (status = 409, description = "Already completed for this date", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["logs"],
    operation_id = "checkIn"
)]
#[post("/habits/{habit_id}/logs")]
pub async fn check_in(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CheckInBody>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let payload = payload.into_inner();
    let request = CheckInRequest {
        user_id: parse_owner(payload.user_id)?,
        habit_id,
        day: parse_optional_day(payload.completed_date, FieldName::new("completedDate"))?,
        notes: payload.notes,
    };
    let log = state.habits.check_in(request).await?;
    Ok(HttpResponse::Created().json(HabitLogResponse::from(log)))
}

/// Undo the completion for an exact calendar day.
#[utoipa::path(
    delete,
    path = "/api/v1/habits/{habitId}/logs",
    params(
        ("habitId" = String, Path, description = "Habit UUID"),
        ("userId" = String, Query, description = "Owning user identifier"),
        ("completedDate" = String, Query, description = "Day whose completion is removed")
    ),
    responses(
        (status = 204, description = "Completion removed"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit or completion not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["logs"],
    operation_id = "undoCheckIn"
)]
#[delete("/habits/{habit_id}/logs")]
pub async fn undo_check_in(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<UndoQuery>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let query = query.into_inner();
    let user_id = parse_owner(query.user_id)?;
    let field = FieldName::new("completedDate");
    let day = parse_day(require_field(query.completed_date, field)?, field)?;
    state.habits.undo_check_in(&user_id, &habit_id, day).await?;
    Ok(HttpResponse::NoContent().finish())
}
