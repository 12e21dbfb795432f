//! Habit HTTP handlers.
//!
//! ```text
//! GET    /api/v1/habits
//! POST   /api/v1/habits
//! GET    /api/v1/habits/{habitId}
//! PUT    /api/v1/habits/{habitId}
//! DELETE /api/v1/habits/{habitId}
//! ```
//!
//! Every route takes an explicit `userId`; a habit owned by another user is
//! answered with 404, never 403.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CreateHabitRequest, Error, HabitChanges, HabitFilter, HabitId, UserId,
};
use crate::inbound::http::responses::HabitResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_category_id, parse_habit_id, parse_rate_bucket,
    parse_streak_bucket, parse_user_id, require_field, FieldName,
};
use crate::inbound::http::ApiResult;

/// Query parameters for the habit list.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListHabitsQuery {
    pub user_id: Option<String>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    pub category_id: Option<String>,
    /// One of `high`, `medium`, `low`.
    pub rate: Option<String>,
    /// One of `strong`, `building`, `started`, `none`.
    pub streak: Option<String>,
}

/// Query parameters identifying the acting user.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

pub(crate) fn parse_owner(user_id: Option<String>) -> Result<UserId, Error> {
    let field = FieldName::new("userId");
    parse_user_id(require_field(user_id, field)?, field)
}

pub(crate) fn parse_habit_path(path: &str) -> Result<HabitId, Error> {
    parse_habit_id(path, FieldName::new("habitId"))
}

fn parse_list_query(query: ListHabitsQuery) -> Result<(UserId, HabitFilter), Error> {
    let user_id = parse_owner(query.user_id)?;
    let filter = HabitFilter {
        search: query.search.filter(|search| !search.trim().is_empty()),
        category_id: query
            .category_id
            .map(|raw| parse_category_id(raw, FieldName::new("categoryId")))
            .transpose()?,
        rate: query
            .rate
            .map(|raw| parse_rate_bucket(raw, FieldName::new("rate")))
            .transpose()?,
        streak: query
            .streak
            .map(|raw| parse_streak_bucket(raw, FieldName::new("streak")))
            .transpose()?,
    };
    Ok((user_id, filter))
}

/// Request payload for habit creation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitBody {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    /// Defaults to the category colour when absent.
    pub color: Option<String>,
}

fn parse_create_request(payload: CreateHabitBody) -> Result<CreateHabitRequest, Error> {
    let user_id = parse_owner(payload.user_id)?;
    let name = require_field(payload.name, FieldName::new("name"))?;
    if name.trim().is_empty() {
        return Err(missing_field_error(FieldName::new("name")));
    }
    let category_id = require_field(payload.category_id, FieldName::new("categoryId"))?;
    Ok(CreateHabitRequest {
        user_id,
        name,
        description: payload.description,
        category_id: parse_category_id(category_id, FieldName::new("categoryId"))?,
        color: payload.color,
    })
}

// Distinguishes an absent field (outer None via the default) from an
// explicit null (Some(None)), which clears the description.
fn deserialize_clearable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Request payload for a partial habit update. Absent fields keep their
/// stored value; an explicit `null` description clears it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitBody {
    pub user_id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_clearable")]
    pub description: Option<Option<String>>,
    pub category_id: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

fn parse_update_request(payload: UpdateHabitBody) -> Result<(UserId, HabitChanges), Error> {
    let user_id = parse_owner(payload.user_id)?;
    let changes = HabitChanges {
        name: payload.name,
        description: payload.description,
        category_id: payload
            .category_id
            .map(|raw| parse_category_id(raw, FieldName::new("categoryId")))
            .transpose()?,
        color: payload.color,
        is_active: payload.is_active,
    };
    Ok((user_id, changes))
}

/// List the user's active habits with derived stats, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/habits",
    params(
        ("userId" = String, Query, description = "Owning user identifier"),
        ("search" = Option<String>, Query, description = "Substring filter over name and description"),
        ("categoryId" = Option<String>, Query, description = "Category UUID filter"),
        ("rate" = Option<String>, Query, description = "Completion-rate bucket: high, medium, low"),
        ("streak" = Option<String>, Query, description = "Streak bucket: strong, building, started, none")
    ),
    responses(
        (status = 200, description = "Matching habits", body = [HabitResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["habits"],
    operation_id = "listHabits"
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    query: web::Query<ListHabitsQuery>,
) -> ApiResult<web::Json<Vec<HabitResponse>>> {
    let (user_id, filter) = parse_list_query(query.into_inner())?;
    let overviews = state.habits.list_habits(&user_id, &filter).await?;
    Ok(web::Json(
        overviews.into_iter().map(HabitResponse::from).collect(),
    ))
}

/// Create a habit.
#[utoipa::path(
    post,
    path = "/api/v1/habits",
    request_body = CreateHabitBody,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User or category not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["habits"],
    operation_id = "createHabit"
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    payload: web::Json<CreateHabitBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let overview = state.habits.create_habit(request).await?;
    Ok(HttpResponse::Created().json(HabitResponse::from(overview)))
}

/// Fetch one habit with its full log history and derived stats.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{habitId}",
    params(
        ("habitId" = String, Path, description = "Habit UUID"),
        ("userId" = String, Query, description = "Owning user identifier")
    ),
    responses(
        (status = 200, description = "The habit", body = HabitResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["habits"],
    operation_id = "getHabit"
)]
#[get("/habits/{habit_id}")]
pub async fn get_habit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<OwnerQuery>,
) -> ApiResult<web::Json<HabitResponse>> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let user_id = parse_owner(query.into_inner().user_id)?;
    let overview = state.habits.get_habit(&user_id, &habit_id).await?;
    Ok(web::Json(HabitResponse::from(overview)))
}

/// Apply a partial update to a habit.
#[utoipa::path(
    put,
    path = "/api/v1/habits/{habitId}",
    params(("habitId" = String, Path, description = "Habit UUID")),
    request_body = UpdateHabitBody,
    responses(
        (status = 200, description = "Updated habit", body = HabitResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit or category not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["habits"],
    operation_id = "updateHabit"
)]
#[put("/habits/{habit_id}")]
pub async fn update_habit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateHabitBody>,
) -> ApiResult<web::Json<HabitResponse>> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let (user_id, changes) = parse_update_request(payload.into_inner())?;
    let overview = state
        .habits
        .update_habit(&user_id, &habit_id, changes)
        .await?;
    Ok(web::Json(HabitResponse::from(overview)))
}

/// Delete a habit; its logs cascade away with it.
#[utoipa::path(
    delete,
    path = "/api/v1/habits/{habitId}",
    params(
        ("habitId" = String, Path, description = "Habit UUID"),
        ("userId" = String, Query, description = "Owning user identifier")
    ),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Habit not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["habits"],
    operation_id = "deleteHabit"
)]
#[delete("/habits/{habit_id}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<OwnerQuery>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_habit_path(&path.into_inner())?;
    let user_id = parse_owner(query.into_inner().user_id)?;
    state.habits.delete_habit(&user_id, &habit_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, RateBucket, StreakBucket};
    use rstest::rstest;

    fn list_query(user_id: Option<&str>) -> ListHabitsQuery {
        ListHabitsQuery {
            user_id: user_id.map(str::to_owned),
            search: None,
            category_id: None,
            rate: None,
            streak: None,
        }
    }

    #[rstest]
    fn parse_list_query_requires_user_id() {
        let error = parse_list_query(list_query(None)).expect_err("missing userId");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn parse_list_query_maps_filter_buckets() {
        let mut query = list_query(Some("auth0|tester"));
        query.rate = Some("medium".to_owned());
        query.streak = Some("building".to_owned());

        let (_, filter) = parse_list_query(query).expect("valid query");
        assert_eq!(filter.rate, Some(RateBucket::Medium));
        assert_eq!(filter.streak, Some(StreakBucket::Building));
    }

    #[rstest]
    fn parse_list_query_drops_blank_search() {
        let mut query = list_query(Some("auth0|tester"));
        query.search = Some("   ".to_owned());

        let (_, filter) = parse_list_query(query).expect("valid query");
        assert!(filter.is_empty());
    }

    #[rstest]
    fn parse_list_query_rejects_unknown_bucket() {
        let mut query = list_query(Some("auth0|tester"));
        query.rate = Some("extreme".to_owned());

        let error = parse_list_query(query).expect_err("unknown bucket");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn parse_create_request_rejects_blank_name() {
        let payload = CreateHabitBody {
            user_id: Some("auth0|tester".to_owned()),
            name: Some("  ".to_owned()),
            description: None,
            category_id: Some(uuid::Uuid::new_v4().to_string()),
            color: None,
        };

        let error = parse_create_request(payload).expect_err("blank name");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn parse_update_request_distinguishes_absent_and_null_description() {
        let absent: UpdateHabitBody =
            serde_json::from_str(r#"{"userId": "auth0|tester"}"#).expect("deserialise");
        let (_, changes) = parse_update_request(absent).expect("valid payload");
        assert_eq!(changes.description, None);

        let cleared: UpdateHabitBody =
            serde_json::from_str(r#"{"userId": "auth0|tester", "description": null}"#)
                .expect("deserialise");
        let (_, changes) = parse_update_request(cleared).expect("valid payload");
        assert_eq!(changes.description, Some(None));
    }

    #[rstest]
    fn parse_habit_path_rejects_malformed_uuid() {
        let error = parse_habit_path("not-a-uuid").expect_err("invalid uuid");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
