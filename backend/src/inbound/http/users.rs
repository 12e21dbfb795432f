//! User profile HTTP handlers.
//!
//! ```text
//! POST /api/v1/users
//! ```
//!
//! Sign-in happens at the external identity provider; this endpoint only
//! upserts the resulting profile so habits have an owner to reference.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser};
use crate::inbound::http::responses::UserResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, require_field, FieldName};
use crate::inbound::http::ApiResult;

/// Request payload for the user upsert.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    /// Identity-provider subject identifier.
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

fn parse_upsert_request(payload: UpsertUserRequest) -> Result<NewUser, Error> {
    let id = require_field(payload.id, FieldName::new("id"))?;
    let email = require_field(payload.email, FieldName::new("email"))?;
    Ok(NewUser {
        id: parse_user_id(id, FieldName::new("id"))?,
        email,
        name: payload.name,
    })
}

/// Create or refresh a user profile.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "Profile stored", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "upsertUser"
)]
#[post("/users")]
pub async fn upsert_user(
    state: web::Data<HttpState>,
    payload: web::Json<UpsertUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = parse_upsert_request(payload.into_inner())?;
    let user = state.users.upsert_user(new_user).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}
