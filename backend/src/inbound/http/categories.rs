//! Category HTTP handlers.
//!
//! ```text
//! GET /api/v1/categories
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::responses::CategoryResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every habit category, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.habits.list_categories().await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}
