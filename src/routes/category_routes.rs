use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::category_controller::CategoryController;
use crate::dto::category_dto::CategoryResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Listado público de categorías; las mutaciones viven en el router de admin.
pub fn create_category_router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let controller = CategoryController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
