use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument, warn};

use super::{dto::NutritionResponse, repo_types::FoodRecord, services::explain};
use crate::state::AppState;

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/nutrition/:food_name", get(get_nutrition))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodRecord>>, (StatusCode, String)> {
    let foods = state.catalog.list_foods().await.map_err(database)?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_nutrition(
    State(state): State<AppState>,
    Path(food_name): Path<String>,
) -> Result<Json<NutritionResponse>, (StatusCode, String)> {
    let food = match state.catalog.find_food_by_name(&food_name).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            warn!(%food_name, "food not found");
            return Err((
                StatusCode::NOT_FOUND,
                format!("Food '{}' not found", food_name),
            ));
        }
        Err(e) => return Err(database(e)),
    };

    let suitability_explanation = explain(&food);
    Ok(Json(NutritionResponse {
        food_info: food,
        suitability_explanation,
    }))
}

fn database(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "catalog query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}"))
}
