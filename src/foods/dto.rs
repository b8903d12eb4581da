use serde::Serialize;

use super::repo_types::FoodRecord;

#[derive(Debug, Serialize)]
pub struct NutritionResponse {
    pub food_info: FoodRecord,
    pub suitability_explanation: String,
}
