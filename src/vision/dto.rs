use serde::{Deserialize, Serialize};

/// One candidate label for an uploaded photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodDetection {
    pub food: String,
    pub confidence: f64,
}
