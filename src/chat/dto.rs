use serde::{Deserialize, Serialize};

use crate::foods::repo_types::FoodRecord;

#[derive(Debug, Deserialize)]
pub struct ChatQuestion {
    pub question: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".into()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    pub related_foods: Vec<FoodRecord>,
}
