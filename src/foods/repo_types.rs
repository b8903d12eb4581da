use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Coarse diabetic-dietary verdict stored per food. Unrecognised stored
/// text is kept verbatim so it round-trips to clients unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Suitability {
    Safe,
    Moderate,
    Avoid,
    Unknown(String),
}

impl Suitability {
    pub fn as_str(&self) -> &str {
        match self {
            Suitability::Safe => "Safe",
            Suitability::Moderate => "Moderate",
            Suitability::Avoid => "Avoid",
            Suitability::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for Suitability {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Safe" => Suitability::Safe,
            "Moderate" => Suitability::Moderate,
            "Avoid" => Suitability::Avoid,
            _ => Suitability::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Suitability {
    fn from(s: String) -> Self {
        Suitability::from(s.as_str())
    }
}

impl From<Suitability> for String {
    fn from(s: Suitability) -> Self {
        match s {
            Suitability::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, FromRow)]
pub struct FoodRow {
    pub id: i32,
    pub name: String,
    pub name_ar: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub sugar: f64,
    pub fat: f64,
    pub glycemic_index: i32,
    pub diabetic_suitability: Option<String>,
}

/// Food reference record. `glycemic_index == 0` means negligible or unmeasured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRecord {
    pub id: i32,
    pub name: String,
    pub name_ar: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub sugar: f64,
    pub fat: f64,
    pub glycemic_index: i32,
    pub diabetic_suitability: Suitability,
}

impl From<FoodRow> for FoodRecord {
    fn from(r: FoodRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            name_ar: r.name_ar,
            calories: r.calories,
            carbs: r.carbs,
            protein: r.protein,
            sugar: r.sugar,
            fat: r.fat,
            glycemic_index: r.glycemic_index,
            diabetic_suitability: r
                .diabetic_suitability
                .map(Suitability::from)
                .unwrap_or_else(|| Suitability::Unknown(String::new())),
        }
    }
}
