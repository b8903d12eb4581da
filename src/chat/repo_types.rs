use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Query language. Anything unrecognised normalises to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "ar" => Language::Ar,
            _ => Language::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

/// Bilingual knowledge-base entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct QaRecord {
    pub id: i32,
    pub question: String,
    pub question_ar: String,
    pub answer: String,
    pub answer_ar: String,
    pub tags: String, // comma-joined
}

impl QaRecord {
    pub fn question_in(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.question,
            Language::Ar => &self.question_ar,
        }
    }

    pub fn answer_in(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.answer,
            Language::Ar => &self.answer_ar,
        }
    }
}
