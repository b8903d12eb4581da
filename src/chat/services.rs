use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::dto::ChatAnswer;
use super::repo_types::{Language, QaRecord};
use crate::foods::repo_types::FoodRecord;
use crate::storage::Catalog;

/// Tags starting with one of these name a nutritional concept, not a food.
pub const RESERVED_TAG_PREFIXES: [&str; 7] = [
    "carbs",
    "sugar",
    "protein",
    "nutrition",
    "glycemic",
    "meal",
    "diet",
];

pub const RELATED_FOODS_LIMIT: usize = 3;

const FALLBACK_EN: &str = "I don't have specific information about that. Please try asking about specific foods, nutritional advice for diabetics, or general diabetes dietary guidelines.";
const FALLBACK_AR: &str = "ليس لدي معلومات محددة حول ذلك. يرجى محاولة السؤال عن أطعمة محددة، أو نصائح غذائية لمرضى السكري، أو إرشادات غذائية عامة لمرض السكري.";

pub fn fallback_answer(lang: Language) -> &'static str {
    match lang {
        Language::En => FALLBACK_EN,
        Language::Ar => FALLBACK_AR,
    }
}

/// Lowercased words of three or more characters, first occurrence order, no repeats.
pub fn extract_keywords(query: &str) -> Vec<String> {
    lazy_static! {
        static ref WORD_RE: Regex = Regex::new(r"\b\w{3,}\b").unwrap();
    }
    let lowered = query.to_lowercase();
    let mut out: Vec<String> = Vec::new();
    for m in WORD_RE.find_iter(&lowered) {
        let word = m.as_str();
        if !out.iter().any(|w| w == word) {
            out.push(word.to_string());
        }
    }
    out
}

/// Tags of a QA record that name foods rather than concepts.
pub fn food_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .filter(|t| !RESERVED_TAG_PREFIXES.iter().any(|p| t.starts_with(p)))
        .collect()
}

/// First record (id order) whose question in `lang` equals `query`,
/// ignoring case and surrounding whitespace.
pub fn select_exact<'a>(records: &'a [QaRecord], query: &str, lang: Language) -> Option<&'a QaRecord> {
    let wanted = query.trim().to_lowercase();
    records
        .iter()
        .find(|r| r.question_in(lang).trim().to_lowercase() == wanted)
}

/// Among records whose question in `lang` or tags contain any keyword,
/// the one with the shortest question; earlier records win ties.
pub fn select_by_keywords<'a>(
    records: &'a [QaRecord],
    keywords: &[String],
    lang: Language,
) -> Option<&'a QaRecord> {
    if keywords.is_empty() {
        return None;
    }
    records
        .iter()
        .filter(|r| {
            let question = r.question_in(lang).to_lowercase();
            let tags = r.tags.to_lowercase();
            keywords
                .iter()
                .any(|k| question.contains(k.as_str()) || tags.contains(k.as_str()))
        })
        .min_by_key(|r| r.question_in(lang).chars().count())
}

/// Foods whose either name contains any tag, in input order, at most `limit`.
pub fn select_related_foods<'a>(
    foods: &'a [FoodRecord],
    tags: &[String],
    limit: usize,
) -> Vec<&'a FoodRecord> {
    if tags.is_empty() {
        return Vec::new();
    }
    let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    foods
        .iter()
        .filter(|f| {
            let name = f.name.to_lowercase();
            let name_ar = f.name_ar.to_lowercase();
            tags.iter()
                .any(|t| name.contains(t.as_str()) || name_ar.contains(t.as_str()))
        })
        .take(limit)
        .collect()
}

/// Picks the canonical answer for a free-text question.
///
/// Exact question match first, then keyword overlap, then the language's
/// fallback text. Only catalog failures surface as errors.
pub async fn answer_question(
    catalog: &dyn Catalog,
    query: &str,
    lang: Language,
) -> anyhow::Result<ChatAnswer> {
    let query = query.trim();

    let mut hit = catalog.find_question(query, lang).await?;
    if hit.is_some() {
        debug!(lang = lang.code(), "exact question match");
    } else {
        let keywords = extract_keywords(query);
        if !keywords.is_empty() {
            hit = catalog.search_questions(&keywords, lang).await?;
            if hit.is_some() {
                debug!(lang = lang.code(), ?keywords, "keyword question match");
            }
        }
    }

    let Some(record) = hit else {
        debug!(lang = lang.code(), "no question match; using fallback");
        return Ok(ChatAnswer {
            answer: fallback_answer(lang).to_string(),
            related_foods: Vec::new(),
        });
    };

    let tags = food_tags(&record.tags);
    let related_foods = if tags.is_empty() {
        Vec::new()
    } else {
        catalog.foods_matching_tags(&tags, RELATED_FOODS_LIMIT).await?
    };

    Ok(ChatAnswer {
        answer: record.answer_in(lang).to_string(),
        related_foods,
    })
}
