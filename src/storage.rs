use axum::async_trait;
use sqlx::PgPool;

use crate::chat::repo_types::{Language, QaRecord};
use crate::chat::services::{select_by_keywords, select_exact, select_related_foods};
use crate::foods::repo_types::FoodRecord;
use crate::{chat, foods, seed};

/// Read-only access to the food and QA reference tables.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All foods ordered by English name.
    async fn list_foods(&self) -> anyhow::Result<Vec<FoodRecord>>;
    /// Case-insensitive exact match on the English name.
    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<FoodRecord>>;
    /// Trimmed, case-insensitive match on the question in `lang`; lowest id wins.
    async fn find_question(&self, query: &str, lang: Language) -> anyhow::Result<Option<QaRecord>>;
    /// Shortest question in `lang` whose question or tags contain any keyword.
    async fn search_questions(
        &self,
        keywords: &[String],
        lang: Language,
    ) -> anyhow::Result<Option<QaRecord>>;
    /// Foods whose `name` or `name_ar` contains any tag, in id order.
    async fn foods_matching_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> anyhow::Result<Vec<FoodRecord>>;
}

#[derive(Clone)]
pub struct PgCatalog {
    db: PgPool,
}

impl PgCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// `%needle%` for `LIKE`, with the needle's own wildcards escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Postgres `text` cannot hold NUL, so such input can never equal a stored value.
fn storable_text(s: &str) -> bool {
    !s.contains('\0')
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn list_foods(&self) -> anyhow::Result<Vec<FoodRecord>> {
        foods::repo::list_foods(&self.db).await
    }

    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<FoodRecord>> {
        if !storable_text(name) {
            return Ok(None);
        }
        foods::repo::find_by_name(&self.db, name).await
    }

    async fn find_question(&self, query: &str, lang: Language) -> anyhow::Result<Option<QaRecord>> {
        if !storable_text(query) {
            return Ok(None);
        }
        chat::repo::find_exact(&self.db, query, lang).await
    }

    async fn search_questions(
        &self,
        keywords: &[String],
        lang: Language,
    ) -> anyhow::Result<Option<QaRecord>> {
        if keywords.is_empty() {
            return Ok(None);
        }
        let patterns: Vec<String> = keywords.iter().map(|k| contains_pattern(k)).collect();
        chat::repo::find_by_patterns(&self.db, &patterns, lang).await
    }

    async fn foods_matching_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> anyhow::Result<Vec<FoodRecord>> {
        if tags.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let patterns: Vec<String> = tags.iter().map(|t| contains_pattern(t)).collect();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        foods::repo::list_by_name_patterns(&self.db, &patterns, limit).await
    }
}

/// Catalog held entirely in memory. Records are kept in id order.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    foods: Vec<FoodRecord>,
    qa: Vec<QaRecord>,
}

impl MemoryCatalog {
    pub fn new(mut foods: Vec<FoodRecord>, mut qa: Vec<QaRecord>) -> Self {
        foods.sort_by_key(|f| f.id);
        qa.sort_by_key(|q| q.id);
        Self { foods, qa }
    }

    pub fn seeded() -> Self {
        Self::new(seed::foods(), seed::qa())
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_foods(&self) -> anyhow::Result<Vec<FoodRecord>> {
        let mut all = self.foods.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_food_by_name(&self, name: &str) -> anyhow::Result<Option<FoodRecord>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .foods
            .iter()
            .find(|f| f.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn find_question(&self, query: &str, lang: Language) -> anyhow::Result<Option<QaRecord>> {
        Ok(select_exact(&self.qa, query, lang).cloned())
    }

    async fn search_questions(
        &self,
        keywords: &[String],
        lang: Language,
    ) -> anyhow::Result<Option<QaRecord>> {
        Ok(select_by_keywords(&self.qa, keywords, lang).cloned())
    }

    async fn foods_matching_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> anyhow::Result<Vec<FoodRecord>> {
        Ok(select_related_foods(&self.foods, tags, limit)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("Banana"), "%banana%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }

    // lazy pool on a closed port: any query that reaches Postgres errors
    fn unreachable_pg() -> PgCatalog {
        PgCatalog::new(PgPool::connect_lazy("postgres://nobody@127.0.0.1:1/none").unwrap())
    }

    #[tokio::test]
    async fn pg_catalog_skips_lookups_containing_nul() {
        let catalog = unreachable_pg();
        let hit = catalog.find_question("\0abc", Language::En).await.unwrap();
        assert!(hit.is_none());
        let food = catalog.find_food_by_name("Banana\0").await.unwrap();
        assert!(food.is_none());
    }

    #[tokio::test]
    async fn nul_query_falls_back_on_pg_catalog() {
        let catalog = unreachable_pg();
        let answer = crate::chat::services::answer_question(&catalog, "\0", Language::En)
            .await
            .unwrap();
        assert_eq!(answer.answer, crate::chat::services::fallback_answer(Language::En));
        assert!(answer.related_foods.is_empty());
    }

    #[tokio::test]
    async fn memory_catalog_lists_foods_by_name() {
        let catalog = MemoryCatalog::seeded();
        let foods = catalog.list_foods().await.unwrap();
        assert_eq!(foods.len(), 25);
        assert_eq!(foods.first().unwrap().name, "Almonds");
        assert_eq!(foods.last().unwrap().name, "Yogurt (plain)");
    }

    #[tokio::test]
    async fn memory_catalog_finds_food_ignoring_case() {
        let catalog = MemoryCatalog::seeded();
        let food = catalog.find_food_by_name("  brown RICE ").await.unwrap();
        assert_eq!(food.map(|f| f.name), Some("Brown Rice".to_string()));
        assert!(catalog.find_food_by_name("pizza").await.unwrap().is_none());
    }
}
