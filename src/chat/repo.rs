use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{Language, QaRecord};

const QA_COLUMNS: &str = "id, question, question_ar, answer, answer_ar, COALESCE(tags, '') AS tags";

fn question_column(lang: Language) -> &'static str {
    match lang {
        Language::En => "question",
        Language::Ar => "question_ar",
    }
}

/// Trimmed, case-insensitive equality on the question in `lang`.
pub async fn find_exact(
    db: &PgPool,
    query: &str,
    lang: Language,
) -> anyhow::Result<Option<QaRecord>> {
    let col = question_column(lang);
    let row = sqlx::query_as::<_, QaRecord>(&format!(
        r#"
        SELECT {QA_COLUMNS}
          FROM qa
         WHERE LOWER(TRIM({col})) = LOWER($1)
         ORDER BY id ASC
         LIMIT 1
        "#
    ))
    .bind(query.trim())
    .fetch_optional(db)
    .await
    .context("find exact question")?;
    Ok(row)
}

/// Shortest question containing any pattern in its question or tags.
pub async fn find_by_patterns(
    db: &PgPool,
    patterns: &[String],
    lang: Language,
) -> anyhow::Result<Option<QaRecord>> {
    let col = question_column(lang);
    let row = sqlx::query_as::<_, QaRecord>(&format!(
        r#"
        SELECT {QA_COLUMNS}
          FROM qa q
         WHERE EXISTS (
                SELECT 1 FROM unnest($1::text[]) AS p(pattern)
                 WHERE LOWER(q.{col}) LIKE p.pattern
                    OR LOWER(COALESCE(q.tags, '')) LIKE p.pattern
               )
         ORDER BY char_length(q.{col}) ASC, id ASC
         LIMIT 1
        "#
    ))
    .bind(patterns)
    .fetch_optional(db)
    .await
    .context("search questions by keywords")?;
    Ok(row)
}
