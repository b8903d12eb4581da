use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{FoodRecord, FoodRow};

const FOOD_COLUMNS: &str = "id, name, name_ar, calories, carbs, protein, sugar, fat, \
                            glycemic_index, diabetic_suitability";

/// All foods, alphabetically by English name.
pub async fn list_foods(db: &PgPool) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRow>(&format!(
        "SELECT {FOOD_COLUMNS} FROM foods ORDER BY name ASC, id ASC"
    ))
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows.into_iter().map(FoodRecord::from).collect())
}

/// Case-insensitive exact lookup on the English name.
pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<FoodRecord>> {
    let row = sqlx::query_as::<_, FoodRow>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
          FROM foods
         WHERE LOWER(name) = LOWER($1)
         ORDER BY id ASC
         LIMIT 1
        "#
    ))
    .bind(name.trim())
    .fetch_optional(db)
    .await
    .context("find food by name")?;
    Ok(row.map(FoodRecord::from))
}

/// Foods whose `name` or `name_ar` contains any of `patterns`.
/// Patterns are already lowercased `LIKE` patterns (`%tag%`).
pub async fn list_by_name_patterns(
    db: &PgPool,
    patterns: &[String],
    limit: i64,
) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRow>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
          FROM foods f
         WHERE EXISTS (
                SELECT 1 FROM unnest($1::text[]) AS p(pattern)
                 WHERE LOWER(f.name) LIKE p.pattern
                    OR LOWER(f.name_ar) LIKE p.pattern
               )
         ORDER BY id ASC
         LIMIT $2
        "#
    ))
    .bind(patterns)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list foods by name patterns")?;
    Ok(rows.into_iter().map(FoodRecord::from).collect())
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
        .fetch_one(db)
        .await
        .context("count foods")?;
    Ok(n)
}
