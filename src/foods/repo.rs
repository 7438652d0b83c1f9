use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::dto::{FoodOrderBy, NewFood, OrderDirection};
use crate::nutrition::NutritionProfile;

/// Catalog food item as stored, serialized in the wire shape the diet
/// composer consumes.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub description: String,
    pub serving_size: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub calories: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Food {
    /// Per-reference-serving view consumed by the scaling core.
    pub fn profile(&self) -> NutritionProfile {
        NutritionProfile {
            serving_size: self.serving_size,
            carbohydrates: self.carbohydrates,
            protein: self.protein,
            total_fat: self.total_fat,
            calories: self.calories,
        }
    }
}

const FOOD_COLUMNS: &str =
    "id, user_id, description, serving_size, carbohydrates, protein, total_fat, calories, created_at";

pub async fn create(db: &PgPool, user_id: Uuid, food: &NewFood) -> anyhow::Result<Food> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        INSERT INTO foods (user_id, description, serving_size, carbohydrates, protein, total_fat, calories)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {FOOD_COLUMNS}
        "#,
    ))
    .bind(user_id)
    .bind(food.description.trim())
    .bind(food.serving_size)
    .bind(food.carbohydrates)
    .bind(food.protein)
    .bind(food.total_fat)
    .bind(food.calories)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Insert one imported row inside the import transaction.
pub async fn create_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    food: &NewFood,
) -> anyhow::Result<Food> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        INSERT INTO foods (user_id, description, serving_size, carbohydrates, protein, total_fat, calories)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {FOOD_COLUMNS}
        "#,
    ))
    .bind(user_id)
    .bind(food.description.trim())
    .bind(food.serving_size)
    .bind(food.carbohydrates)
    .bind(food.protein)
    .bind(food.total_fat)
    .bind(food.calories)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row)
}

pub async fn list(
    db: &PgPool,
    user_id: Uuid,
    order_by: FoodOrderBy,
    direction: OrderDirection,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Food>> {
    // order_by/direction come from closed enums, never from raw input
    let query = format!(
        r#"
        SELECT {FOOD_COLUMNS}
        FROM foods
        WHERE user_id = $1
        ORDER BY {} {}
        LIMIT $2 OFFSET $3
        "#,
        order_by.column(),
        direction.keyword(),
    );
    let rows = sqlx::query_as::<_, Food>(&query)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Whole catalog for the diet composer's food selector.
pub async fn list_all(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
        FROM foods
        WHERE user_id = $1
        ORDER BY description ASC
        "#,
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Exact-description lookup used to resolve a diet entry's food reference.
pub async fn find_by_description(
    db: &PgPool,
    user_id: Uuid,
    description: &str,
) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
        FROM foods
        WHERE user_id = $1 AND description = $2
        "#,
    ))
    .bind(user_id)
    .bind(description)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete_many(db: &PgPool, user_id: Uuid, ids: &[Uuid]) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM foods WHERE user_id = $1 AND id = ANY($2)")
        .bind(user_id)
        .bind(ids)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
