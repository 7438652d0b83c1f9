use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

/// Diet header row; meals and entries hang off it.
#[derive(Debug, Clone, FromRow)]
pub struct DietRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub weight: f64,
    pub height: f64,
    pub tdee: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub diet_id: Uuid,
    pub description: String,
    pub time: Time,
    pub ordination: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct FoodEntryRow {
    pub meal_id: Uuid,
    pub food_description: String,
    pub portion: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub calories: f64,
}

pub async fn insert_diet(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    description: &str,
    weight: f64,
    height: f64,
    tdee: f64,
) -> anyhow::Result<DietRow> {
    let row = sqlx::query_as::<_, DietRow>(
        r#"
        INSERT INTO diets (user_id, description, weight, height, tdee)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, description, weight, height, tdee, created_at
        "#,
    )
    .bind(user_id)
    .bind(description)
    .bind(weight)
    .bind(height)
    .bind(tdee)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row)
}

/// Rewrite the diet header and drop its meals; entries go with them
/// (ON DELETE CASCADE). The caller reinserts the new composition in the
/// same transaction, so a diet is always replaced wholesale.
pub async fn replace_diet(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    diet_id: Uuid,
    description: &str,
    weight: f64,
    height: f64,
    tdee: f64,
) -> anyhow::Result<Option<DietRow>> {
    let row = sqlx::query_as::<_, DietRow>(
        r#"
        UPDATE diets
        SET description = $3, weight = $4, height = $5, tdee = $6
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, description, weight, height, tdee, created_at
        "#,
    )
    .bind(diet_id)
    .bind(user_id)
    .bind(description)
    .bind(weight)
    .bind(height)
    .bind(tdee)
    .fetch_optional(&mut **tx)
    .await?;

    if row.is_some() {
        sqlx::query("DELETE FROM meals WHERE diet_id = $1")
            .bind(diet_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(row)
}

pub async fn insert_meal(
    tx: &mut Transaction<'_, Postgres>,
    diet_id: Uuid,
    description: &str,
    time: Time,
    ordination: i32,
) -> anyhow::Result<MealRow> {
    let row = sqlx::query_as::<_, MealRow>(
        r#"
        INSERT INTO meals (diet_id, description, time, ordination)
        VALUES ($1, $2, $3, $4)
        RETURNING id, diet_id, description, time, ordination
        "#,
    )
    .bind(diet_id)
    .bind(description)
    .bind(time)
    .bind(ordination)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_entry(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: Uuid,
    position: i32,
    food_description: &str,
    portion: f64,
    carbohydrates: f64,
    protein: f64,
    total_fat: f64,
    calories: f64,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO food_entries
            (meal_id, position, food_description, portion, carbohydrates, protein, total_fat, calories)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(meal_id)
    .bind(position)
    .bind(food_description)
    .bind(portion)
    .bind(carbohydrates)
    .bind(protein)
    .bind(total_fat)
    .bind(calories)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_diet(db: &PgPool, user_id: Uuid, diet_id: Uuid) -> anyhow::Result<Option<DietRow>> {
    let row = sqlx::query_as::<_, DietRow>(
        r#"
        SELECT id, user_id, description, weight, height, tdee, created_at
        FROM diets
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(diet_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_diets(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<DietRow>> {
    let rows = sqlx::query_as::<_, DietRow>(
        r#"
        SELECT id, user_id, description, weight, height, tdee, created_at
        FROM diets
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_diets(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diets WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Meals of one diet in presentation order.
pub async fn list_meals(db: &PgPool, diet_id: Uuid) -> anyhow::Result<Vec<MealRow>> {
    let rows = sqlx::query_as::<_, MealRow>(
        r#"
        SELECT id, diet_id, description, time, ordination
        FROM meals
        WHERE diet_id = $1
        ORDER BY ordination ASC
        "#,
    )
    .bind(diet_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Entries of all meals of one diet, in stored order.
pub async fn list_entries(db: &PgPool, diet_id: Uuid) -> anyhow::Result<Vec<FoodEntryRow>> {
    let rows = sqlx::query_as::<_, FoodEntryRow>(
        r#"
        SELECT e.meal_id, e.food_description, e.portion,
               e.carbohydrates, e.protein, e.total_fat, e.calories
        FROM food_entries e
        JOIN meals m ON m.id = e.meal_id
        WHERE m.diet_id = $1
        ORDER BY e.meal_id, e.position ASC
        "#,
    )
    .bind(diet_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn delete_diet(db: &PgPool, user_id: Uuid, diet_id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM diets WHERE id = $1 AND user_id = $2")
        .bind(diet_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
