use std::collections::HashMap;

use sqlx::PgPool;
use thiserror::Error;
use time::Time;
use tracing::info;
use uuid::Uuid;

use crate::diets::dto::{DietDetails, DietPayload, FoodEntryDetails, MealDetails};
use crate::diets::repo;
use crate::foods;
use crate::nutrition::{self, validate::DietValidationError, ScaledMacros};

#[derive(Debug, Error)]
pub enum DietError {
    #[error(transparent)]
    Validation(#[from] DietValidationError),
    #[error("diet not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

/// One meal's worth of server-computed entries, ready to persist.
struct ResolvedMeal {
    description: String,
    time: Time,
    ordination: i32,
    entries: Vec<ResolvedEntry>,
}

struct ResolvedEntry {
    food_description: String,
    portion: f64,
    macros: ScaledMacros,
}

/// Resolve every food reference against the user's catalog and scale its
/// macros for the chosen portion. Lookup misses become validation problems
/// so a submission can never persist stale client-side numbers.
async fn resolve_meals(
    db: &PgPool,
    user_id: Uuid,
    payload: &DietPayload,
) -> Result<Vec<ResolvedMeal>, DietError> {
    let mut problems = Vec::new();
    let mut resolved = Vec::with_capacity(payload.meals.len());

    for (mi, meal) in payload.meals.iter().enumerate() {
        let mut entries = Vec::with_capacity(meal.food_list.len());
        for (fi, food) in meal.food_list.iter().enumerate() {
            let description = food.food_description.trim();
            let found = foods::repo::find_by_description(db, user_id, description).await?;
            match found.map(|f| f.profile()) {
                Some(profile) => match nutrition::scale(&profile, food.portion) {
                    Some(macros) => entries.push(ResolvedEntry {
                        food_description: description.to_string(),
                        portion: food.portion,
                        macros,
                    }),
                    None => problems.push(format!(
                        "meal {}, food {}: cannot scale '{description}'",
                        mi + 1,
                        fi + 1
                    )),
                },
                None => problems.push(format!(
                    "meal {}, food {}: unknown food '{description}'",
                    mi + 1,
                    fi + 1
                )),
            }
        }
        resolved.push(ResolvedMeal {
            description: meal.description.trim().to_string(),
            // validated present before resolution runs
            time: meal.time.unwrap_or(Time::MIDNIGHT),
            ordination: meal.effective_ordination(mi),
            entries,
        });
    }

    if problems.is_empty() {
        Ok(resolved)
    } else {
        Err(DietValidationError { problems }.into())
    }
}

async fn persist(
    db: &PgPool,
    user_id: Uuid,
    diet_id: Option<Uuid>,
    payload: &DietPayload,
    meals: Vec<ResolvedMeal>,
) -> Result<Uuid, DietError> {
    // gate guarantees presence of the scalar fields
    let weight = payload.weight.unwrap_or_default();
    let height = payload.height.unwrap_or_default();
    let tdee = payload.tdee.unwrap_or_default();
    let description = payload.description.trim();

    let mut tx = db.begin().await.map_err(anyhow::Error::from)?;

    let diet = match diet_id {
        None => repo::insert_diet(&mut tx, user_id, description, weight, height, tdee).await?,
        Some(id) => {
            repo::replace_diet(&mut tx, user_id, id, description, weight, height, tdee)
                .await?
                .ok_or(DietError::NotFound)?
        }
    };

    for meal in &meals {
        let meal_row = repo::insert_meal(
            &mut tx,
            diet.id,
            &meal.description,
            meal.time,
            meal.ordination,
        )
        .await?;
        for (pos, entry) in meal.entries.iter().enumerate() {
            repo::insert_entry(
                &mut tx,
                meal_row.id,
                pos as i32,
                &entry.food_description,
                entry.portion,
                entry.macros.carbohydrates,
                entry.macros.protein,
                entry.macros.total_fat,
                entry.macros.calories,
            )
            .await?;
        }
    }

    tx.commit().await.map_err(anyhow::Error::from)?;
    Ok(diet.id)
}

/// Validate, resolve, persist a new diet, then serve back the stored shape.
pub async fn create_diet(
    db: &PgPool,
    user_id: Uuid,
    payload: &DietPayload,
) -> Result<DietDetails, DietError> {
    nutrition::validate::validate_diet(payload)?;
    let meals = resolve_meals(db, user_id, payload).await?;
    let diet_id = persist(db, user_id, None, payload, meals).await?;
    info!(user_id = %user_id, %diet_id, "diet created");
    load_details(db, user_id, diet_id)
        .await?
        .ok_or(DietError::NotFound)
}

/// Same pipeline as create; the whole composition is replaced in one
/// transaction, so create and update cannot diverge in scaling behavior.
pub async fn update_diet(
    db: &PgPool,
    user_id: Uuid,
    diet_id: Uuid,
    payload: &DietPayload,
) -> Result<DietDetails, DietError> {
    nutrition::validate::validate_diet(payload)?;
    let meals = resolve_meals(db, user_id, payload).await?;
    persist(db, user_id, Some(diet_id), payload, meals).await?;
    info!(user_id = %user_id, %diet_id, "diet updated");
    load_details(db, user_id, diet_id)
        .await?
        .ok_or(DietError::NotFound)
}

/// Assemble a stored diet with its derived totals. Totals are computed
/// here on every read, never persisted.
pub async fn load_details(
    db: &PgPool,
    user_id: Uuid,
    diet_id: Uuid,
) -> Result<Option<DietDetails>, DietError> {
    let Some(diet) = repo::find_diet(db, user_id, diet_id).await? else {
        return Ok(None);
    };

    let meal_rows = repo::list_meals(db, diet_id).await?;
    let entry_rows = repo::list_entries(db, diet_id).await?;

    let mut by_meal: HashMap<Uuid, Vec<FoodEntryDetails>> = HashMap::new();
    for row in entry_rows {
        by_meal
            .entry(row.meal_id)
            .or_default()
            .push(FoodEntryDetails {
                food_description: row.food_description,
                portion: row.portion,
                macros: ScaledMacros {
                    carbohydrates: row.carbohydrates,
                    protein: row.protein,
                    total_fat: row.total_fat,
                    calories: row.calories,
                },
            });
    }

    let meals: Vec<MealDetails> = meal_rows
        .into_iter()
        .map(|m| {
            let food_list = by_meal.remove(&m.id).unwrap_or_default();
            let totals = nutrition::meal_totals(food_list.iter().map(|f| &f.macros));
            MealDetails {
                description: m.description,
                time: m.time,
                ordination: m.ordination,
                totals,
                food_list,
            }
        })
        .collect();

    let totals = nutrition::diet_totals(meals.iter().map(|m| &m.totals));

    Ok(Some(DietDetails {
        id: diet.id,
        description: diet.description,
        weight: diet.weight,
        height: diet.height,
        tdee: diet.tdee,
        totals,
        meals,
    }))
}
