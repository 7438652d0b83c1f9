use std::collections::HashSet;

use thiserror::Error;

use crate::diets::dto::DietPayload;

/// All-or-nothing submission gate failure. Every problem found in one pass
/// is collected; nothing is persisted when any is present.
#[derive(Debug, Error)]
#[error("{}", self.problems.join("; "))]
pub struct DietValidationError {
    pub problems: Vec<String>,
}

fn present(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite() && v > 0.0)
}

/// Validate a diet submission before any write happens.
///
/// Checks: non-blank description; weight/height/tdee present; at least one
/// meal; each meal carries a description, a time and at least one food
/// entry; each entry names a food and a positive portion; ordinations are
/// unique within the diet.
pub fn validate_diet(diet: &DietPayload) -> Result<(), DietValidationError> {
    let mut problems = Vec::new();

    if diet.description.trim().is_empty() {
        problems.push("description is required".to_string());
    }
    if !present(diet.weight) {
        problems.push("weight is required".to_string());
    }
    if !present(diet.height) {
        problems.push("height is required".to_string());
    }
    if !present(diet.tdee) {
        problems.push("tdee is required".to_string());
    }

    if diet.meals.is_empty() {
        problems.push("at least one meal is required".to_string());
    }

    let mut seen_ordinations = HashSet::new();
    for (mi, meal) in diet.meals.iter().enumerate() {
        let label = mi + 1;
        if meal.description.trim().is_empty() {
            problems.push(format!("meal {label}: description is required"));
        }
        if meal.time.is_none() {
            problems.push(format!("meal {label}: time is required"));
        }
        // dedupe on what will actually be persisted, defaults included
        let ord = meal.effective_ordination(mi);
        if !seen_ordinations.insert(ord) {
            problems.push(format!("meal {label}: duplicate ordination {ord}"));
        }
        if meal.food_list.is_empty() {
            problems.push(format!("meal {label}: at least one food is required"));
        }
        for (fi, food) in meal.food_list.iter().enumerate() {
            if food.food_description.trim().is_empty() {
                problems.push(format!("meal {label}, food {}: food is required", fi + 1));
            }
            if !food.portion.is_finite() || food.portion <= 0.0 {
                problems.push(format!(
                    "meal {label}, food {}: portion must be positive",
                    fi + 1
                ));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DietValidationError { problems })
    }
}
