use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

use crate::nutrition::{DietTotals, MealTotals, ScaledMacros};

// Meal times travel as "HH:MM", the shape the web client's time input emits.
time::serde::format_description!(pub(crate) hm_time, Time, "[hour]:[minute]");

/// Diet submission body, shared by create and update. Scalar fields are
/// optional and meal fields default so that an incomplete submission reaches
/// the validation gate as one piece instead of failing field-by-field in
/// deserialization. Client-computed macro values are ignored; the server
/// recomputes them from the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPayload {
    #[serde(default)]
    pub description: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub tdee: Option<f64>,
    #[serde(default)]
    pub meals: Vec<MealPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "hm_time::option")]
    pub time: Option<Time>,
    #[serde(default)]
    pub ordination: Option<i32>,
    #[serde(default)]
    pub food_list: Vec<FoodEntryPayload>,
}

impl MealPayload {
    /// Ordination that will be persisted: append order (index + 1) when the
    /// client did not assign one. The validation gate and the write path
    /// must agree on this rule, so it lives in exactly one place.
    pub fn effective_ordination(&self, index: usize) -> i32 {
        self.ordination.unwrap_or(index as i32 + 1)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntryPayload {
    #[serde(default)]
    pub food_description: String,
    #[serde(default)]
    pub portion: f64,
}

/// List item for the paged diet overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietSummary {
    pub id: Uuid,
    pub description: String,
    pub weight: f64,
    pub height: f64,
    pub tdee: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Full diet as served by get/create/update, totals derived on assembly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietDetails {
    pub id: Uuid,
    pub description: String,
    pub weight: f64,
    pub height: f64,
    pub tdee: f64,
    #[serde(flatten)]
    pub totals: DietTotals,
    pub meals: Vec<MealDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDetails {
    pub description: String,
    #[serde(with = "hm_time")]
    pub time: Time,
    pub ordination: i32,
    #[serde(flatten)]
    pub totals: MealTotals,
    pub food_list: Vec<FoodEntryDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntryDetails {
    pub food_description: String,
    pub portion: f64,
    #[serde(flatten)]
    pub macros: ScaledMacros,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_deserializes_client_shape() {
        let body = serde_json::json!({
            "description": "Cutting",
            "weight": 82.5,
            "height": 1.8,
            "tdee": 2600,
            "meals": [{
                "description": "Breakfast",
                "time": "08:30",
                "ordination": 1,
                "foodList": [{
                    "foodDescription": "Oats",
                    "portion": 150,
                    // client-side scaled values are accepted and ignored
                    "carbohydrates": 30.0,
                    "calories": 180.0
                }]
            }]
        });
        let payload: DietPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.meals.len(), 1);
        let meal = &payload.meals[0];
        assert_eq!(meal.time.unwrap().hour(), 8);
        assert_eq!(meal.food_list[0].food_description, "Oats");
        assert_eq!(meal.food_list[0].portion, 150.0);
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let payload: DietPayload =
            serde_json::from_value(serde_json::json!({ "meals": [{}] })).unwrap();
        assert!(payload.description.is_empty());
        assert!(payload.weight.is_none());
        assert!(payload.meals[0].time.is_none());
        assert!(payload.meals[0].food_list.is_empty());
    }

    #[test]
    fn details_serialize_flattened_totals_and_macros() {
        let details = MealDetails {
            description: "Lunch".into(),
            time: Time::from_hms(12, 0, 0).unwrap(),
            ordination: 2,
            totals: MealTotals {
                total_calories: 400.0,
            },
            food_list: vec![FoodEntryDetails {
                food_description: "Rice".into(),
                portion: 200.0,
                macros: ScaledMacros {
                    carbohydrates: 56.0,
                    protein: 5.0,
                    total_fat: 0.6,
                    calories: 260.0,
                },
            }],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["time"], "12:00");
        assert_eq!(json["totalCalories"], 400.0);
        assert_eq!(json["foodList"][0]["foodDescription"], "Rice");
        assert_eq!(json["foodList"][0]["totalFat"], 0.6);
    }
}
