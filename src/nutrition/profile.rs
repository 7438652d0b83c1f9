use serde::{Deserialize, Serialize};

/// Macro values of a food item, defined per `serving_size` grams.
/// Immutable reference data; scaling never mutates a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionProfile {
    pub serving_size: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub calories: f64,
}

/// Macro values recomputed for a concrete portion of a food entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledMacros {
    pub carbohydrates: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub calories: f64,
}
