use serde::Serialize;

use super::ScaledMacros;

/// Derived totals of one meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTotals {
    pub total_calories: f64,
}

/// Derived totals of a whole diet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietTotals {
    pub total_calories: f64,
}

/// Sum already-scaled entries into meal totals. An empty meal is a valid
/// meal under construction and totals zero.
pub fn meal_totals<'a, I>(entries: I) -> MealTotals
where
    I: IntoIterator<Item = &'a ScaledMacros>,
{
    MealTotals {
        total_calories: entries.into_iter().map(|e| e.calories).sum(),
    }
}

/// Sum meal totals into diet totals.
pub fn diet_totals<'a, I>(meals: I) -> DietTotals
where
    I: IntoIterator<Item = &'a MealTotals>,
{
    DietTotals {
        total_calories: meals.into_iter().map(|m| m.total_calories).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(calories: f64) -> ScaledMacros {
        ScaledMacros {
            calories,
            ..Default::default()
        }
    }

    #[test]
    fn empty_meal_totals_zero() {
        let no_entries: [ScaledMacros; 0] = [];
        assert_eq!(meal_totals(no_entries.iter()).total_calories, 0.0);
    }

    #[test]
    fn meal_totals_sum_scaled_calories() {
        let entries = [entry(180.0), entry(220.0)];
        assert_eq!(meal_totals(entries.iter()).total_calories, 400.0);
    }

    #[test]
    fn meal_totals_are_order_independent() {
        let forward = [entry(12.5), entry(80.25), entry(301.0)];
        let reversed = [entry(301.0), entry(80.25), entry(12.5)];
        assert_eq!(meal_totals(forward.iter()), meal_totals(reversed.iter()));
    }

    #[test]
    fn diet_totals_sum_meal_totals() {
        let meals = [
            MealTotals {
                total_calories: 400.0,
            },
            MealTotals {
                total_calories: 350.0,
            },
        ];
        assert_eq!(diet_totals(meals.iter()).total_calories, 750.0);
    }

    #[test]
    fn diet_tolerates_empty_meals() {
        let no_entries: [ScaledMacros; 0] = [];
        let meals = [
            meal_totals(no_entries.iter()),
            meal_totals([entry(100.0)].iter()),
        ];
        assert_eq!(diet_totals(meals.iter()).total_calories, 100.0);
    }

    #[test]
    fn totals_serialize_camel_case() {
        let json = serde_json::to_value(meal_totals([entry(1.0)].iter())).unwrap();
        assert_eq!(json["totalCalories"], 1.0);
    }
}
