//! Portion-scaling and calorie-aggregation core.
//!
//! Pure computation only: no I/O, no shared state. The HTTP layer feeds
//! catalog profiles and user-chosen portions in; scaled macro values and
//! derived totals come out.

mod aggregate;
mod profile;
mod scale;
pub mod validate;

pub use aggregate::{diet_totals, meal_totals, DietTotals, MealTotals};
pub use profile::{NutritionProfile, ScaledMacros};
pub use scale::{rescale_or_keep, scale};
