use super::{NutritionProfile, ScaledMacros};

/// Scale a profile's macro values to an arbitrary portion (grams).
///
/// Ratio model: `scaled = value * portion / serving_size`. Returns `None`
/// when the portion is not a finite positive number or the profile carries
/// a non-positive serving size; callers keep their previous state in that
/// case rather than observing an error.
pub fn scale(profile: &NutritionProfile, portion: f64) -> Option<ScaledMacros> {
    if !portion.is_finite() || portion <= 0.0 {
        return None;
    }
    if !profile.serving_size.is_finite() || profile.serving_size <= 0.0 {
        return None;
    }

    let ratio = portion / profile.serving_size;
    Some(ScaledMacros {
        carbohydrates: profile.carbohydrates * ratio,
        protein: profile.protein * ratio,
        total_fat: profile.total_fat * ratio,
        calories: profile.calories * ratio,
    })
}

/// Portion-field edit semantics: recompute scaled values when possible,
/// otherwise keep what the entry already had. A missing profile (the food
/// description no longer resolves against the catalog) also leaves the
/// entry untouched.
pub fn rescale_or_keep(
    profile: Option<&NutritionProfile>,
    portion: f64,
    previous: &ScaledMacros,
) -> ScaledMacros {
    profile
        .and_then(|p| scale(p, portion))
        .unwrap_or_else(|| previous.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> NutritionProfile {
        NutritionProfile {
            serving_size: 100.0,
            carbohydrates: 20.0,
            protein: 5.0,
            total_fat: 2.0,
            calories: 120.0,
        }
    }

    #[test]
    fn scales_by_portion_ratio() {
        let scaled = scale(&profile(), 150.0).expect("valid portion");
        assert_eq!(scaled.carbohydrates, 30.0);
        assert_eq!(scaled.protein, 7.5);
        assert_eq!(scaled.total_fat, 3.0);
        assert_eq!(scaled.calories, 180.0);
    }

    #[test]
    fn portion_of_two_and_a_half_servings() {
        let scaled = scale(&profile(), 250.0).expect("valid portion");
        assert_eq!(scaled.calories, 120.0 * 2.5);
    }

    #[test]
    fn fractional_portions_are_not_rounded() {
        let scaled = scale(&profile(), 150.5).expect("valid portion");
        assert_eq!(scaled.calories, 120.0 * 1.505);
        assert_eq!(scaled.protein, 5.0 * 1.505);
    }

    #[test]
    fn scaling_is_idempotent() {
        let a = scale(&profile(), 250.0).unwrap();
        let b = scale(&profile(), 250.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_positive_portion() {
        assert!(scale(&profile(), 0.0).is_none());
        assert!(scale(&profile(), -5.0).is_none());
    }

    #[test]
    fn rejects_nan_and_infinite_portion() {
        assert!(scale(&profile(), f64::NAN).is_none());
        assert!(scale(&profile(), f64::INFINITY).is_none());
    }

    #[test]
    fn rejects_degenerate_serving_size() {
        let mut p = profile();
        p.serving_size = 0.0;
        assert!(scale(&p, 100.0).is_none());
    }

    #[test]
    fn invalid_portion_keeps_previous_values() {
        let previous = scale(&profile(), 150.0).unwrap();
        let kept = rescale_or_keep(Some(&profile()), f64::NAN, &previous);
        assert_eq!(kept, previous);
        let kept = rescale_or_keep(Some(&profile()), -5.0, &previous);
        assert_eq!(kept, previous);
    }

    #[test]
    fn lookup_miss_keeps_previous_values() {
        let previous = scale(&profile(), 150.0).unwrap();
        let kept = rescale_or_keep(None, 200.0, &previous);
        assert_eq!(kept, previous);
    }

    #[test]
    fn valid_edit_replaces_previous_values() {
        let previous = scale(&profile(), 150.0).unwrap();
        let next = rescale_or_keep(Some(&profile()), 50.0, &previous);
        assert_eq!(next.calories, 60.0);
    }
}
