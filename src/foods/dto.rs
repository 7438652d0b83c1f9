use serde::Deserialize;
use uuid::Uuid;

/// New food item, from the create form or one CSV import row.
/// Field names match the wire/CSV header shape (`servingSize`, `totalFat`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFood {
    pub description: String,
    pub serving_size: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub calories: f64,
}

impl NewFood {
    /// Catalog-entry sanity check: a name, a positive reference serving,
    /// and non-negative macro values.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description is required".into());
        }
        if !self.serving_size.is_finite() || self.serving_size <= 0.0 {
            return Err("servingSize must be positive".into());
        }
        for (name, value) in [
            ("carbohydrates", self.carbohydrates),
            ("protein", self.protein),
            ("totalFat", self.total_fat),
            ("calories", self.calories),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Sortable columns of the food listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodOrderBy {
    #[default]
    Description,
    ServingSize,
    Carbohydrates,
    Protein,
    TotalFat,
    Calories,
}

impl FoodOrderBy {
    pub fn column(self) -> &'static str {
        match self {
            FoodOrderBy::Description => "description",
            FoodOrderBy::ServingSize => "serving_size",
            FoodOrderBy::Carbohydrates => "carbohydrates",
            FoodOrderBy::Protein => "protein",
            FoodOrderBy::TotalFat => "total_fat",
            FoodOrderBy::Calories => "calories",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Sorting half of the `GET /food` query string; paging comes from
/// [`crate::pagination::PageParams`] through its own extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSortParams {
    #[serde(default)]
    pub order_by: FoodOrderBy,
    #[serde(default)]
    pub order_direction: OrderDirection,
}

/// Body of `DELETE /food`: ids of the catalog items to remove.
#[derive(Debug, Deserialize)]
pub struct DeleteFoodRequest {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}
