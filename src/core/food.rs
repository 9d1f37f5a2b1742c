//! Food log business logic - meals, their nutrition, and window queries.
//!
//! Food entries are summarized like expenses with the meal type as category and
//! kilocalories as the summed quantity. [`NutritionTotals`] adds the macronutrient
//! totals for the same window.

use crate::{
    core::{
        period::PeriodWindow,
        summary::{Aggregatable, RecordSource},
    },
    entities::{FoodLog, MealType, food_log},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Nutritional quantities of one meal as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Nutrition {
    /// Kilocalories
    pub calories: i32,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

impl Nutrition {
    /// Rejects negative or non-finite quantities.
    pub fn validate(&self) -> Result<()> {
        if self.calories < 0 {
            return Err(Error::InvalidQuantity {
                field: "calories".to_string(),
            });
        }
        for (field, value) in [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidQuantity {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Macronutrient totals over a window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    /// Total kilocalories
    pub calories: i64,
    /// Total protein in grams
    pub protein_g: f64,
    /// Total carbohydrates in grams
    pub carbs_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Number of entries
    pub entries: usize,
}

impl NutritionTotals {
    /// Adds one food log to the totals.
    pub fn add(&mut self, entry: &food_log::Model) {
        self.calories += i64::from(entry.calories);
        self.protein_g += entry.protein_g;
        self.carbs_g += entry.carbs_g;
        self.fat_g += entry.fat_g;
        self.entries += 1;
    }
}

impl Aggregatable for food_log::Model {
    type Category = MealType;

    fn category(&self) -> MealType {
        self.meal_type
    }

    fn amount(&self) -> Decimal {
        Decimal::from(self.calories)
    }
}

/// Logs a meal for `user_id`; `occurred_at` defaults to now.
pub async fn create_food_log(
    db: &DatabaseConnection,
    user_id: &str,
    meal_type: MealType,
    description: &str,
    nutrition: Nutrition,
    occurred_at: Option<DateTime<Utc>>,
) -> Result<food_log::Model> {
    nutrition.validate()?;

    let now = Utc::now();
    let entry = food_log::ActiveModel {
        user_id: Set(user_id.to_string()),
        meal_type: Set(meal_type),
        description: Set(description.trim().to_string()),
        calories: Set(nutrition.calories),
        protein_g: Set(nutrition.protein_g),
        carbs_g: Set(nutrition.carbs_g),
        fat_g: Set(nutrition.fat_g),
        occurred_at: Set(occurred_at.unwrap_or(now)),
        created_at: Set(now),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    tracing::info!(
        "Logged {} ({} kcal) for {user_id}",
        result.meal_type.as_str(),
        result.calories
    );
    Ok(result)
}

/// Finds the food logs of `user_id` inside `window`, optionally for one meal type.
pub async fn find_food_logs<C>(
    db: &C,
    user_id: &str,
    window: &PeriodWindow,
    meal_type: Option<MealType>,
) -> Result<Vec<food_log::Model>>
where
    C: ConnectionTrait,
{
    let mut query = FoodLog::find()
        .filter(food_log::Column::UserId.eq(user_id))
        .filter(food_log::Column::OccurredAt.gte(window.start))
        .filter(food_log::Column::OccurredAt.lt(window.end));

    if let Some(meal_type) = meal_type {
        query = query.filter(food_log::Column::MealType.eq(meal_type));
    }

    query
        .order_by_asc(food_log::Column::OccurredAt)
        .all(db)
        .await
        .map_err(Into::into)
}

impl RecordSource<food_log::Model> for DatabaseConnection {
    async fn find_records(
        &self,
        user_id: &str,
        window: &PeriodWindow,
        category: Option<MealType>,
    ) -> Result<Vec<food_log::Model>> {
        find_food_logs(self, user_id, window, category).await
    }
}

/// Sums calories and macronutrients of `user_id` over `window`.
pub async fn compute_nutrition_totals(
    db: &DatabaseConnection,
    user_id: &str,
    window: &PeriodWindow,
) -> Result<NutritionTotals> {
    let entries = find_food_logs(db, user_id, window, None).await?;
    let mut totals = NutritionTotals::default();
    for entry in &entries {
        totals.add(entry);
    }
    Ok(totals)
}
