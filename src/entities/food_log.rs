//! Food log entity - One meal or snack with its nutritional quantities.
use super::enums::MealType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Food log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_logs")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Phone number of the user who logged the meal
    pub user_id: String,
    /// Meal slot, used as the category when summarizing
    pub meal_type: MealType,
    /// What was eaten
    pub description: String,
    /// Energy in kilocalories
    pub calories: i32,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// When the meal was eaten
    pub occurred_at: DateTimeUtc,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Food logs reference users by phone number only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
