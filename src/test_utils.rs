//! Shared test utilities for `GastoBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{expense, food},
    entities::{self, ExpenseCategory, MealType},
    errors::Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Phone number used as the default test user
pub const TEST_USER: &str = "573001112233";

/// A second user whose records must never leak into `TEST_USER` results
pub const OTHER_USER: &str = "573009998877";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a food expense happening now.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: &str,
    amount: Decimal,
) -> Result<entities::expense::Model> {
    expense::create_expense(db, user_id, amount, ExpenseCategory::Food, "Test expense", None).await
}

/// Creates an expense at a specific instant.
pub async fn create_test_expense_at(
    db: &DatabaseConnection,
    user_id: &str,
    amount: Decimal,
    category: ExpenseCategory,
    occurred_at: DateTime<Utc>,
) -> Result<entities::expense::Model> {
    expense::create_expense(db, user_id, amount, category, "Test expense", Some(occurred_at)).await
}

/// Creates a food log with only calories set.
pub async fn create_test_food_log_at(
    db: &DatabaseConnection,
    user_id: &str,
    meal_type: MealType,
    calories: i32,
    occurred_at: DateTime<Utc>,
) -> Result<entities::food_log::Model> {
    food::create_food_log(
        db,
        user_id,
        meal_type,
        "Test meal",
        food::Nutrition {
            calories,
            ..food::Nutrition::default()
        },
        Some(occurred_at),
    )
    .await
}
