//! Expense entity - One logged spend belonging to a single user.
//!
//! Amounts are stored as integer minor units (`amount_minor`, two decimal places) so
//! that totals can be accumulated exactly. `occurred_at` is when the money was spent,
//! which may differ from `created_at` when a user logs something after the fact.
use super::enums::ExpenseCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Phone number of the user who logged the expense
    pub user_id: String,
    /// Amount in minor currency units (cents), always positive
    pub amount_minor: i64,
    /// Spending category
    pub category: ExpenseCategory,
    /// Free-text description (e.g. "almuerzo con el equipo")
    pub description: String,
    /// When the spend happened
    pub occurred_at: DateTimeUtc,
    /// When the row was written
    pub created_at: DateTimeUtc,
    /// Optional note, the only field that may change after creation
    pub notes: Option<String>,
}

/// Expenses reference users by phone number only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
