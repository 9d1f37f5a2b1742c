//! Expense business logic - Handles creating, querying and removing expenses.
//!
//! Amounts enter and leave this module as [`Decimal`] and are persisted as integer
//! minor units, so a stored expense always reads back as exactly the amount typed.
//! The window query backing expense summaries lives here as well.

use crate::{
    core::{
        period::PeriodWindow,
        summary::{Aggregatable, RecordSource},
    },
    entities::{Expense, ExpenseCategory, expense},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

const MINOR_UNIT_SCALE: u32 = 2;
const DEFAULT_DESCRIPTION: &str = "Expense";

/// Converts a positive amount with at most two decimal places into minor units.
///
/// Amounts whose minor units do not fit in an `i64` are rejected as invalid.
pub fn amount_to_minor(amount: Decimal) -> Result<i64> {
    if amount <= Decimal::ZERO || amount.normalize().scale() > MINOR_UNIT_SCALE {
        return Err(Error::InvalidAmount { amount });
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(Error::InvalidAmount { amount })
}

/// Converts stored minor units back into a decimal amount.
#[must_use]
pub fn minor_to_amount(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

impl expense::Model {
    /// The expense amount as a decimal
    #[must_use]
    pub fn amount(&self) -> Decimal {
        minor_to_amount(self.amount_minor)
    }
}

impl Aggregatable for expense::Model {
    type Category = ExpenseCategory;

    fn category(&self) -> ExpenseCategory {
        self.category
    }

    fn amount(&self) -> Decimal {
        minor_to_amount(self.amount_minor)
    }
}

/// Creates a new expense for `user_id`.
///
/// The amount must be positive with at most two decimal places. A blank description
/// is replaced with a generic one, and `occurred_at` defaults to the current instant.
pub async fn create_expense(
    db: &DatabaseConnection,
    user_id: &str,
    amount: Decimal,
    category: ExpenseCategory,
    description: &str,
    occurred_at: Option<DateTime<Utc>>,
) -> Result<expense::Model> {
    let amount_minor = amount_to_minor(amount)?;
    let description = match description.trim() {
        "" => DEFAULT_DESCRIPTION.to_string(),
        trimmed => trimmed.to_string(),
    };

    let now = Utc::now();
    let expense = expense::ActiveModel {
        user_id: Set(user_id.to_string()),
        amount_minor: Set(amount_minor),
        category: Set(category),
        description: Set(description),
        occurred_at: Set(occurred_at.unwrap_or(now)),
        created_at: Set(now),
        notes: Set(None),
        ..Default::default()
    };

    let result = expense.insert(db).await?;
    tracing::info!(
        "Logged expense {} for {user_id}: {} ({})",
        result.id,
        result.amount(),
        result.category.as_str()
    );
    Ok(result)
}

/// Finds the expenses of `user_id` that occurred inside `window`, optionally limited
/// to one category, oldest first.
pub async fn find_expenses<C>(
    db: &C,
    user_id: &str,
    window: &PeriodWindow,
    category: Option<ExpenseCategory>,
) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::OccurredAt.gte(window.start))
        .filter(expense::Column::OccurredAt.lt(window.end));

    if let Some(category) = category {
        query = query.filter(expense::Column::Category.eq(category));
    }

    query
        .order_by_asc(expense::Column::OccurredAt)
        .all(db)
        .await
        .map_err(Into::into)
}

impl RecordSource<expense::Model> for DatabaseConnection {
    async fn find_records(
        &self,
        user_id: &str,
        window: &PeriodWindow,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<expense::Model>> {
        find_expenses(self, user_id, window, category).await
    }
}

/// Retrieves the latest expenses of a user, newest first.
pub async fn get_recent_expenses(
    db: &DatabaseConnection,
    user_id: &str,
    limit: u64,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .order_by_desc(expense::Column::OccurredAt)
        .order_by_desc(expense::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one expense, only if it belongs to `user_id`.
pub async fn get_expense_for_user(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .filter(expense::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Attaches or replaces the note of an expense owned by `user_id`.
pub async fn set_expense_notes(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: i64,
    notes: Option<String>,
) -> Result<expense::Model> {
    let expense = get_expense_for_user(db, user_id, expense_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    let mut active_model: expense::ActiveModel = expense.into();
    active_model.notes = Set(notes);
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an expense owned by `user_id`.
pub async fn delete_expense(db: &DatabaseConnection, user_id: &str, expense_id: i64) -> Result<()> {
    let expense = get_expense_for_user(db, user_id, expense_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    expense.delete(db).await?;
    tracing::info!("Deleted expense {expense_id} for {user_id}");
    Ok(())
}
