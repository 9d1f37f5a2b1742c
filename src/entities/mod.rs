//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their closed value sets.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod enums;
pub mod expense;
pub mod food_log;
pub mod user;

// Re-export specific types to avoid conflicts
pub use enums::{ExpenseCategory, Locale, MealType};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use food_log::{Column as FoodLogColumn, Entity as FoodLog, Model as FoodLogModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
