//! Unified error types for `GastoBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures are
//! wrapped once in [`Error::Database`] and otherwise passed through untouched, so
//! callers can tell "the database is down" apart from "the user typed nonsense".

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors produced by the bot, its core logic and its configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Error bubbled up from the storage layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An amount that is zero, negative or has more than two decimal places
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A nutritional quantity that is negative or not a finite number
    #[error("Invalid quantity for {field}")]
    InvalidQuantity {
        /// Name of the offending field (e.g. `calories`)
        field: String,
    },

    /// A date string that is not `YYYY-MM-DD`
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The raw input
        input: String,
    },

    /// A custom range whose end lies before its start
    #[error("Invalid range: {start} is after {end}")]
    InvalidRange {
        /// Requested first day
        start: chrono::NaiveDate,
        /// Requested last day
        end: chrono::NaiveDate,
    },

    /// A chat message that does not parse as a command
    #[error("Invalid command: {message}")]
    InvalidCommand {
        /// Human readable reason
        message: String,
    },

    /// A category or meal type name outside the closed set
    #[error("Unknown category '{name}'")]
    UnknownCategory {
        /// The rejected name
        name: String,
    },

    /// No expense with this id belongs to the requesting user
    #[error("Expense {id} not found")]
    ExpenseNotFound {
        /// Requested expense id
        id: i64,
    },

    /// No user is registered under this phone number
    #[error("User '{phone}' not found")]
    UserNotFound {
        /// Requested phone number
        phone: String,
    },

    /// I/O error from the console transport or the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
