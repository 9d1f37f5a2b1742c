//! Core business logic - framework-agnostic period windows, summaries, and
//! record management. Nothing in here knows about the chat transport.

/// Expense creation, queries and the expense record source
pub mod expense;
/// Food logs, nutrition totals and the food record source
pub mod food;
/// Localized display strings
pub mod i18n;
/// Period window computation
pub mod period;
/// Text rendering of summaries
pub mod report;
/// Summary reduction and the storage read contract
pub mod summary;
/// User registration and preferences
pub mod user;
