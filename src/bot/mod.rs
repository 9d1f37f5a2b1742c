//! Bot layer - chat command parsing, message handling and the console transport
//!
//! Everything here is transport-agnostic except [`console`], which feeds stdin lines
//! to [`handlers::handle_message`] and prints the replies.

/// Text command parsing
pub mod commands;
/// Stdin/stdout transport for local use
pub mod console;
/// Command execution and reply building
pub mod handlers;

use crate::{config::settings::Settings, errors::Result};
use chrono::FixedOffset;
use sea_orm::DatabaseConnection;

/// Shared data available to every message handler.
/// Holds the database connection and the deployment settings; nothing is global.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Deployment settings (offset, default locale, currency)
    pub settings: Settings,
    /// Offset used for every period boundary, derived once from `settings`
    pub offset: FixedOffset,
}

impl BotData {
    /// Creates the handler context, validating the configured offset.
    pub fn new(database: DatabaseConnection, settings: Settings) -> Result<Self> {
        let offset = settings.offset()?;
        Ok(Self {
            database,
            settings,
            offset,
        })
    }
}

pub use commands::{Command, parse_command};
pub use handlers::handle_message;
