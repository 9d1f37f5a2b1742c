/// Database configuration and connection management
pub mod database;

/// Bot settings from config.toml and environment overrides
pub mod settings;
