//! User entity - A chat participant identified by phone number.
//!
//! `timezone` is kept for display and future use; period boundaries are computed with
//! the deployment-wide offset from [`crate::config::settings::Settings`].
use super::enums::Locale;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Phone number in international format, the identity used by all records
    #[sea_orm(unique)]
    pub phone_number: String,
    /// Name shown in replies
    pub display_name: String,
    /// Preferred reply language
    pub locale: Locale,
    /// IANA timezone name reported at registration
    pub timezone: String,
    /// When the user first wrote to the bot
    pub created_at: DateTimeUtc,
}

/// `User` has no declared relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
