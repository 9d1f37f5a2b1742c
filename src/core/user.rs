//! User business logic - registration and preferences.
//!
//! Users are created on their first message and identified by phone number from
//! then on. Records reference users through that phone number.

use crate::{
    entities::{Locale, User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

const DEFAULT_TIMEZONE: &str = "America/Bogota";

/// Finds a user by phone number.
pub async fn get_user_by_phone(
    db: &DatabaseConnection,
    phone_number: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::PhoneNumber.eq(phone_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the user registered under `phone_number`, creating it first if needed.
///
/// An empty display name falls back to the phone number itself.
pub async fn get_or_create_user(
    db: &DatabaseConnection,
    phone_number: &str,
    display_name: &str,
    locale: Locale,
) -> Result<user::Model> {
    let phone_number = phone_number.trim();
    if phone_number.is_empty() {
        return Err(Error::InvalidCommand {
            message: "phone number cannot be empty".to_string(),
        });
    }

    if let Some(existing) = get_user_by_phone(db, phone_number).await? {
        return Ok(existing);
    }

    let display_name = match display_name.trim() {
        "" => phone_number.to_string(),
        name => name.to_string(),
    };

    let user = user::ActiveModel {
        phone_number: Set(phone_number.to_string()),
        display_name: Set(display_name),
        locale: Set(locale),
        timezone: Set(DEFAULT_TIMEZONE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user.insert(db).await?;
    tracing::info!("Registered new user {}", result.phone_number);
    Ok(result)
}

/// Changes the reply language of an existing user.
pub async fn set_user_locale(
    db: &DatabaseConnection,
    phone_number: &str,
    locale: Locale,
) -> Result<user::Model> {
    let user = get_user_by_phone(db, phone_number)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            phone: phone_number.to_string(),
        })?;

    let mut active_model: user::ActiveModel = user.into();
    active_model.locale = Set(locale);
    active_model.update(db).await.map_err(Into::into)
}
