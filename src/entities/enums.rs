//! Closed value sets stored as text columns.
//!
//! Categories, meal types and locales are known at compile time, so they are plain
//! enums persisted through `DeriveActiveEnum` rather than lookup tables.

use crate::errors::Error;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Spending category of an expense
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Groceries, restaurants, coffee
    #[sea_orm(string_value = "food")]
    Food,
    /// Bus, taxi, fuel, parking
    #[sea_orm(string_value = "transport")]
    Transport,
    /// Rent and home maintenance
    #[sea_orm(string_value = "housing")]
    Housing,
    /// Electricity, water, phone, internet
    #[sea_orm(string_value = "utilities")]
    Utilities,
    /// Pharmacy, doctor, gym
    #[sea_orm(string_value = "health")]
    Health,
    /// Movies, outings, subscriptions
    #[sea_orm(string_value = "entertainment")]
    Entertainment,
    /// Clothes and other purchases
    #[sea_orm(string_value = "shopping")]
    Shopping,
    /// Courses, books, tuition
    #[sea_orm(string_value = "education")]
    Education,
    /// Anything else
    #[sea_orm(string_value = "other")]
    Other,
}

impl ExpenseCategory {
    /// Stable identifier used in the database and in commands
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Health => "health",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    /// Accepts the English identifier or the common Spanish word for the category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" | "comida" | "alimentacion" | "alimentación" => Ok(Self::Food),
            "transport" | "transporte" => Ok(Self::Transport),
            "housing" | "vivienda" | "arriendo" => Ok(Self::Housing),
            "utilities" | "servicios" => Ok(Self::Utilities),
            "health" | "salud" => Ok(Self::Health),
            "entertainment" | "entretenimiento" | "ocio" => Ok(Self::Entertainment),
            "shopping" | "compras" => Ok(Self::Shopping),
            "education" | "educacion" | "educación" => Ok(Self::Education),
            "other" | "otro" | "otros" => Ok(Self::Other),
            _ => Err(Error::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

/// Meal slot of a food log entry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Morning meal
    #[sea_orm(string_value = "breakfast")]
    Breakfast,
    /// Midday meal
    #[sea_orm(string_value = "lunch")]
    Lunch,
    /// Evening meal
    #[sea_orm(string_value = "dinner")]
    Dinner,
    /// Anything between meals
    #[sea_orm(string_value = "snack")]
    Snack,
}

impl MealType {
    /// Stable identifier used in the database and in commands
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "desayuno" => Ok(Self::Breakfast),
            "lunch" | "almuerzo" => Ok(Self::Lunch),
            "dinner" | "cena" | "comida" => Ok(Self::Dinner),
            "snack" | "merienda" | "onces" => Ok(Self::Snack),
            _ => Err(Error::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

/// Display language of a user
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish
    #[default]
    #[sea_orm(string_value = "es")]
    Es,
    /// English
    #[sea_orm(string_value = "en")]
    En,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "espanol" | "español" | "spanish" => Ok(Self::Es),
            "en" | "ingles" | "inglés" | "english" => Ok(Self::En),
            _ => Err(Error::InvalidCommand {
                message: format!("unsupported language '{s}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_expense_category_accepts_spanish_aliases() {
        assert!(matches!("comida".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Food)));
        assert!(matches!("Transporte".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Transport)));
        assert!(matches!(" salud ".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Health)));
    }

    #[test]
    fn test_expense_category_identifier_round_trips() {
        for category in ExpenseCategory::iter() {
            let parsed = category.as_str().parse::<ExpenseCategory>().ok();
            assert_eq!(parsed, Some(category));
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = "crypto".parse::<ExpenseCategory>();
        assert!(matches!(result, Err(Error::UnknownCategory { name }) if name == "crypto"));
    }

    #[test]
    fn test_meal_type_aliases() {
        assert!(matches!("desayuno".parse::<MealType>(), Ok(MealType::Breakfast)));
        assert!(matches!("LUNCH".parse::<MealType>(), Ok(MealType::Lunch)));
        assert!(matches!("onces".parse::<MealType>(), Ok(MealType::Snack)));
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>().ok(), Some(Locale::En));
        assert_eq!("Español".parse::<Locale>().ok(), Some(Locale::Es));
        assert!("fr".parse::<Locale>().is_err());
    }
}
