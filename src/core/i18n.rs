//! Display strings per locale.
//!
//! Every lookup is an exhaustive match over closed enums, so adding a category or a
//! locale is a compile error until each table has its entry.

use crate::core::period::CUSTOM_RANGE_LABEL;
use crate::entities::{ExpenseCategory, Locale, MealType};

/// Display name of an expense category
#[must_use]
pub const fn category_name(category: ExpenseCategory, locale: Locale) -> &'static str {
    match (locale, category) {
        (Locale::Es, ExpenseCategory::Food) => "Comida",
        (Locale::Es, ExpenseCategory::Transport) => "Transporte",
        (Locale::Es, ExpenseCategory::Housing) => "Vivienda",
        (Locale::Es, ExpenseCategory::Utilities) => "Servicios",
        (Locale::Es, ExpenseCategory::Health) => "Salud",
        (Locale::Es, ExpenseCategory::Entertainment) => "Entretenimiento",
        (Locale::Es, ExpenseCategory::Shopping) => "Compras",
        (Locale::Es, ExpenseCategory::Education) => "Educación",
        (Locale::Es, ExpenseCategory::Other) => "Otros",
        (Locale::En, ExpenseCategory::Food) => "Food",
        (Locale::En, ExpenseCategory::Transport) => "Transport",
        (Locale::En, ExpenseCategory::Housing) => "Housing",
        (Locale::En, ExpenseCategory::Utilities) => "Utilities",
        (Locale::En, ExpenseCategory::Health) => "Health",
        (Locale::En, ExpenseCategory::Entertainment) => "Entertainment",
        (Locale::En, ExpenseCategory::Shopping) => "Shopping",
        (Locale::En, ExpenseCategory::Education) => "Education",
        (Locale::En, ExpenseCategory::Other) => "Other",
    }
}

/// Display name of a meal type
#[must_use]
pub const fn meal_type_name(meal_type: MealType, locale: Locale) -> &'static str {
    match (locale, meal_type) {
        (Locale::Es, MealType::Breakfast) => "Desayuno",
        (Locale::Es, MealType::Lunch) => "Almuerzo",
        (Locale::Es, MealType::Dinner) => "Cena",
        (Locale::Es, MealType::Snack) => "Merienda",
        (Locale::En, MealType::Breakfast) => "Breakfast",
        (Locale::En, MealType::Lunch) => "Lunch",
        (Locale::En, MealType::Dinner) => "Dinner",
        (Locale::En, MealType::Snack) => "Snack",
    }
}

/// Translates a period label produced by the period module.
///
/// Unknown labels are returned unchanged.
#[must_use]
pub fn period_label<'a>(label: &'a str, locale: Locale) -> &'a str {
    match (locale, label) {
        (Locale::Es, "Today") => "Hoy",
        (Locale::Es, "This Week") => "Esta semana",
        (Locale::Es, "This Month") => "Este mes",
        (Locale::Es, "This Year") => "Este año",
        (Locale::Es, CUSTOM_RANGE_LABEL) => "Rango personalizado",
        _ => label,
    }
}

/// Neutral label for a window that does not contain the current instant, so a past
/// week reads "Semana" instead of "Esta semana".
///
/// Unknown labels are returned unchanged.
#[must_use]
pub fn past_period_label<'a>(label: &'a str, locale: Locale) -> &'a str {
    match (locale, label) {
        (Locale::Es, "Today") => "Día",
        (Locale::Es, "This Week") => "Semana",
        (Locale::Es, "This Month") => "Mes",
        (Locale::Es, "This Year") => "Año",
        (Locale::En, "Today") => "Day",
        (Locale::En, "This Week") => "Week",
        (Locale::En, "This Month") => "Month",
        (Locale::En, "This Year") => "Year",
        _ => period_label(label, locale),
    }
}

/// Fixed reply phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    /// Header word before the total
    Total,
    /// Word after the entry count
    Entries,
    /// Empty summary line
    NoEntries,
    /// Confirmation after logging an expense
    ExpenseLogged,
    /// Confirmation after logging a meal
    MealLogged,
    /// Confirmation after deleting an expense
    ExpenseDeleted,
    /// Confirmation after changing the language
    LanguageChanged,
    /// Prefix of error replies
    ErrorPrefix,
    /// Header of the nutrition reply
    Nutrition,
    /// Header of the recent expenses reply
    RecentExpenses,
}

/// Text of a reply phrase
#[must_use]
pub const fn phrase(phrase: Phrase, locale: Locale) -> &'static str {
    match (locale, phrase) {
        (Locale::Es, Phrase::Total) => "Total",
        (Locale::Es, Phrase::Entries) => "registros",
        (Locale::Es, Phrase::NoEntries) => "No hay registros en este periodo.",
        (Locale::Es, Phrase::ExpenseLogged) => "Gasto registrado",
        (Locale::Es, Phrase::MealLogged) => "Comida registrada",
        (Locale::Es, Phrase::ExpenseDeleted) => "Gasto eliminado",
        (Locale::Es, Phrase::LanguageChanged) => "Idioma actualizado",
        (Locale::Es, Phrase::ErrorPrefix) => "No pude procesar tu mensaje",
        (Locale::Es, Phrase::Nutrition) => "Nutrición",
        (Locale::Es, Phrase::RecentExpenses) => "Últimos gastos",
        (Locale::En, Phrase::Total) => "Total",
        (Locale::En, Phrase::Entries) => "entries",
        (Locale::En, Phrase::NoEntries) => "No entries in this period.",
        (Locale::En, Phrase::ExpenseLogged) => "Expense logged",
        (Locale::En, Phrase::MealLogged) => "Meal logged",
        (Locale::En, Phrase::ExpenseDeleted) => "Expense deleted",
        (Locale::En, Phrase::LanguageChanged) => "Language updated",
        (Locale::En, Phrase::ErrorPrefix) => "I couldn't process your message",
        (Locale::En, Phrase::Nutrition) => "Nutrition",
        (Locale::En, Phrase::RecentExpenses) => "Recent expenses",
    }
}

/// Something with a localized display name, used by the generic summary renderer
pub trait Localized {
    /// Name of `self` in `locale`
    fn display_name(&self, locale: Locale) -> &'static str;
}

impl Localized for ExpenseCategory {
    fn display_name(&self, locale: Locale) -> &'static str {
        category_name(*self, locale)
    }
}

impl Localized for MealType {
    fn display_name(&self, locale: Locale) -> &'static str {
        meal_type_name(*self, locale)
    }
}
