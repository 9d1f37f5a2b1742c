//! Chat command parsing.
//!
//! Messages are whitespace-separated words; the first word picks the command and
//! accepts a Spanish or an English spelling. Parsing is pure and does not touch the
//! database, so every malformed message is rejected before any work is done.

use crate::{
    core::{
        food::Nutrition,
        period::{self, PeriodKind},
    },
    entities::{ExpenseCategory, Locale, MealType},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

const DEFAULT_RECENT_LIMIT: u64 = 5;
const MAX_RECENT_LIMIT: u64 = 20;

/// A parsed chat command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Health check
    Ping,
    /// Usage help
    Help,
    /// Log an expense
    LogExpense {
        /// Amount spent
        amount: Decimal,
        /// Spending category
        category: ExpenseCategory,
        /// Free-text description, possibly empty
        description: String,
    },
    /// Log a meal
    LogMeal {
        /// Meal slot
        meal_type: MealType,
        /// Calories and optional macronutrients
        nutrition: Nutrition,
        /// What was eaten
        description: String,
    },
    /// Spending summary of a named period
    ExpenseSummary {
        /// Period unit
        kind: PeriodKind,
        /// Date inside the period, today when `None`
        reference: Option<NaiveDate>,
        /// Optional category filter
        category: Option<ExpenseCategory>,
    },
    /// Calorie summary of a named period grouped by meal type
    FoodSummary {
        /// Period unit
        kind: PeriodKind,
        /// Date inside the period, today when `None`
        reference: Option<NaiveDate>,
        /// Optional meal type filter
        meal_type: Option<MealType>,
    },
    /// Spending summary of an explicit date range, both ends inclusive
    CustomRange {
        /// First day
        start: NaiveDate,
        /// Last day
        end: NaiveDate,
    },
    /// Macronutrient totals of a named period
    Nutrition {
        /// Period unit
        kind: PeriodKind,
        /// Date inside the period, today when `None`
        reference: Option<NaiveDate>,
    },
    /// Latest expenses
    Recent {
        /// How many to show
        limit: u64,
    },
    /// Delete one of the sender's expenses
    Delete {
        /// Expense id
        id: i64,
    },
    /// Attach a note to one of the sender's expenses
    Note {
        /// Expense id
        id: i64,
        /// Note text, empty to clear
        text: String,
    },
    /// Change reply language
    Language(Locale),
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidCommand {
        message: message.into(),
    }
}

fn looks_like_date(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit()) && token.contains('-')
}

/// Parses an amount such as `18500`, `$18500` or `12.50`.
pub fn parse_amount(token: &str) -> Result<Decimal> {
    let cleaned = token.trim().trim_start_matches('$');
    let amount = Decimal::from_str(cleaned)
        .map_err(|_| invalid(format!("'{token}' is not an amount")))?;
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

fn parse_id(token: Option<&&str>) -> Result<i64> {
    let token = token.ok_or_else(|| invalid("missing id"))?;
    token
        .trim_start_matches('#')
        .parse()
        .map_err(|_| invalid(format!("'{token}' is not an id")))
}

/// Splits optional `[period] [YYYY-MM-DD]` arguments off the front of `args`.
///
/// The period defaults to one day. A token shaped like a date must be a valid date.
fn parse_period_args<'a>(
    args: &'a [&'a str],
) -> Result<(PeriodKind, Option<NaiveDate>, &'a [&'a str])> {
    let mut rest = args;
    let mut kind = PeriodKind::Day;
    let mut reference = None;

    if let Some((first, tail)) = rest.split_first()
        && let Ok(parsed) = first.parse::<PeriodKind>()
    {
        kind = parsed;
        rest = tail;
    }

    if let Some((first, tail)) = rest.split_first()
        && looks_like_date(first)
    {
        reference = Some(period::parse_date(first)?);
        rest = tail;
    }

    Ok((kind, reference, rest))
}

fn parse_optional<T: FromStr<Err = Error>>(rest: &[&str]) -> Result<Option<T>> {
    match rest {
        [] => Ok(None),
        [single] => single.parse().map(Some),
        [_, extra, ..] => Err(invalid(format!("unexpected '{extra}'"))),
    }
}

fn parse_no_extra(rest: &[&str]) -> Result<()> {
    rest.first()
        .map_or(Ok(()), |extra| Err(invalid(format!("unexpected '{extra}'"))))
}

fn parse_log_meal(args: &[&str]) -> Result<Command> {
    let [meal, calories, rest @ ..] = args else {
        return Err(invalid("usage: meal <type> <kcal> [protein carbs fat] [description]"));
    };

    let meal_type = meal.parse()?;
    let calories = calories
        .parse()
        .map_err(|_| invalid(format!("'{calories}' is not a calorie count")))?;
    let mut nutrition = Nutrition {
        calories,
        ..Nutrition::default()
    };

    let mut description_words = rest;
    if let [protein, carbs, fat, tail @ ..] = rest
        && let (Ok(protein_g), Ok(carbs_g), Ok(fat_g)) =
            (protein.parse::<f64>(), carbs.parse::<f64>(), fat.parse::<f64>())
    {
        nutrition.protein_g = protein_g;
        nutrition.carbs_g = carbs_g;
        nutrition.fat_g = fat_g;
        description_words = tail;
    }
    nutrition.validate()?;

    Ok(Command::LogMeal {
        meal_type,
        nutrition,
        description: description_words.join(" "),
    })
}

/// Parses one chat message into a [`Command`].
pub fn parse_command(text: &str) -> Result<Command> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let Some((name, args)) = words.split_first() else {
        return Err(invalid("empty message"));
    };

    match name.trim_start_matches('/').to_lowercase().as_str() {
        "ping" => Ok(Command::Ping),
        "help" | "ayuda" => Ok(Command::Help),
        "gasto" | "spend" => {
            let [amount, category, description @ ..] = args else {
                return Err(invalid("usage: spend <amount> <category> [description]"));
            };
            Ok(Command::LogExpense {
                amount: parse_amount(amount)?,
                category: category.parse()?,
                description: description.join(" "),
            })
        }
        "comida" | "meal" => parse_log_meal(args),
        "resumen" | "summary" => {
            let (kind, reference, rest) = parse_period_args(args)?;
            Ok(Command::ExpenseSummary {
                kind,
                reference,
                category: parse_optional(rest)?,
            })
        }
        "calorias" | "calorías" | "calories" => {
            let (kind, reference, rest) = parse_period_args(args)?;
            Ok(Command::FoodSummary {
                kind,
                reference,
                meal_type: parse_optional(rest)?,
            })
        }
        "rango" | "range" => {
            let [start, end] = args else {
                return Err(invalid("usage: range <YYYY-MM-DD> <YYYY-MM-DD>"));
            };
            let start = period::parse_date(start)?;
            let end = period::parse_date(end)?;
            period::validate_range(start, end)?;
            Ok(Command::CustomRange { start, end })
        }
        "nutricion" | "nutrición" | "nutrition" => {
            let (kind, reference, rest) = parse_period_args(args)?;
            parse_no_extra(rest)?;
            Ok(Command::Nutrition { kind, reference })
        }
        "ultimos" | "últimos" | "recent" => {
            let limit = match args.first() {
                None => DEFAULT_RECENT_LIMIT,
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("'{raw}' is not a number")))?
                    .clamp(1, MAX_RECENT_LIMIT),
            };
            Ok(Command::Recent { limit })
        }
        "borrar" | "delete" => Ok(Command::Delete {
            id: parse_id(args.first())?,
        }),
        "nota" | "note" => Ok(Command::Note {
            id: parse_id(args.first())?,
            text: args.get(1..).unwrap_or_default().join(" "),
        }),
        "idioma" | "language" => {
            let [locale] = args else {
                return Err(invalid("usage: language <es|en>"));
            };
            Ok(Command::Language(locale.parse()?))
        }
        other => Err(invalid(format!("unknown command '{other}'"))),
    }
}
