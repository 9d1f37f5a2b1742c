//! Text rendering of summaries and expense lists.
//!
//! The renderer is the only place that orders a breakdown (largest total first) and
//! the only place that translates labels and category names. It knows nothing
//! about how the summary was computed.

use crate::{
    core::{
        food::NutritionTotals,
        i18n::{self, Localized, Phrase},
        period::{PeriodWindow, local_date_of},
        summary::Summary,
    },
    entities::{Locale, expense},
};
use chrono::{DateTime, Days, FixedOffset, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::fmt::Write as _;

const BAR_LENGTH: usize = 10;

/// Generates a share bar like `[████████░░] 80.0%`.
#[must_use]
pub fn format_share_bar(share_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(BAR_LENGTH);
    let clamped = share_percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and length is small, so the product fits in usize
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {share_percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Percentage of `part` in `total`, zero when the total is zero.
#[must_use]
pub fn share_percent(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

/// Formats a money amount with thousands separators, e.g. `COP 18,500.00`.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}{currency} {grouped}.{fraction}")
}

/// Formats a whole quantity such as kilocalories.
#[must_use]
pub fn format_quantity(amount: Decimal, unit: &str) -> String {
    format!("{} {unit}", amount.round())
}

fn date_range_line(start: DateTime<Utc>, end: DateTime<Utc>, offset: FixedOffset) -> String {
    let first = local_date_of(start, offset);
    let last = local_date_of(end, offset) - Days::new(1);
    if first == last {
        first.format("%Y-%m-%d").to_string()
    } else {
        format!("{} - {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
    }
}

/// Translated label of a window, relative only while `now` falls inside it.
fn window_label<'a>(
    label: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    locale: Locale,
) -> &'a str {
    if start <= now && now < end {
        i18n::period_label(label, locale)
    } else {
        i18n::past_period_label(label, locale)
    }
}

/// Renders a summary as a chat reply.
///
/// `format_value` turns totals into text so the same layout serves money and
/// kilocalories.
pub fn render_summary<C, F>(
    summary: &Summary<C>,
    locale: Locale,
    offset: FixedOffset,
    format_value: F,
) -> String
where
    C: Ord + Localized,
    F: Fn(Decimal) -> String,
{
    let mut out = String::new();
    let _ = writeln!(
        out,
        "*{}* ({})",
        window_label(&summary.period_label, summary.start, summary.end, Utc::now(), locale),
        date_range_line(summary.start, summary.end, offset)
    );

    if summary.is_empty() {
        out.push_str(i18n::phrase(Phrase::NoEntries, locale));
        return out;
    }

    let _ = writeln!(
        out,
        "{}: {} · {} {}",
        i18n::phrase(Phrase::Total, locale),
        format_value(summary.total_amount),
        summary.entry_count,
        i18n::phrase(Phrase::Entries, locale)
    );

    for breakdown in summary.sorted_by_total() {
        let share = share_percent(breakdown.total, summary.total_amount);
        let _ = writeln!(
            out,
            "• {}: {} ({}) {}",
            breakdown.category.display_name(locale),
            format_value(breakdown.total),
            breakdown.count,
            format_share_bar(share, None)
        );
    }

    out.trim_end().to_string()
}

/// Renders nutrition totals for a period.
#[must_use]
pub fn render_nutrition(totals: &NutritionTotals, window: &PeriodWindow, locale: Locale) -> String {
    let period_label = window_label(&window.label, window.start, window.end, Utc::now(), locale);
    if totals.entries == 0 {
        return format!(
            "*{}* ({})\n{}",
            i18n::phrase(Phrase::Nutrition, locale),
            period_label,
            i18n::phrase(Phrase::NoEntries, locale)
        );
    }

    let fat_initial = match locale {
        Locale::Es => "G",
        Locale::En => "F",
    };
    format!(
        "*{}* ({})\n{} kcal · P {:.1} g · C {:.1} g · {fat_initial} {:.1} g · {} {}",
        i18n::phrase(Phrase::Nutrition, locale),
        period_label,
        totals.calories,
        totals.protein_g,
        totals.carbs_g,
        totals.fat_g,
        totals.entries,
        i18n::phrase(Phrase::Entries, locale)
    )
}

/// Generates a one-line description of an expense.
#[must_use]
pub fn format_expense_line(
    expense: &expense::Model,
    locale: Locale,
    currency: &str,
    offset: FixedOffset,
) -> String {
    format!(
        "#{} {} | {} | {} | {}",
        expense.id,
        expense.occurred_at.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
        format_amount(expense.amount(), currency),
        expense.category.display_name(locale),
        expense.description
    )
}

/// Renders a list of expenses, newest first as given.
#[must_use]
pub fn render_expense_list(
    expenses: &[expense::Model],
    locale: Locale,
    currency: &str,
    offset: FixedOffset,
) -> String {
    if expenses.is_empty() {
        return i18n::phrase(Phrase::NoEntries, locale).to_string();
    }

    let mut out = format!("*{}*", i18n::phrase(Phrase::RecentExpenses, locale));
    for expense in expenses {
        out.push('\n');
        out.push_str(&format_expense_line(expense, locale, currency, offset));
    }
    out
}
