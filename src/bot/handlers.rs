//! Message handling: register the sender, parse the text, run the command and build
//! the reply.
//!
//! [`handle_message`] never fails. Errors are logged and turned into a reply in the
//! sender's language so the transport only ever has text to send back. Amounts and
//! dates out of the representable range come back as `InvalidAmount` and
//! `InvalidDate` errors like any other bad input.

use super::{
    BotData,
    commands::{Command, parse_command},
};
use crate::{
    core::{
        expense, food,
        i18n::{self, Localized, Phrase},
        period, report, summary, user,
    },
    entities::{Locale, expense as expense_entity, food_log, user as user_entity},
    errors::{Error, Result},
};
use tracing::{error, info, warn};

const HELP_ES: &str = "\
*Comandos*
• gasto <monto> <categoría> [descripción]
• comida <tipo> <kcal> [proteína carbohidratos grasa] [descripción]
• resumen [hoy|semana|mes|año] [AAAA-MM-DD] [categoría]
• calorias [periodo] [AAAA-MM-DD] [tipo de comida]
• nutricion [periodo] [AAAA-MM-DD]
• rango <AAAA-MM-DD> <AAAA-MM-DD>
• ultimos [n]
• nota <id> [texto]
• borrar <id>
• idioma <es|en>";

const HELP_EN: &str = "\
*Commands*
• spend <amount> <category> [description]
• meal <type> <kcal> [protein carbs fat] [description]
• summary [today|week|month|year] [YYYY-MM-DD] [category]
• calories [period] [YYYY-MM-DD] [meal type]
• nutrition [period] [YYYY-MM-DD]
• range <YYYY-MM-DD> <YYYY-MM-DD>
• recent [n]
• note <id> [text]
• delete <id>
• language <es|en>";

const fn help_text(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => HELP_ES,
        Locale::En => HELP_EN,
    }
}

/// Handles one incoming message from `phone` and returns the reply text.
pub async fn handle_message(data: &BotData, phone: &str, display_name: &str, text: &str) -> String {
    let default_locale = data.settings.default_locale;
    let sender =
        match user::get_or_create_user(&data.database, phone, display_name, default_locale).await {
            Ok(sender) => sender,
            Err(e) => return error_reply(&e, default_locale),
        };

    let locale = sender.locale;
    let result = match parse_command(text) {
        Ok(command) => {
            info!("{} -> {:?}", sender.phone_number, command);
            execute(data, &sender, command).await
        }
        Err(e) => Err(e),
    };

    result.unwrap_or_else(|e| error_reply(&e, locale))
}

fn error_reply(e: &Error, locale: Locale) -> String {
    match e {
        Error::Database(_) | Error::Io(_) | Error::Config { .. } => {
            error!("Failed to handle message: {}", e);
        }
        _ => warn!("Rejected message: {}", e),
    }
    format!("❌ {}: {e}", i18n::phrase(Phrase::ErrorPrefix, locale))
}

async fn execute(data: &BotData, sender: &user_entity::Model, command: Command) -> Result<String> {
    let db = &data.database;
    let user_id = sender.phone_number.as_str();
    let locale = sender.locale;
    let currency = data.settings.currency.as_str();
    let offset = data.offset;

    let reply = match command {
        Command::Ping => "Pong! 🏓".to_string(),
        Command::Help => help_text(locale).to_string(),
        Command::LogExpense {
            amount,
            category,
            description,
        } => {
            let created =
                expense::create_expense(db, user_id, amount, category, &description, None).await?;
            format!(
                "✅ {} #{}: {} · {}",
                i18n::phrase(Phrase::ExpenseLogged, locale),
                created.id,
                report::format_amount(created.amount(), currency),
                created.category.display_name(locale)
            )
        }
        Command::LogMeal {
            meal_type,
            nutrition,
            description,
        } => {
            let created =
                food::create_food_log(db, user_id, meal_type, &description, nutrition, None).await?;
            format!(
                "✅ {}: {} · {} kcal",
                i18n::phrase(Phrase::MealLogged, locale),
                created.meal_type.display_name(locale),
                created.calories
            )
        }
        Command::ExpenseSummary {
            kind,
            reference,
            category,
        } => {
            let summary = summary::compute_summary::<expense_entity::Model, _>(
                db, user_id, kind, reference, category, offset,
            )
            .await?;
            report::render_summary(&summary, locale, offset, |v| {
                report::format_amount(v, currency)
            })
        }
        Command::FoodSummary {
            kind,
            reference,
            meal_type,
        } => {
            let summary = summary::compute_summary::<food_log::Model, _>(
                db, user_id, kind, reference, meal_type, offset,
            )
            .await?;
            report::render_summary(&summary, locale, offset, |v| {
                report::format_quantity(v, "kcal")
            })
        }
        Command::CustomRange { start, end } => {
            let summary = summary::compute_custom_range_summary::<expense_entity::Model, _>(
                db, user_id, start, end, offset,
            )
            .await?;
            report::render_summary(&summary, locale, offset, |v| {
                report::format_amount(v, currency)
            })
        }
        Command::Nutrition { kind, reference } => {
            let reference = reference.unwrap_or_else(|| period::local_today(offset));
            let window = period::compute_period_window(kind, reference, offset)?;
            let totals = food::compute_nutrition_totals(db, user_id, &window).await?;
            report::render_nutrition(&totals, &window, locale)
        }
        Command::Recent { limit } => {
            let expenses = expense::get_recent_expenses(db, user_id, limit).await?;
            report::render_expense_list(&expenses, locale, currency, offset)
        }
        Command::Delete { id } => {
            expense::delete_expense(db, user_id, id).await?;
            format!("✅ {} #{id}", i18n::phrase(Phrase::ExpenseDeleted, locale))
        }
        Command::Note { id, text } => {
            let notes = Some(text).filter(|t| !t.trim().is_empty());
            let updated = expense::set_expense_notes(db, user_id, id, notes).await?;
            let line = report::format_expense_line(&updated, locale, currency, offset);
            match updated.notes {
                Some(notes) => format!("✅ {line}\n📝 {notes}"),
                None => format!("✅ {line}"),
            }
        }
        Command::Language(new_locale) => {
            user::set_user_locale(db, user_id, new_locale).await?;
            format!("✅ {}", i18n::phrase(Phrase::LanguageChanged, new_locale))
        }
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::entities::{Expense, FoodLog};
    use crate::test_utils::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    async fn setup_bot() -> Result<BotData> {
        let db = setup_test_db().await?;
        BotData::new(db, Settings::default())
    }

    #[tokio::test]
    async fn test_ping_registers_sender() -> Result<()> {
        let data = setup_bot().await?;

        let reply = handle_message(&data, TEST_USER, "Camila", "ping").await;
        assert_eq!(reply, "Pong! 🏓");

        let sender = user::get_user_by_phone(&data.database, TEST_USER).await?;
        assert_eq!(sender.map(|u| u.display_name), Some("Camila".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_log_expense_then_summarize_today() -> Result<()> {
        let data = setup_bot().await?;

        let logged = handle_message(&data, TEST_USER, "", "gasto 18500 comida almuerzo").await;
        assert!(logged.starts_with("✅ Gasto registrado #1: COP 18,500.00 · Comida"));
        handle_message(&data, TEST_USER, "", "gasto 4000 transporte bus").await;
        handle_message(&data, OTHER_USER, "", "gasto 999999 compras").await;

        let reply = handle_message(&data, TEST_USER, "", "resumen").await;
        assert!(reply.starts_with("*Hoy*"));
        assert!(reply.contains("Total: COP 22,500.00 · 2 registros"));
        assert!(reply.contains("• Comida: COP 18,500.00 (1)"));
        assert!(reply.contains("• Transporte: COP 4,000.00 (1)"));
        assert!(!reply.contains("Compras"));
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_category_filter() -> Result<()> {
        let data = setup_bot().await?;
        handle_message(&data, TEST_USER, "", "gasto 100 comida").await;
        handle_message(&data, TEST_USER, "", "gasto 50 salud").await;

        let reply = handle_message(&data, TEST_USER, "", "resumen mes salud").await;
        assert!(reply.starts_with("*Este mes*"));
        assert!(reply.contains("Total: COP 50.00 · 1 registros"));
        assert!(!reply.contains("Comida"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_summary_for_a_past_week() -> Result<()> {
        let data = setup_bot().await?;
        handle_message(&data, TEST_USER, "", "gasto 100 comida").await;

        let reply = handle_message(&data, TEST_USER, "", "resumen semana 2020-01-08").await;
        assert_eq!(
            reply,
            "*Semana* (2020-01-05 - 2020-01-11)\nNo hay registros en este periodo."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_input_becomes_error_reply() -> Result<()> {
        let data = setup_bot().await?;

        let reply = handle_message(&data, TEST_USER, "", "gasto cero comida").await;
        assert!(reply.starts_with("❌ No pude procesar tu mensaje:"));

        let reply = handle_message(&data, TEST_USER, "", "rango 2024-03-10 2024-03-01").await;
        assert!(reply.starts_with("❌"));
        assert!(reply.contains("2024-03-10"));

        assert_eq!(Expense::find().count(&data.database).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_input_is_rejected() -> Result<()> {
        let data = setup_bot().await?;

        let reply = handle_message(
            &data,
            TEST_USER,
            "",
            "gasto 79228162514264337593543950335 comida",
        )
        .await;
        assert!(reply.starts_with("❌"));
        assert!(reply.contains("Invalid amount"));

        let reply = handle_message(&data, TEST_USER, "", "gasto 92233720368547758.08 comida").await;
        assert!(reply.contains("Invalid amount"));

        let reply = handle_message(&data, TEST_USER, "", "rango 2024-01-01 +262142-12-31").await;
        assert!(reply.starts_with("❌"));
        assert!(reply.contains("Invalid date"));

        assert_eq!(Expense::find().count(&data.database).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_range_reply() -> Result<()> {
        let data = setup_bot().await?;
        handle_message(&data, TEST_USER, "", "idioma en").await;

        let reply = handle_message(&data, TEST_USER, "", "range 2024-03-01 2024-03-15").await;
        assert_eq!(
            reply,
            "*Custom Range* (2024-03-01 - 2024-03-15)\nNo entries in this period."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_language_switch_changes_replies() -> Result<()> {
        let data = setup_bot().await?;

        let reply = handle_message(&data, TEST_USER, "", "idioma en").await;
        assert_eq!(reply, "✅ Language updated");

        let reply = handle_message(&data, TEST_USER, "", "spend 12.5 transport taxi").await;
        assert!(reply.starts_with("✅ Expense logged #1: COP 12.50 · Transport"));

        let reply = handle_message(&data, TEST_USER, "", "summary").await;
        assert!(reply.starts_with("*Today*"));
        assert!(reply.contains("1 entries"));
        Ok(())
    }

    #[tokio::test]
    async fn test_meal_logging_and_calorie_summary() -> Result<()> {
        let data = setup_bot().await?;

        let reply =
            handle_message(&data, TEST_USER, "", "comida almuerzo 700 30 80 20 bandeja").await;
        assert_eq!(reply, "✅ Comida registrada: Almuerzo · 700 kcal");
        handle_message(&data, TEST_USER, "", "comida desayuno 300").await;
        assert_eq!(FoodLog::find().count(&data.database).await?, 2);

        let reply = handle_message(&data, TEST_USER, "", "calorias").await;
        assert!(reply.contains("Total: 1000 kcal · 2 registros"));
        assert!(reply.contains("• Almuerzo: 700 kcal (1)"));

        let reply = handle_message(&data, TEST_USER, "", "nutricion").await;
        assert!(reply.starts_with("*Nutrición* (Hoy)"));
        assert!(reply.contains("1000 kcal · P 30.0 g"));
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_note_and_delete() -> Result<()> {
        let data = setup_bot().await?;
        handle_message(&data, TEST_USER, "", "gasto 100 comida pan").await;
        handle_message(&data, TEST_USER, "", "gasto 200 transporte bus").await;

        let reply = handle_message(&data, TEST_USER, "", "ultimos 1").await;
        assert!(reply.starts_with("*Últimos gastos*"));
        assert_eq!(reply.lines().count(), 2);

        let reply = handle_message(&data, TEST_USER, "", "nota 1 pagado en efectivo").await;
        assert!(reply.starts_with("✅ #1"));
        assert!(reply.ends_with("📝 pagado en efectivo"));

        let reply = handle_message(&data, OTHER_USER, "", "borrar 1").await;
        assert!(reply.starts_with("❌"));

        let reply = handle_message(&data, TEST_USER, "", "borrar 1").await;
        assert_eq!(reply, "✅ Gasto eliminado #1");
        assert_eq!(Expense::find().count(&data.database).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_help_and_unknown_command() -> Result<()> {
        let data = setup_bot().await?;

        let reply = handle_message(&data, TEST_USER, "", "ayuda").await;
        assert!(reply.starts_with("*Comandos*"));

        let reply = handle_message(&data, TEST_USER, "", "hola bot").await;
        assert!(reply.starts_with("❌"));
        assert!(reply.contains("hola"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_phone_is_rejected() -> Result<()> {
        let data = setup_bot().await?;
        let reply = handle_message(&data, "  ", "", "ping").await;
        assert!(reply.starts_with("❌"));
        Ok(())
    }
}
