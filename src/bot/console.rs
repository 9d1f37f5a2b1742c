//! Console transport.
//!
//! Each stdin line is `<phone> <message…>`. The reply is printed to stdout, one
//! block per message. Blank lines and lines starting with `#` are skipped.

use super::{BotData, handlers::handle_message};
use crate::errors::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Splits a console line into sender phone and message text.
///
/// Returns `None` for blank lines, comments and lines with no message after the phone.
#[must_use]
pub fn parse_console_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (phone, message) = line.split_once(char::is_whitespace)?;
    let message = message.trim();
    (!message.is_empty()).then_some((phone, message))
}

/// Reads messages from stdin until EOF and writes each reply to stdout.
pub async fn run_console(data: &BotData) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    info!("Console transport ready, reading '<phone> <message>' lines from stdin");

    while let Some(line) = lines.next_line().await? {
        let Some((phone, message)) = parse_console_line(&line) else {
            if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
                warn!("Ignoring line without a message: {line}");
            }
            continue;
        };

        let reply = handle_message(data, phone, "", message).await;
        stdout.write_all(format!("{reply}\n\n").as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Stdin closed, shutting down");
    Ok(())
}
