use crate::core::credentials::Credentials;
use crate::core::models::{HomeworkUpdate, StatusReport};
use crate::core::settings::Settings;
use crate::core::validate::{check_response, extract_status};
use crate::notifiers::{Notifier, TelegramNotifier};
use crate::providers::{HomeworkApi, PracticumClient};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct CheckOutput {
    from_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_date: Option<i64>,
    homework_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<StatusReport>,
    #[serde(with = "chrono::serde::ts_seconds")]
    checked_at: DateTime<Utc>,
}

pub async fn run(
    settings: &Settings,
    credentials: &Credentials,
    since: Option<i64>,
    json: bool,
    notify: bool,
) -> Result<()> {
    let client = PracticumClient::new(&settings.api, credentials.practicum_token.as_str())?;
    let from_date = since.unwrap_or_else(|| Utc::now().timestamp());

    let response = client
        .fetch(from_date)
        .await
        .context("Failed to fetch homework statuses")?;
    let update = check_response(response).context("Unexpected API response")?;
    let output = summarize(from_date, &update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_output(&output);
    }

    if notify {
        if let Some(report) = &output.latest {
            let notifier = TelegramNotifier::new(
                &settings.telegram,
                &credentials.telegram_token,
                credentials.telegram_chat_id.as_str(),
            )?;
            notifier
                .notify(&report.message)
                .await
                .context("Failed to send Telegram message")?;
        }
    }

    Ok(())
}

fn summarize(from_date: i64, update: &HomeworkUpdate) -> Result<CheckOutput> {
    let latest = update
        .latest()
        .map(extract_status)
        .transpose()
        .context("Failed to read latest homework")?;

    Ok(CheckOutput {
        from_date,
        current_date: update.cursor,
        homework_count: update.homeworks.len(),
        latest,
        checked_at: Utc::now(),
    })
}

fn print_text_output(output: &CheckOutput) {
    match &output.latest {
        Some(report) => println!("{}", report.message),
        None => println!("No status changes since {}", format_timestamp(output.from_date)),
    }

    if output.homework_count > 1 {
        println!("  ({} submissions changed)", output.homework_count);
    }
}

fn format_timestamp(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
