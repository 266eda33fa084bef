mod poller;

use crate::core::credentials::Credentials;
use crate::core::settings::Settings;
use crate::notifiers::TelegramNotifier;
use crate::providers::PracticumClient;
use anyhow::Result;

pub use poller::Poller;

pub async fn run(settings: &Settings, credentials: &Credentials) -> Result<()> {
    tracing::info!(endpoint = %settings.api.endpoint, "Starting homework-bot daemon");

    let api = PracticumClient::new(&settings.api, credentials.practicum_token.as_str())?;
    let notifier = TelegramNotifier::new(
        &settings.telegram,
        &credentials.telegram_token,
        credentials.telegram_chat_id.as_str(),
    )?;

    let poller = Poller::new(api, notifier).interval(settings.polling.interval());

    poller
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
