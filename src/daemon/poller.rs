use crate::core::errors::PollError;
use crate::core::state::{Clock, MessageKind, PollState, SystemClock};
use crate::core::validate::{check_response, parse_status};
use crate::notifiers::Notifier;
use crate::providers::HomeworkApi;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const POLL_INTERVAL: Duration = Duration::from_secs(600);

/// What happened to a candidate message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    Duplicate,
    DeliveryFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no homework changes.
    NoUpdate,
    /// A status message was built from the latest homework.
    Status(Dispatch),
    /// The cycle failed and a diagnostic was built instead.
    Failure(Dispatch),
}

pub struct Poller<A, N, C = SystemClock> {
    api: A,
    notifier: N,
    clock: C,
    interval: Duration,
    state: PollState,
}

impl<A, N> Poller<A, N, SystemClock>
where
    A: HomeworkApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_clock(api, notifier, SystemClock)
    }
}

impl<A, N, C> Poller<A, N, C>
where
    A: HomeworkApi,
    N: Notifier,
    C: Clock,
{
    pub fn with_clock(api: A, notifier: N, clock: C) -> Self {
        let state = PollState::new(clock.now());
        Self {
            api,
            notifier,
            clock,
            interval: POLL_INTERVAL,
            state,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Runs one cycle immediately, then one per interval, until `shutdown`
    /// resolves. A cycle in progress always runs to completion.
    pub async fn run_until<F>(mut self, shutdown: F) -> PollState
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            notifier = self.notifier.name(),
            "Poll loop started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Poll loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.run_cycle().await;
                    tracing::debug!(?outcome, timestamp = self.state.timestamp(), "Cycle finished");
                }
            }
        }

        self.state
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(None) => CycleOutcome::NoUpdate,
            Ok(Some(message)) => {
                CycleOutcome::Status(self.dispatch(MessageKind::Status, message).await)
            }
            Err(e) => {
                tracing::error!(error = %e, "Poll cycle failed");
                let diagnostic = format!("Program failure: {}", e);
                CycleOutcome::Failure(self.dispatch(MessageKind::Diagnostic, diagnostic).await)
            }
        }
    }

    async fn poll(&mut self) -> Result<Option<String>, PollError> {
        let response = self.api.fetch(self.state.timestamp()).await?;
        let update = check_response(response)?;

        let next = update.cursor.unwrap_or_else(|| self.clock.now());
        self.state.advance(next);

        match update.latest() {
            Some(homework) => Ok(Some(parse_status(homework)?)),
            None => Ok(None),
        }
    }

    /// Status messages and diagnostics are deduplicated separately, so a
    /// status sent between two identical failures does not repeat the report.
    async fn dispatch(&mut self, kind: MessageKind, message: String) -> Dispatch {
        if self.state.is_duplicate(kind, &message) {
            tracing::debug!(text = %message, "Message already sent, skipping");
            return Dispatch::Duplicate;
        }

        match self.notifier.notify(&message).await {
            Ok(()) => {
                self.state.record_sent(kind, message);
                Dispatch::Sent
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    notifier = self.notifier.name(),
                    "Failed to send message"
                );
                Dispatch::DeliveryFailed
            }
        }
    }
}
