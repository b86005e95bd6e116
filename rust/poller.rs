use std::future::Future;
use std::time::Duration;

use crate::error::CycleError;
use crate::models::Cursor;
use crate::parser::parse_status;
use crate::practicum::StatusSource;
use crate::telegram::{ChatSender, Notifier};
use crate::validator::check_response;

/// Owns the query cursor and the last message sent to the chat, and drives
/// one fetch/validate/parse/notify cycle per retry period.
pub struct Poller<S, C> {
    source: S,
    notifier: Notifier<C>,
    retry_period: Duration,
    cursor: Cursor,
    last_message: String,
}

impl<S: StatusSource, C: ChatSender> Poller<S, C> {
    pub fn new(source: S, notifier: Notifier<C>, retry_period: Duration, cursor: Cursor) -> Self {
        Self {
            source,
            notifier,
            retry_period,
            cursor,
            last_message: String::new(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[cfg(test)]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Polls until `shutdown` resolves. A cycle in flight at that moment is dropped.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Polling started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.tick() => {}
            }
        }
        tracing::info!(cursor = self.cursor, "Polling stopped");
    }

    async fn tick(&mut self) {
        self.run_once().await;
        tokio::time::sleep(self.retry_period).await;
    }

    /// Runs one cycle and reports its failure, if any, through the chat.
    pub async fn run_once(&mut self) {
        let Err(err) = self.poll_cycle().await else {
            return;
        };

        tracing::error!(error = %err, cursor = self.cursor, "Poll cycle failed");
        let message = format!("Program failure: {err}");
        if !self.notify_if_new(message).await {
            tracing::debug!("Failure already reported, not sending again");
        }
    }

    async fn poll_cycle(&mut self) -> Result<(), CycleError> {
        let response = self.source.fetch(self.cursor).await?;
        let checked = check_response(&response)?;

        // Moves forward before parsing: a bad record must not pin the window.
        self.cursor = self.cursor.max(checked.current_date);

        let Some(latest) = checked.homeworks.first() else {
            tracing::debug!(cursor = self.cursor, "No new statuses, homework list is empty");
            return Ok(());
        };

        let message = parse_status(latest)?;
        if !self.notify_if_new(message).await {
            tracing::debug!("Status unchanged since last message");
        }
        Ok(())
    }

    /// Sends `message` unless it equals the last one sent. Returns false when suppressed.
    async fn notify_if_new(&mut self, message: String) -> bool {
        if message == self.last_message {
            return false;
        }
        self.notifier.send(&message).await;
        self.last_message = message;
        true
    }
}
