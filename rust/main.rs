mod config;
mod error;
mod logger;
mod models;
mod parser;
mod poller;
mod practicum;
mod telegram;
mod validator;

use std::env;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::poller::Poller;
use crate::practicum::{PracticumClient, StatusSource};
use crate::telegram::{ChatSender, Notifier, TelegramBot};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logging();

    let mut poller = build_poller(
        |name| env::var(name).ok(),
        |config| {
            let source =
                PracticumClient::new(config).context("Failed to build review API client")?;
            let bot = TelegramBot::new(config).context("Failed to build Telegram client")?;
            Ok((source, bot))
        },
    )?;

    poller.run(shutdown_signal()).await;

    tracing::info!(cursor = poller.cursor(), "Bot stopped");
    Ok(())
}

/// Checks the configuration and only then lets `connect` build the API clients.
fn build_poller<L, F, S, C>(lookup: L, connect: F) -> Result<Poller<S, C>>
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&Config) -> Result<(S, C)>,
    S: StatusSource,
    C: ChatSender,
{
    let config = match Config::from_lookup(lookup) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Missing or invalid configuration, refusing to start");
            return Err(err.into());
        }
    };

    tracing::info!(
        endpoint = %config.endpoint,
        chat_id = %config.telegram_chat_id,
        retry_period_secs = config.retry_period.as_secs(),
        request_timeout_secs = config.request_timeout.as_secs(),
        "Starting homework status bot"
    );

    let (source, chat) = connect(&config)?;
    Ok(Poller::new(
        source,
        Notifier::new(chat),
        config.retry_period,
        Utc::now().timestamp(),
    ))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received, shutting down"),
        Err(err) => {
            // Without a signal handler the bot can only be killed; keep polling.
            tracing::warn!(error = %err, "Failed to listen for interrupt");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::cell::Cell;
    use std::collections::HashMap;

    fn connect_counting(
        calls: &Cell<u32>,
    ) -> impl FnOnce(&Config) -> Result<(PracticumClient, TelegramBot)> + '_ {
        move |config: &Config| {
            calls.set(calls.get() + 1);
            Ok((PracticumClient::new(config)?, TelegramBot::new(config)?))
        }
    }

    #[test]
    fn missing_configuration_stops_before_any_client_exists() {
        let calls = Cell::new(0);

        let err = build_poller(|_| None, connect_counting(&calls))
            .err()
            .expect("startup must fail without configuration");

        assert_eq!(calls.get(), 0);
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Missing { names }) => assert_eq!(names.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn complete_configuration_builds_the_clients_once() {
        let vars: HashMap<&str, &str> = [
            ("PRACTICUM_TOKEN", "y0_practicum"),
            ("TELEGRAM_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]
        .into_iter()
        .collect();
        let calls = Cell::new(0);

        let poller = build_poller(
            |name| vars.get(name).map(|v| v.to_string()),
            connect_counting(&calls),
        )
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(poller.cursor() > 0);
    }
}
