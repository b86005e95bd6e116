use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "DEBUG";

pub fn init_logging() {
    let filter = build_filter(env::var("RUST_LOG").ok(), env::var("LOG_LEVEL").ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// `RUST_LOG` wins over `LOG_LEVEL`; the bot is chatty by default.
fn build_filter(rust_log: Option<String>, log_level: Option<String>) -> EnvFilter {
    match rust_log {
        Some(rust_log) => EnvFilter::new(rust_log),
        None => {
            let level = log_level.unwrap_or_else(|| DEFAULT_LEVEL.to_string());
            EnvFilter::new(level.to_lowercase())
        }
    }
}
