use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const REQUIRED: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    /// Pause between the end of one cycle and the start of the next.
    pub retry_period: Duration,
    /// Upper bound on each HTTP request, so a hung connection cannot stall the loop.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. All required names are
    /// checked before returning, so the error reports every missing one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|name| read(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { names: missing });
        }

        let required = |name: &'static str| read(name).unwrap_or_default();

        Ok(Self {
            practicum_token: required("PRACTICUM_TOKEN"),
            telegram_token: required("TELEGRAM_TOKEN"),
            telegram_chat_id: required("TELEGRAM_CHAT_ID"),
            endpoint: read("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: read("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: seconds(&read, "RETRY_PERIOD_SECS", DEFAULT_RETRY_PERIOD)?,
            request_timeout: seconds(&read, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)?,
        })
    }
}

fn seconds<F>(read: &F, name: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read(name) else {
        return Ok(default);
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
