use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::NotifyError;

/// Transport to the chat. Implementations report failures; [`Notifier`] absorbs them.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Clone)]
pub struct TelegramBot {
    http: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            send_url: send_message_url(&config.telegram_api_url, &config.telegram_token),
            chat_id: config.telegram_chat_id.clone(),
        })
    }
}

fn send_message_url(api_url: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), token)
}

#[async_trait]
impl ChatSender for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self.http.post(&self.send_url).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        let body: TelegramResponse = resp.json().await?;
        if !body.ok {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: body.description.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

/// Error for a non-2xx answer. The body may be Telegram JSON or a proxy's HTML page.
fn rejection(status: StatusCode, body: &str) -> NotifyError {
    let description = serde_json::from_str::<TelegramResponse>(body)
        .ok()
        .and_then(|body| body.description)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
    NotifyError::Rejected {
        status: status.as_u16(),
        description,
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivers text to the chat without ever failing the caller.
pub struct Notifier<C> {
    chat: C,
}

impl<C: ChatSender> Notifier<C> {
    pub fn new(chat: C) -> Self {
        Self { chat }
    }

    /// Returns whether the chat accepted the message; errors are logged here and go no further.
    pub async fn send(&self, text: &str) -> bool {
        tracing::info!("Sending message to chat");
        match self.chat.send_message(text).await {
            Ok(()) => {
                tracing::debug!(message = text, "Message sent");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to send message to chat");
                false
            }
        }
    }
}
