use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::CycleError;
use crate::models::Cursor;

/// Source of homework status snapshots.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Returns the decoded, not yet validated, body for the window starting at `from_date`.
    async fn fetch(&self, from_date: Cursor) -> Result<Value, CycleError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: Cursor) -> Result<Value, CycleError> {
        tracing::info!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(CycleError::transport)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CycleError::UnexpectedStatus(status.as_u16()));
        }

        resp.json::<Value>().await.map_err(CycleError::transport)
    }
}
