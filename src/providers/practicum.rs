use crate::core::errors::ApiError;
use crate::core::settings::ApiSettings;
use crate::providers::HomeworkApi;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(settings: &ApiSettings, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<serde_json::Value, ApiError> {
        let from_date = if since > 0 {
            since
        } else {
            Utc::now().timestamp()
        };

        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            tracing::error!(status, from_date, "Homework API returned unexpected status");
            return Err(ApiError::UnexpectedStatusCode {
                status,
                endpoint: self.endpoint.clone(),
                from_date,
            });
        }

        Ok(response.json().await?)
    }
}
