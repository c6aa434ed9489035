use super::utils::{check_response_status, network_error};
use crate::config::DsgenConfig;
use crate::error::{DsgenError, Result};
use crate::form::GenerationConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;

/// Talks to the payload generator backend.
#[derive(Clone)]
pub struct GeneratorClient {
    client: reqwest::Client,
    url: String,
}

impl GeneratorClient {
    pub fn new(config: &DsgenConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DsgenError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.generate_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POSTs `config` and returns the generated payload as-is.
    pub async fn generate(&self, config: &GenerationConfig) -> Result<Value> {
        tracing::debug!(url = %self.url, fields = config.len(), "Sending generate request");

        let response = self
            .client
            .post(&self.url)
            .json(config)
            .send()
            .await
            .map_err(network_error)?;

        let response = check_response_status(response).await?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        let payload: Value = serde_json::from_str(&body)?;

        tracing::info!(status = %status, bytes = body.len(), "Payload received");
        Ok(payload)
    }
}
