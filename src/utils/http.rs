// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Document transport used for login and leaderboard pages.
///
/// Bodies are returned fully read, so no response outlives the call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and return the response body.
    async fn get(&self, url: &str) -> Result<String>;

    /// Submit a form and return the response body.
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String>;
}

/// Create a configured asynchronous HTTP client with a cookie jar.
pub fn create_async_client(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .cookie_store(true)
        .build()?;
    Ok(client)
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }

    async fn read(url: &str, response: reqwest::Result<reqwest::Response>) -> Result<String> {
        let response = response
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(url, e))?;
        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await;
        Self::read(url, response).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        let response = self.client.post(url).form(form).send().await;
        Self::read(url, response).await
    }
}
