//! HTTP retrieval of report pages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cot_core::ReportSource;
use reqwest::Client;

const USER_AGENT: &str = concat!("cot-sentiment/", env!("CARGO_PKG_VERSION"));

/// Fetches report pages over HTTPS.
pub struct HttpReportSource {
    client: Client,
}

impl HttpReportSource {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {url}"))
    }

    fn name(&self) -> &str {
        "http"
    }
}
