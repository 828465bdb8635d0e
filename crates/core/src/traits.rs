use anyhow::Result;
use async_trait::async_trait;

/// Retrieves the HTML page that carries a published report.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Returns the full page body for `url`.
    async fn fetch_html(&self, url: &str) -> Result<String>;

    fn name(&self) -> &str;
}
