use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::NetworkConfig;
use crate::report::RawDailyReport;

/// Response of the date catalog endpoint. `dates` may be absent or null.
#[derive(Debug, Default, Deserialize)]
pub struct DateCatalogResponse {
    pub dates: Option<Vec<String>>,
}

impl DateCatalogResponse {
    pub fn into_dates(self) -> Vec<String> {
        self.dates.unwrap_or_default()
    }
}

/// API client for the fleet reporting backend.
#[derive(Clone, Debug)]
pub struct CockpitApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl CockpitApiClient {
    /// Create a new API client with configurable timeouts.
    pub fn new(base_url: String, network_config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network_config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(network_config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the list of dates that have a report, in backend order.
    pub async fn fetch_available_dates(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/available-dates", self.base_url);
        let catalog: DateCatalogResponse = self
            .get_json(&url)
            .await
            .context("Failed to load available dates")?;
        Ok(catalog.into_dates())
    }

    /// Fetch the raw report for an API date (`YYYY-MM-DD`).
    pub async fn fetch_daily_report(&self, api_date: &str) -> Result<RawDailyReport> {
        let url = format!("{}/api/daily-report?date={}", self.base_url, api_date);
        self.get_json(&url)
            .await
            .with_context(|| format!("Failed to load daily report for {}", api_date))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to cockpit API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("API returned error status: {}", status);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse cockpit API response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Catalog Parsing Tests ====================

    #[test]
    fn test_catalog_with_dates() {
        let catalog: DateCatalogResponse =
            serde_json::from_str(r#"{"dates": ["01/03/2024", "02/03/2024"]}"#).unwrap();
        assert_eq!(catalog.into_dates(), vec!["01/03/2024", "02/03/2024"]);
    }

    #[test]
    fn test_catalog_missing_dates_is_empty() {
        let catalog: DateCatalogResponse = serde_json::from_str("{}").unwrap();
        assert!(catalog.into_dates().is_empty());
    }

    #[test]
    fn test_catalog_null_dates_is_empty() {
        let catalog: DateCatalogResponse = serde_json::from_str(r#"{"dates": null}"#).unwrap();
        assert!(catalog.into_dates().is_empty());
    }

    #[test]
    fn test_catalog_rejects_wrong_type() {
        let result = serde_json::from_str::<DateCatalogResponse>(r#"{"dates": "01/03/2024"}"#);
        assert!(result.is_err());
    }

    // ==================== Client Construction Tests ====================

    #[test]
    fn test_api_client_creation() {
        let config = NetworkConfig {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        };
        let result = CockpitApiClient::new("http://127.0.0.1:8000".to_string(), &config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client =
            CockpitApiClient::new("http://example.com/".to_string(), &NetworkConfig::default())
                .unwrap();
        assert_eq!(client.base_url(), "http://example.com");
    }
}
