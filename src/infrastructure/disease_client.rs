// disease.sh client - StatisticsSource over HTTP
use crate::application::statistics_source::{FetchError, StatisticsSource};
use crate::domain::country::CountryRecord;
use crate::domain::history::HistoricalTimeline;
use crate::domain::world::WorldSummary;
use crate::infrastructure::config::SourceConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const WORLD_ENDPOINT: &str = "all";
const COUNTRIES_ENDPOINT: &str = "countries";
const HISTORY_ENDPOINT: &str = "historical/all";

#[derive(Debug, Clone)]
pub struct DiseaseShClient {
    base_url: String,
    history_days: String,
    client: reqwest::Client,
}

impl DiseaseShClient {
    pub fn new(config: &SourceConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            history_days: config.history_days.clone(),
            client,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn history_url(&self) -> String {
        format!(
            "{}?lastdays={}",
            self.endpoint_url(HISTORY_ENDPOINT),
            urlencoding::encode(&self.history_days)
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, FetchError> {
        tracing::debug!(endpoint, url, "requesting statistics");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        decode(endpoint, &bytes)
    }
}

/// Parse a response body against its schema
pub fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode { endpoint, source })
}

#[async_trait]
impl StatisticsSource for DiseaseShClient {
    async fn fetch_world_summary(&self) -> Result<WorldSummary, FetchError> {
        self.get_json(WORLD_ENDPOINT, &self.endpoint_url(WORLD_ENDPOINT))
            .await
    }

    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        self.get_json(COUNTRIES_ENDPOINT, &self.endpoint_url(COUNTRIES_ENDPOINT))
            .await
    }

    async fn fetch_history(&self) -> Result<HistoricalTimeline, FetchError> {
        self.get_json(HISTORY_ENDPOINT, &self.history_url()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, history_days: &str) -> DiseaseShClient {
        DiseaseShClient::new(&SourceConfig {
            base_url: base_url.to_string(),
            history_days: history_days.to_string(),
            ..SourceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let c = client("https://disease.sh/v3/covid-19/", "all");
        assert_eq!(c.endpoint_url(WORLD_ENDPOINT), "https://disease.sh/v3/covid-19/all");
        assert_eq!(
            c.endpoint_url(COUNTRIES_ENDPOINT),
            "https://disease.sh/v3/covid-19/countries"
        );
        assert_eq!(
            c.history_url(),
            "https://disease.sh/v3/covid-19/historical/all?lastdays=all"
        );
    }

    #[test]
    fn test_history_days_are_encoded() {
        let c = client("http://localhost", "30 days");
        assert_eq!(c.history_url(), "http://localhost/historical/all?lastdays=30%20days");
    }

    #[test]
    fn test_decode_history() {
        let timeline: HistoricalTimeline = decode(
            HISTORY_ENDPOINT,
            br#"{"cases":{"1/22/20":557,"1/23/20":657},
                 "deaths":{"1/22/20":17,"1/23/20":18},
                 "recovered":{"1/22/20":30,"1/23/20":32}}"#,
        )
        .unwrap();

        assert_eq!(timeline.cases.keys().collect::<Vec<_>>(), vec!["1/22/20", "1/23/20"]);
        assert_eq!(timeline.recovered.values().collect::<Vec<_>>(), vec![30, 32]);
    }

    #[test]
    fn test_decode_errors_name_the_endpoint() {
        let err = decode::<WorldSummary>(WORLD_ENDPOINT, b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode { endpoint: "all", .. }));
        assert!(err.to_string().contains("all"));

        let err = decode::<HistoricalTimeline>(HISTORY_ENDPOINT, br#"{"cases":{}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
