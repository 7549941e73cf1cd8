// Source trait for remote statistics
use crate::domain::country::CountryRecord;
use crate::domain::history::HistoricalTimeline;
use crate::domain::world::WorldSummary;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("historical series is misaligned: {missing} dates missing, {extra} unexpected")]
    Misaligned { missing: usize, extra: usize },

    #[error("{slot} load cancelled before its result was stored")]
    Cancelled { slot: &'static str },
}

#[async_trait]
pub trait StatisticsSource: Send + Sync {
    /// Global aggregate counts
    async fn fetch_world_summary(&self) -> Result<WorldSummary, FetchError>;

    /// Per-country records, in source order
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, FetchError>;

    /// Worldwide cases/recovered/deaths history
    async fn fetch_history(&self) -> Result<HistoricalTimeline, FetchError>;
}
