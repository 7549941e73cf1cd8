// Global summary domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    /// Source update time, epoch milliseconds
    pub updated: i64,
    pub cases: u64,
    #[serde(default)]
    pub today_cases: u64,
    pub deaths: u64,
    #[serde(default)]
    pub today_deaths: u64,
    pub recovered: u64,
    #[serde(default)]
    pub today_recovered: u64,
    #[serde(default)]
    pub active: i64,
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub tests: u64,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub affected_countries: u32,
    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorldSummary {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.updated)
    }
}
