// Per-country domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// Source identifier; null for a few non-country entries
    #[serde(rename = "_id", default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    pub lat: f64,
    pub long: f64,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub country: String,
    pub country_info: CountryInfo,
    pub cases: u64,
    pub recovered: u64,
    pub deaths: u64,
}

impl CountryRecord {
    /// Display key: the source identifier, or the name when the source has none
    pub fn key(&self) -> String {
        match self.country_info.id {
            Some(id) => id.to_string(),
            None => self.country.clone(),
        }
    }
}
