use crate::domain::map::{GeoPoint, MapSettings};
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `lastdays` parameter on the historical endpoint
    #[serde(default = "default_history_days")]
    pub history_days: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub strict_alignment: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    #[serde(default)]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "https://disease.sh/v3/covid-19".to_string()
}

fn default_history_days() -> String {
    "all".to_string()
}

fn default_zoom() -> u8 {
    2
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            history_days: default_history_days(),
            request_timeout_secs: None,
            strict_alignment: false,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: default_zoom(),
            tile_url: default_tile_url(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl MapConfig {
    pub fn to_settings(&self) -> MapSettings {
        MapSettings {
            center: GeoPoint(self.center[0], self.center[1]),
            zoom: self.zoom,
            tile_url: self.tile_url.clone(),
        }
    }
}

/// Load `config/dashboard.*` (optional) overlaid with `DASHBOARD__SECTION__KEY` variables
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
