// Map presentation model
use super::country::CountryRecord;
use serde::Serialize;

/// A (latitude, longitude) pair, serialized as `[lat, long]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint(pub f64, pub f64);

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPopup {
    pub name: String,
    pub cases: u64,
    pub recovered: u64,
    pub deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: String,
    pub position: GeoPoint,
    pub popup: MarkerPopup,
}

impl Marker {
    pub fn from_country(country: &CountryRecord) -> Self {
        Self {
            key: country.key(),
            position: GeoPoint(country.country_info.lat, country.country_info.long),
            popup: MarkerPopup {
                name: country.country.clone(),
                cases: country.cases,
                recovered: country.recovered,
                deaths: country.deaths,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tile_url: String,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn new(settings: &MapSettings, countries: &[CountryRecord]) -> Self {
        Self {
            center: settings.center,
            zoom: settings.zoom,
            tile_url: settings.tile_url.clone(),
            markers: countries.iter().map(Marker::from_country).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::country::CountryInfo;

    fn country(id: u32, name: &str, lat: f64, long: f64) -> CountryRecord {
        CountryRecord {
            country: name.to_string(),
            country_info: CountryInfo {
                id: Some(id),
                iso2: None,
                iso3: None,
                lat,
                long,
                flag: None,
            },
            cases: 10,
            recovered: 7,
            deaths: 1,
        }
    }

    fn settings() -> MapSettings {
        MapSettings {
            center: GeoPoint(0.0, 0.0),
            zoom: 2,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }

    #[test]
    fn test_one_marker_per_country() {
        let countries = vec![
            country(4, "Afghanistan", 33.0, 65.0),
            country(8, "Albania", 41.0, 20.0),
            country(12, "Algeria", 28.0, 3.0),
        ];
        let view = MapView::new(&settings(), &countries);

        assert_eq!(view.markers.len(), 3);
        for (marker, record) in view.markers.iter().zip(&countries) {
            assert_eq!(
                marker.position,
                GeoPoint(record.country_info.lat, record.country_info.long)
            );
            assert_eq!(marker.popup.name, record.country);
        }
        assert_eq!(view.markers[1].key, "8");
    }

    #[test]
    fn test_view_uses_fixed_center_and_zoom() {
        let view = MapView::new(&settings(), &[]);
        assert!(view.markers.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["center"], serde_json::json!([0.0, 0.0]));
        assert_eq!(json["zoom"], 2);
        assert!(json["tileUrl"].as_str().unwrap().contains("openstreetmap"));
    }
}
