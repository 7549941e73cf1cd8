// Historical series domain model and chart transform
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Curve smoothing applied to every line
pub const LINE_TENSION: f64 = 0.1;

/// Date-keyed counts, kept in the order the source listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedCounts(Vec<(String, u64)>);

impl DatedCounts {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(date, _)| date.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|(_, count)| *count)
    }

    fn index(&self) -> HashMap<&str, u64> {
        self.0.iter().map(|(date, count)| (date.as_str(), *count)).collect()
    }
}

impl<'de> Deserialize<'de> for DatedCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatedCountsVisitor;

        impl<'de> Visitor<'de> for DatedCountsVisitor {
            type Value = DatedCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of date strings to counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((date, count)) = map.next_entry::<String, u64>()? {
                    entries.push((date, count));
                }
                Ok(DatedCounts(entries))
            }
        }

        deserializer.deserialize_map(DatedCountsVisitor)
    }
}

/// Body of the "all countries, all available days" historical endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoricalTimeline {
    pub cases: DatedCounts,
    pub recovered: DatedCounts,
    pub deaths: DatedCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cases,
    Recovered,
    Deaths,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cases, Metric::Recovered, Metric::Deaths];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cases => "Cases",
            Metric::Recovered => "Recovered",
            Metric::Deaths => "Deaths",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::Cases => "rgba(75,192,192,1)",
            Metric::Recovered => "rgba(54, 162, 235, 1)",
            Metric::Deaths => "rgba(255, 99, 132, 1)",
        }
    }
}

/// How well the recovered/deaths mappings line up with the cases dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentReport {
    /// Cases dates with no matching entry, zero-filled
    pub missing: usize,
    /// Entries whose date is not among the cases dates, dropped
    pub extra: usize,
}

impl AlignmentReport {
    pub fn is_aligned(&self) -> bool {
        self.missing == 0 && self.extra == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub fill: bool,
    pub border_color: String,
    pub tension: f64,
}

impl Dataset {
    fn new(metric: Metric, data: Vec<u64>) -> Self {
        Self {
            label: metric.label().to_string(),
            data,
            fill: false,
            border_color: metric.color().to_string(),
            tension: LINE_TENSION,
        }
    }
}

/// Chart-ready line series: one label per date, one dataset per metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl Default for ChartSeries {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            datasets: Metric::ALL
                .iter()
                .map(|metric| Dataset::new(*metric, Vec::new()))
                .collect(),
        }
    }
}

impl ChartSeries {
    /// Build the series from a timeline, using the cases dates as labels.
    ///
    /// Recovered and deaths values are matched by date, so a differing key
    /// order in those mappings does not shift values. Dates they lack are
    /// zero-filled and dates they add are dropped; both are counted in the
    /// returned report.
    pub fn from_timeline(timeline: &HistoricalTimeline) -> (Self, AlignmentReport) {
        let labels: Vec<String> = timeline.cases.keys().map(str::to_string).collect();
        let mut report = AlignmentReport::default();

        let recovered = align(&labels, &timeline.recovered, &mut report);
        let deaths = align(&labels, &timeline.deaths, &mut report);

        let series = Self {
            labels,
            datasets: vec![
                Dataset::new(Metric::Cases, timeline.cases.values().collect()),
                Dataset::new(Metric::Recovered, recovered),
                Dataset::new(Metric::Deaths, deaths),
            ],
        };

        (series, report)
    }

    pub fn dataset(&self, metric: Metric) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == metric.label())
    }
}

fn align(labels: &[String], counts: &DatedCounts, report: &mut AlignmentReport) -> Vec<u64> {
    let index = counts.index();
    let mut matched = 0;

    let values = labels
        .iter()
        .map(|label| match index.get(label.as_str()) {
            Some(value) => {
                matched += 1;
                *value
            }
            None => {
                report.missing += 1;
                0
            }
        })
        .collect();

    report.extra += index.len().saturating_sub(matched);
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(json: &str) -> HistoricalTimeline {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scenario_history() {
        let t = timeline(
            r#"{"cases":{"d1":5,"d2":9},"recovered":{"d1":2,"d2":4},"deaths":{"d1":0,"d2":1}}"#,
        );
        let (series, report) = ChartSeries::from_timeline(&t);

        assert!(report.is_aligned());
        assert_eq!(series.labels, vec!["d1", "d2"]);
        assert_eq!(series.dataset(Metric::Cases).unwrap().data, vec![5, 9]);
        assert_eq!(series.dataset(Metric::Recovered).unwrap().data, vec![2, 4]);
        assert_eq!(series.dataset(Metric::Deaths).unwrap().data, vec![0, 1]);
    }

    #[test]
    fn test_source_key_order_is_kept() {
        let t = timeline(
            r#"{"cases":{"1/22/20":0,"1/23/20":1,"12/31/19":7},
                "recovered":{"1/22/20":0,"1/23/20":0,"12/31/19":0},
                "deaths":{"1/22/20":0,"1/23/20":0,"12/31/19":0}}"#,
        );
        let (series, _) = ChartSeries::from_timeline(&t);

        assert_eq!(series.labels, vec!["1/22/20", "1/23/20", "12/31/19"]);
        assert_eq!(series.dataset(Metric::Cases).unwrap().data, vec![0, 1, 7]);
    }

    #[test]
    fn test_transform_is_repeatable() {
        let t = timeline(
            r#"{"cases":{"a":1,"b":2},"recovered":{"a":0,"b":1},"deaths":{"a":0,"b":0}}"#,
        );
        assert_eq!(ChartSeries::from_timeline(&t), ChartSeries::from_timeline(&t));
    }

    #[test]
    fn test_empty_history_keeps_three_series() {
        let t = timeline(r#"{"cases":{},"recovered":{},"deaths":{}}"#);
        let (series, report) = ChartSeries::from_timeline(&t);

        assert!(report.is_aligned());
        assert!(series.labels.is_empty());
        let labels: Vec<&str> = series.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Cases", "Recovered", "Deaths"]);
        assert!(series.datasets.iter().all(|d| d.data.is_empty() && !d.fill));
        assert_eq!(series, ChartSeries::default());
    }

    #[test]
    fn test_styling() {
        let (series, _) = ChartSeries::from_timeline(&HistoricalTimeline::default());
        let cases = series.dataset(Metric::Cases).unwrap();
        assert_eq!(cases.border_color, "rgba(75,192,192,1)");
        assert_eq!(cases.tension, 0.1);
        assert_eq!(
            series.dataset(Metric::Deaths).unwrap().border_color,
            "rgba(255, 99, 132, 1)"
        );
    }

    #[test]
    fn test_misaligned_history_is_zero_filled() {
        let t = timeline(
            r#"{"cases":{"d1":5,"d2":9},
                "recovered":{"d2":4,"d1":2},
                "deaths":{"d2":1,"d3":3}}"#,
        );
        let (series, report) = ChartSeries::from_timeline(&t);

        assert_eq!(series.dataset(Metric::Recovered).unwrap().data, vec![2, 4]);
        assert_eq!(series.dataset(Metric::Deaths).unwrap().data, vec![0, 1]);
        assert_eq!(report, AlignmentReport { missing: 1, extra: 1 });
        assert!(!report.is_aligned());
    }

    #[test]
    fn test_serialized_field_names() {
        let (series, _) = ChartSeries::from_timeline(&HistoricalTimeline::default());
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["datasets"][1]["borderColor"], "rgba(54, 162, 235, 1)");
        assert_eq!(json["datasets"][1]["fill"], false);
    }

    #[test]
    fn test_rejects_non_numeric_counts() {
        let result: Result<HistoricalTimeline, _> =
            serde_json::from_str(r#"{"cases":{"d1":"five"},"recovered":{},"deaths":{}}"#);
        assert!(result.is_err());
    }
}
