// Per-resource load state
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl SlotStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, SlotStatus::Ready | SlotStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotName {
    World,
    Countries,
    Chart,
}

impl SlotName {
    pub const ALL: [SlotName; 3] = [SlotName::World, SlotName::Countries, SlotName::Chart];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::World => "world",
            SlotName::Countries => "countries",
            SlotName::Chart => "chart",
        }
    }
}

/// Holds the last good value of one resource plus where its loading stands.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    status: SlotStatus,
    value: Option<T>,
    updated_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            status: SlotStatus::Idle,
            value: None,
            updated_at: None,
            last_error: None,
        }
    }
}

impl<T> Slot<T> {
    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn begin_loading(&mut self) {
        self.status = SlotStatus::Loading;
    }

    /// Replace the value wholesale
    pub fn fulfil(&mut self, value: T) {
        self.status = SlotStatus::Ready;
        self.value = Some(value);
        self.updated_at = Some(Utc::now());
        self.last_error = None;
    }

    /// Record a failure; the previous value stays in place
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = SlotStatus::Failed;
        self.last_error = Some(reason.into());
    }

    pub fn view<U>(&self, project: impl FnOnce(Option<&T>) -> U) -> SlotView<U> {
        SlotView {
            status: self.status,
            updated_at: self.updated_at,
            error: self.last_error.clone(),
            data: project(self.value.as_ref()),
        }
    }
}

impl<T: Clone + Default> Slot<T> {
    /// Current value, or the empty default before the first success
    pub fn snapshot(&self) -> SlotView<T> {
        self.view(|value| value.cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView<T> {
    pub status: SlotStatus,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: T,
}

/// Status of all three statistics slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    pub world: SlotStatus,
    pub countries: SlotStatus,
    pub chart: SlotStatus,
}

impl StatusBoard {
    pub fn get(&self, name: SlotName) -> SlotStatus {
        match name {
            SlotName::World => self.world,
            SlotName::Countries => self.countries,
            SlotName::Chart => self.chart,
        }
    }

    pub fn set(&mut self, name: SlotName, status: SlotStatus) {
        match name {
            SlotName::World => self.world = status,
            SlotName::Countries => self.countries = status,
            SlotName::Chart => self.chart = status,
        }
    }

    pub fn is_settled(&self) -> bool {
        SlotName::ALL.iter().all(|name| self.get(*name).is_settled())
    }
}
