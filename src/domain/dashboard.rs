// Combined dashboard view model
use super::history::ChartSeries;
use super::map::MapView;
use super::slot::SlotView;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub chart: SlotView<ChartSeries>,
    pub map: SlotView<MapView>,
}

impl Dashboard {
    pub fn new(chart: SlotView<ChartSeries>, map: SlotView<MapView>) -> Self {
        Self { chart, map }
    }
}
