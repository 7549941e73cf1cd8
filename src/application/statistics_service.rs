// Statistics service - Loads the remote resources once and serves views of them
use crate::application::cancellation::CancellationToken;
use crate::application::statistics_source::{FetchError, StatisticsSource};
use crate::domain::country::CountryRecord;
use crate::domain::dashboard::Dashboard;
use crate::domain::history::{ChartSeries, HistoricalTimeline};
use crate::domain::map::{MapSettings, MapView};
use crate::domain::slot::{Slot, SlotName, SlotStatus, SlotView, StatusBoard};
use crate::domain::world::WorldSummary;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// One slot per resource; each load writes only its own.
struct StatisticsStore {
    world: RwLock<Slot<WorldSummary>>,
    countries: RwLock<Slot<Vec<CountryRecord>>>,
    chart: RwLock<Slot<ChartSeries>>,
    board: watch::Sender<StatusBoard>,
}

#[derive(Clone)]
pub struct StatisticsService {
    source: Arc<dyn StatisticsSource>,
    store: Arc<StatisticsStore>,
    map: MapSettings,
    strict_alignment: bool,
}

impl StatisticsService {
    pub fn new(
        source: Arc<dyn StatisticsSource>,
        map: MapSettings,
        strict_alignment: bool,
    ) -> Self {
        let (board, _) = watch::channel(StatusBoard::default());
        Self {
            source,
            store: Arc::new(StatisticsStore {
                world: RwLock::new(Slot::default()),
                countries: RwLock::new(Slot::default()),
                chart: RwLock::new(Slot::default()),
                board,
            }),
            map,
            strict_alignment,
        }
    }

    pub async fn load_world_summary(&self, token: &CancellationToken) -> Result<(), FetchError> {
        self.run_load(SlotName::World, &self.store.world, token, async {
            let world = self.source.fetch_world_summary().await?;
            tracing::info!(
                cases = world.cases,
                updated = ?world.updated_at(),
                "fetched world summary"
            );
            Ok(world)
        })
        .await
    }

    pub async fn load_country_list(&self, token: &CancellationToken) -> Result<(), FetchError> {
        self.run_load(SlotName::Countries, &self.store.countries, token, async {
            let countries = self.source.fetch_countries().await?;
            tracing::info!(count = countries.len(), "fetched country list");
            Ok(countries)
        })
        .await
    }

    pub async fn load_historical_series(
        &self,
        token: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.run_load(SlotName::Chart, &self.store.chart, token, async {
            let timeline = self.source.fetch_history().await?;
            tracing::info!(days = timeline.cases.len(), "fetched historical series");
            self.build_chart(&timeline)
        })
        .await
    }

    /// Run the three loads concurrently on the current task.
    pub async fn load_all(&self, token: &CancellationToken) -> StatusBoard {
        let _ = tokio::join!(
            self.load_world_summary(token),
            self.load_country_list(token),
            self.load_historical_series(token),
        );
        self.status_board()
    }

    /// Start the one-off startup load in the background.
    pub fn spawn_startup_load(&self, token: CancellationToken) -> JoinHandle<StatusBoard> {
        let service = self.clone();
        tokio::spawn(async move {
            let board = service.load_all(&token).await;
            tracing::info!(?board, "startup load finished");
            board
        })
    }

    /// `data` stays null until the first successful fetch
    pub async fn world_summary(&self) -> SlotView<Option<WorldSummary>> {
        self.store.world.read().await.view(|world| world.cloned())
    }

    pub async fn countries(&self) -> SlotView<Vec<CountryRecord>> {
        self.store.countries.read().await.snapshot()
    }

    pub async fn chart(&self) -> SlotView<ChartSeries> {
        self.store.chart.read().await.snapshot()
    }

    pub async fn map(&self) -> SlotView<MapView> {
        self.store
            .countries
            .read()
            .await
            .view(|countries| MapView::new(&self.map, countries.map(Vec::as_slice).unwrap_or(&[])))
    }

    pub async fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.chart().await, self.map().await)
    }

    pub fn status_board(&self) -> StatusBoard {
        *self.store.board.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusBoard> {
        self.store.board.subscribe()
    }

    fn build_chart(&self, timeline: &HistoricalTimeline) -> Result<ChartSeries, FetchError> {
        let (series, report) = ChartSeries::from_timeline(timeline);
        if !report.is_aligned() {
            if self.strict_alignment {
                return Err(FetchError::Misaligned {
                    missing: report.missing,
                    extra: report.extra,
                });
            }
            tracing::warn!(
                missing = report.missing,
                extra = report.extra,
                "historical series misaligned, zero-filling missing dates"
            );
        }
        Ok(series)
    }

    async fn run_load<T, F>(
        &self,
        name: SlotName,
        slot: &RwLock<Slot<T>>,
        token: &CancellationToken,
        fetch: F,
    ) -> Result<(), FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        if token.is_cancelled() {
            return Err(self.settle_cancelled(name, slot).await);
        }

        slot.write().await.begin_loading();
        self.publish(name, SlotStatus::Loading);

        let outcome = fetch.await;

        if token.is_cancelled() {
            tracing::debug!(slot = name.as_str(), "discarding result of cancelled load");
            return Err(self.settle_cancelled(name, slot).await);
        }

        match outcome {
            Ok(value) => {
                slot.write().await.fulfil(value);
                self.publish(name, SlotStatus::Ready);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    slot = name.as_str(),
                    error = %e,
                    "load failed, keeping previous value"
                );
                slot.write().await.fail(e.to_string());
                self.publish(name, SlotStatus::Failed);
                Err(e)
            }
        }
    }

    /// Cancelled loads end as failed so the board still settles
    async fn settle_cancelled<T>(&self, name: SlotName, slot: &RwLock<Slot<T>>) -> FetchError {
        let cancelled = FetchError::Cancelled {
            slot: name.as_str(),
        };
        slot.write().await.fail(cancelled.to_string());
        self.publish(name, SlotStatus::Failed);
        cancelled
    }

    fn publish(&self, name: SlotName, status: SlotStatus) {
        self.store.board.send_modify(|board| board.set(name, status));
    }
}
