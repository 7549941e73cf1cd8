// Streaming service - Progressive delivery of slot transitions
use crate::application::statistics_service::StatisticsService;
use crate::domain::slot::{SlotName, SlotStatus, StatusBoard};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StreamMessage {
    /// Current status of every slot, sent first
    Skeleton { slots: StatusBoard },
    /// A slot changed status; carries its view data once ready
    SlotUpdate {
        slot: SlotName,
        status: SlotStatus,
        data: Option<Value>,
    },
    /// Every slot is ready or failed
    Complete { slots: StatusBoard, duration_ms: u64 },
}

#[derive(Clone)]
pub struct StreamingService {
    statistics: StatisticsService,
}

impl StreamingService {
    pub fn new(statistics: StatisticsService) -> Self {
        Self { statistics }
    }

    /// Follow the status board until all slots settle or the receiver goes away.
    pub fn stream_progress(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(16);
        let statistics = self.statistics.clone();

        tokio::spawn(async move {
            let start_time = Instant::now();
            let mut board_rx = statistics.subscribe();
            let mut last = *board_rx.borrow_and_update();

            if tx.send(StreamMessage::Skeleton { slots: last }).await.is_err() {
                return;
            }

            for name in SlotName::ALL {
                let status = last.get(name);
                if status.is_settled()
                    && send_update(&tx, &statistics, name, status).await.is_err()
                {
                    return;
                }
            }

            while !last.is_settled() {
                tokio::select! {
                    changed = board_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = tx.closed() => {
                        tracing::debug!("progress stream receiver dropped");
                        return;
                    }
                }

                let current = *board_rx.borrow_and_update();
                for name in SlotName::ALL {
                    let status = current.get(name);
                    if status != last.get(name)
                        && send_update(&tx, &statistics, name, status).await.is_err()
                    {
                        return;
                    }
                }
                last = current;
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let _ = tx
                .send(StreamMessage::Complete {
                    slots: last,
                    duration_ms,
                })
                .await;
        });

        rx
    }
}

async fn send_update(
    tx: &mpsc::Sender<StreamMessage>,
    statistics: &StatisticsService,
    slot: SlotName,
    status: SlotStatus,
) -> Result<(), SendError<StreamMessage>> {
    let data = if status == SlotStatus::Ready {
        slot_payload(statistics, slot).await
    } else {
        None
    };
    tx.send(StreamMessage::SlotUpdate { slot, status, data }).await
}

async fn slot_payload(statistics: &StatisticsService, slot: SlotName) -> Option<Value> {
    let encoded = match slot {
        SlotName::World => serde_json::to_value(statistics.world_summary().await.data),
        SlotName::Countries => serde_json::to_value(statistics.map().await.data),
        SlotName::Chart => serde_json::to_value(statistics.chart().await.data),
    };

    match encoded {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(slot = slot.as_str(), error = %e, "could not encode slot payload");
            None
        }
    }
}
