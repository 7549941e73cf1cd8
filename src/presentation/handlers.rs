// HTTP request handlers
use crate::domain::contact::NewContact;
use crate::infrastructure::frame_stream::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

async fn respond<T: Serialize>(headers: &HeaderMap, data: &T) -> Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Combined chart + map view
pub async fn dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.dashboard().await).await
}

pub async fn chart_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.chart().await).await
}

pub async fn map_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.map().await).await
}

pub async fn world_summary(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.world_summary().await).await
}

pub async fn country_list(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.countries().await).await
}

pub async fn status_board(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.statistics.status_board()).await
}

/// Stream slot transitions as they happen (progressive loading)
pub async fn stream_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.streaming.stream_progress();
    stream_from_receiver(rx, accepts_brotli(&headers))
}

pub async fn list_contacts(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.contacts.list_contacts().await).await
}

pub async fn add_contact(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(record): Json<NewContact>,
) -> Response {
    let contact = state.contacts.add_contact(record).await;
    let mut response = respond(&headers, &contact).await;
    if response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::CREATED;
    }
    response
}

pub async fn get_contact(
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.contacts.get_contact(id).await {
        Some(contact) => respond(&headers, &contact).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Serialize)]
struct Removal {
    removed: bool,
}

/// Removing an unknown contact is not an error; the body reports whether anything changed
pub async fn remove_contact(
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let removed = state.contacts.remove_contact(id).await;
    respond(&headers, &Removal { removed }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cancellation::CancellationToken;
    use crate::application::contact_service::ContactService;
    use crate::application::statistics_service::StatisticsService;
    use crate::application::statistics_source::fakes::FakeSource;
    use crate::application::streaming_service::StreamingService;
    use crate::domain::map::{GeoPoint, MapSettings};
    use serde_json::Value;

    fn state() -> Arc<AppState> {
        let map = MapSettings {
            center: GeoPoint(0.0, 0.0),
            zoom: 2,
            tile_url: "tiles".to_string(),
        };
        let statistics = StatisticsService::new(Arc::new(FakeSource::healthy()), map, false);
        Arc::new(AppState {
            streaming: StreamingService::new(statistics.clone()),
            statistics,
            contacts: ContactService::new(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_views_before_and_after_load() {
        let state = state();

        let chart = body_json(chart_view(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(chart["status"], "idle");
        assert_eq!(chart["data"]["datasets"].as_array().unwrap().len(), 3);

        let world = body_json(world_summary(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(world["status"], "idle");
        assert!(world["data"].is_null());

        state.statistics.load_all(&CancellationToken::new()).await;

        let combined = body_json(dashboard(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(combined["chart"]["data"]["labels"][0], "d1");
        assert_eq!(combined["map"]["data"]["markers"][1]["key"], "8");
        assert_eq!(combined["map"]["data"]["markers"][1]["position"][0], 41.0);

        let map = body_json(map_view(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(map["status"], "ready");
        assert_eq!(map["data"]["zoom"], 2);

        let world = body_json(world_summary(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(world["data"]["cases"], 100);

        let board = body_json(status_board(HeaderMap::new(), State(state)).await).await;
        assert_eq!(board["chart"], "ready");
    }

    #[tokio::test]
    async fn test_contact_routes() {
        let state = state();

        let created = add_contact(
            HeaderMap::new(),
            State(state.clone()),
            Json(NewContact::named("Ada")),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let ada = body_json(created).await;
        let id: Uuid = ada["id"].as_str().unwrap().parse().unwrap();

        add_contact(HeaderMap::new(), State(state.clone()), Json(NewContact::named("Lin"))).await;

        let list = body_json(list_contacts(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(list[0]["name"], "Ada");
        assert_eq!(list[1]["name"], "Lin");

        let detail = get_contact(Path(id), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(body_json(detail).await["name"], "Ada");

        let removed = remove_contact(Path(id), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(body_json(removed).await["removed"], true);

        let again = remove_contact(Path(id), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(again.status(), StatusCode::OK);
        assert_eq!(body_json(again).await["removed"], false);

        let missing = get_contact(Path(id), HeaderMap::new(), State(state)).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
