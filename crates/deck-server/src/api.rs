//! HTTP API for the presentation host.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use deck_core::{InputEvent, Key, SlideView};
use deck_tables::TableOutcome;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::state::{AppState, ChartStatus, DeckResponse, TableBody};
use crate::ws::ws_handler;

/// Build the router for the host.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        // Deck navigation
        .route("/api/deck", get(deck_handler))
        .route("/api/deck/next", post(next_handler))
        .route("/api/deck/previous", post(previous_handler))
        .route("/api/deck/goto", post(goto_handler))
        .route("/api/deck/key", post(key_handler))
        .route("/api/deck/dot", post(dot_handler))
        .route("/api/deck/swipe", post(swipe_handler))
        .route("/api/deck/visible", post(visible_handler))
        .route("/api/deck/resize", post(resize_handler))
        // Content
        .route("/api/tables", get(tables_handler))
        .route("/api/charts", get(charts_handler))
        // WebSocket command channel
        .route("/ws", get(ws_handler))
        .nest_service("/static", ServeDir::new(&config.static_dir));

    if let Some(dir) = config.data_dir() {
        router = router.nest_service("/data", ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

/// Serve the presentation page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health() -> &'static str {
    "OK"
}

// --- Deck endpoints ---

/// Deck status response.
#[derive(Serialize)]
struct DeckStatus {
    view: SlideView,
    charts: Vec<ChartStatus>,
}

async fn deck_handler(State(state): State<Arc<AppState>>) -> Json<DeckStatus> {
    Json(DeckStatus {
        view: state.view().await,
        charts: state.charts().await,
    })
}

async fn next_handler(State(state): State<Arc<AppState>>) -> Json<DeckResponse> {
    Json(state.next().await)
}

async fn previous_handler(State(state): State<Arc<AppState>>) -> Json<DeckResponse> {
    Json(state.previous().await)
}

#[derive(Deserialize)]
struct GotoRequest {
    index: usize,
}

async fn goto_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GotoRequest>,
) -> Json<DeckResponse> {
    Json(state.go_to(req.index).await)
}

#[derive(Deserialize)]
struct KeyRequest {
    /// DOM `KeyboardEvent.key` value
    key: String,
}

async fn key_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeyRequest>,
) -> Json<DeckResponse> {
    let key = Key::from_dom(&req.key);
    Json(state.input(InputEvent::Key { key }).await)
}

#[derive(Deserialize)]
struct DotRequest {
    index: usize,
    /// Present when the dot was activated from the keyboard
    key: Option<String>,
}

async fn dot_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DotRequest>,
) -> Json<DeckResponse> {
    let event = match req.key {
        Some(key) => InputEvent::DotKey {
            index: req.index,
            key: Key::from_dom(&key),
        },
        None => InputEvent::Dot { index: req.index },
    };
    Json(state.input(event).await)
}

#[derive(Deserialize)]
struct SwipeRequest {
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
}

/// Both points arrive together so the gesture is judged under one lock.
async fn swipe_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SwipeRequest>,
) -> Json<DeckResponse> {
    Json(
        state
            .input(InputEvent::Gesture {
                start_x: req.start_x,
                start_y: req.start_y,
                end_x: req.end_x,
                end_y: req.end_y,
            })
            .await,
    )
}

#[derive(Deserialize)]
struct VisibleRequest {
    index: usize,
    ratio: f64,
}

async fn visible_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VisibleRequest>,
) -> Json<DeckResponse> {
    Json(
        state
            .input(InputEvent::Visibility {
                index: req.index,
                ratio: req.ratio,
            })
            .await,
    )
}

#[derive(Deserialize, Default)]
struct ResizeRequest {
    /// New chart container width in pixels
    width: Option<f64>,
}

/// An empty or unparseable body is a plain resize.
async fn resize_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Json<DeckResponse> {
    let req: ResizeRequest = serde_json::from_slice(&body).unwrap_or_default();
    Json(state.resize(req.width).await)
}

// --- Content endpoints ---

#[derive(Serialize)]
struct TablesResponse {
    tables: Vec<TableBody>,
    outcomes: Vec<TableOutcome>,
}

async fn tables_handler(State(state): State<Arc<AppState>>) -> Json<TablesResponse> {
    Json(TablesResponse {
        tables: state.tables().await,
        outcomes: state.table_outcomes().await,
    })
}

async fn charts_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ChartStatus>> {
    Json(state.charts().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::ControllerConfig;

    fn config() -> ServerConfig {
        ServerConfig::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn router_builds() {
        let state = AppState::new(ControllerConfig::default()).unwrap();
        let _router = build_router(state, &config());
    }

    #[test]
    fn router_builds_for_remote_data() {
        let state = AppState::new(ControllerConfig::default()).unwrap();
        let config = ServerConfig::from_lookup(|name| {
            (name == "DECK_DATA_URL").then(|| "https://example.org/csv".to_string())
        })
        .unwrap();
        let _router = build_router(state, &config);
    }

    #[test]
    fn resize_body_is_optional() {
        let req: ResizeRequest = serde_json::from_slice(b"").unwrap_or_default();
        assert_eq!(req.width, None);
        let req: ResizeRequest = serde_json::from_slice(br#"{"width": 640}"#).unwrap();
        assert_eq!(req.width, Some(640.0));
    }

    #[test]
    fn dot_request_key_is_optional() {
        let req: DotRequest = serde_json::from_str(r#"{"index": 4}"#).unwrap();
        assert_eq!(req.index, 4);
        assert!(req.key.is_none());
    }

    #[tokio::test]
    async fn index_page_titles_follow_chart_slides() {
        let Html(page) = index_handler().await;
        assert!(page.contains(r#""Why Nuclear Energy", "India's Energy Flow", "The Climate Imperative","#));
        assert!(page.contains(r#"CHARTS = { 2: "sankeyChart", 5: "investmentChart", 12: "workforceChart" }"#));
    }

    #[tokio::test]
    async fn index_page_draws_series_with_chart_js() {
        let Html(page) = index_handler().await;
        assert!(page.contains("cdn.jsdelivr.net/npm/chart.js"));
        assert!(page.contains("yAxisID: d.axis"));
        assert!(page.contains("grid: { display: axis.grid }"));
        assert!(page.contains("`${v / 1000}K`"));
        assert!(!page.contains(".bar"));
    }
}
