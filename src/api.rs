//! HTTP API handlers for the dashboard.
//!
//! Reads are served from the pollers' latest state and never wait on the
//! network. Mutations that only change the selection (tab, earthquake
//! sub-view) never fetch; language, area, retry and reload forward to the
//! pollers, which fetch in the background.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::classify::{LegendEntry, legend};
use crate::dashboard::Dashboard;
use crate::i18n::{Language, LanguageCatalog, LanguageEntry, UiKey, ui};
use crate::source::Category;
use crate::view::{PresentationView, QuakeMode, Tab};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

/// Build the router with every route and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/view", get(get_view))
        .route("/languages", get(get_languages))
        .route("/legend", get(get_legend))
        .route("/language", post(post_language))
        .route("/tab", post(post_tab))
        .route("/earthquakes/mode", post(post_quake_mode))
        .route("/weather/area", post(post_weather_area))
        .route("/retry/:category", post(post_retry))
        .route("/reload", post(post_reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub lang: String,
}

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: Tab,
}

#[derive(Debug, Deserialize)]
pub struct QuakeModeRequest {
    pub mode: QuakeMode,
}

#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    pub area_code: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub current: Language,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Serialize)]
pub struct LegendResponse {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /view - The composed screen for the current session.
#[instrument(skip(state))]
pub async fn get_view(State(state): State<AppState>) -> Json<PresentationView> {
    Json(state.dashboard.view())
}

/// GET /languages - The language catalog and the active language.
#[instrument(skip(state))]
pub async fn get_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        current: state.dashboard.language(),
        languages: LanguageCatalog::entries(),
    })
}

/// GET /legend - Intensity legend in ascending severity.
#[instrument(skip(state))]
pub async fn get_legend(State(state): State<AppState>) -> Json<LegendResponse> {
    Json(LegendResponse {
        title: ui(UiKey::IntensityLegend, state.dashboard.language()),
        entries: legend(),
    })
}

/// POST /language - Change language. Unknown codes degrade to Japanese.
///
/// # Request Body
///
/// ```json
/// { "lang": "en" }
/// ```
#[instrument(skip(state))]
pub async fn post_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Json<PresentationView> {
    let language = Language::resolve(&request.lang);
    if language.code() != request.lang.trim() {
        warn!(requested = %request.lang, resolved = %language, "Unsupported language code");
    }
    state.dashboard.set_language(language);
    Json(state.dashboard.view())
}

/// POST /tab - Switch the visible panel.
#[instrument(skip(state))]
pub async fn post_tab(
    State(state): State<AppState>,
    Json(request): Json<TabRequest>,
) -> Json<PresentationView> {
    state.dashboard.select_tab(request.tab);
    Json(state.dashboard.view())
}

/// POST /earthquakes/mode - Toggle the earthquake list/map sub-view.
#[instrument(skip(state))]
pub async fn post_quake_mode(
    State(state): State<AppState>,
    Json(request): Json<QuakeModeRequest>,
) -> Json<PresentationView> {
    state.dashboard.set_quake_mode(request.mode);
    Json(state.dashboard.view())
}

/// POST /weather/area - Select a weather area from the catalog.
#[instrument(skip(state))]
pub async fn post_weather_area(
    State(state): State<AppState>,
    Json(request): Json<AreaRequest>,
) -> Result<Json<PresentationView>, StatusCode> {
    match state.dashboard.set_weather_area(&request.area_code) {
        Ok(()) => Ok(Json(state.dashboard.view())),
        Err(e) => {
            warn!(area_code = %request.area_code, error = %e, "Rejected weather area");
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// POST /retry/:category - Out-of-band fetch for one category.
///
/// Returns `202 Accepted`; the result shows up in a later `GET /view`.
#[instrument(skip(state))]
pub async fn post_retry(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> StatusCode {
    match category.parse::<Category>() {
        Ok(category) => {
            info!(%category, "Retry requested");
            state.dashboard.retry(category);
            StatusCode::ACCEPTED
        }
        Err(e) => {
            warn!(error = %e, "Invalid retry category");
            StatusCode::BAD_REQUEST
        }
    }
}

/// POST /reload - Restart every poller.
#[instrument(skip(state))]
pub async fn post_reload(State(state): State<AppState>) -> StatusCode {
    state.dashboard.reload();
    StatusCode::ACCEPTED
}
