use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use sehha_shared::MapConfig;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: i64,
    pub map_configured: bool,
}

impl HealthResponse {
    fn for_state(state: &AppState) -> Self {
        Self {
            status: "ok",
            uptime_secs: state.uptime_secs(),
            map_configured: state.map_config.is_usable(),
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::for_state(&state))
}

/// Map widget settings for the browser. Never cached so token rotation applies on reload.
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let config: MapConfig = (*state.map_config).clone();
    ([(header::CACHE_CONTROL, "no-store")], Json(config))
}
