use sehha_shared::MapConfig;

/// Fetch the map widget settings handed out by the server.
pub async fn fetch_map_config() -> Result<MapConfig, String> {
    let resp = gloo_net::http::Request::get("/api/config")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<MapConfig>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}
