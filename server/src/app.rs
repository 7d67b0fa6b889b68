use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(state.static_dir.as_path())
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let api = Router::new()
        .route("/api/config", get(routes::api::get_config))
        .route("/api/health", get(routes::api::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    api.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    // The shell names the current bundle hashes, so it must be revalidated on every load.
    if path == "/" || path.ends_with(".html") {
        return Some("no-cache");
    }

    None
}

/// Trunk emits `name-<hash>.ext`; only those files are safe to cache forever.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sehha_shared::MapConfig;
    use tower::ServiceExt;

    use super::*;

    fn scratch_static_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sehha-static-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/sehha-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/input-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn html_shell_is_revalidated() {
        assert_eq!(cache_control_for_path("/"), Some("no-cache"));
        assert_eq!(cache_control_for_path("/index.html"), Some("no-cache"));
    }

    #[test]
    fn no_cache_header_override_for_unhashed_files() {
        assert_eq!(cache_control_for_path("/mapbox-gl.js"), None);
        assert_eq!(cache_control_for_path("/favicon.ico"), None);
        assert_eq!(cache_control_for_path("/sehha-client.wasm"), None);
    }

    #[tokio::test]
    async fn serves_index_from_static_dir() {
        let dir = scratch_static_dir("index");
        std::fs::write(dir.join("index.html"), "<div id=\"app\"></div>").expect("write index");
        let app = build_app(AppState::new(MapConfig::default(), dir.clone()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-cache")
        );
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn missing_asset_is_not_found_without_cache_header() {
        let dir = scratch_static_dir("missing");
        let app = build_app(AppState::new(MapConfig::default(), dir.clone()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sehha-client-71578f6b278221f3_bg.wasm")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn api_routes_take_precedence_over_static_files() {
        let dir = scratch_static_dir("api");
        let app = build_app(AppState::new(MapConfig::default(), dir.clone()));

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let _ = std::fs::remove_dir_all(dir);
    }
}
