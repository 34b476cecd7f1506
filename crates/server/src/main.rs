use std::{net::SocketAddr, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use server_api::{
    branches_route, check_health, list_branches, list_personnel, personnel_route, ApiContext,
};
use shared::{
    domain::{Branch, Person},
    error::ApiError,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let directory = directory::connect(&settings.directory)?;
    if !settings.static_dir.join("index.html").is_file() {
        warn!(
            static_dir = %settings.static_dir.display(),
            "front end build not found; only the API will be useful"
        );
    }

    let state = AppState {
        api: ApiContext::new(directory),
        static_dir: settings.static_dir,
    };
    let directory_kind = state.api.directory.kind();
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, directory = directory_kind, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let front_end = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .route("/healthz", get(healthz))
        .route(branches_route(), get(http_list_branches))
        .route(personnel_route(), get(http_list_personnel))
        .fallback_service(front_end)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    check_health(&state.api)
        .await
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, Json(e)))?;
    Ok("ok")
}

async fn http_list_branches(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Branch>>, (StatusCode, Json<ApiError>)> {
    let branches = list_branches(&state.api)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, Json(e)))?;
    Ok(Json(branches))
}

async fn http_list_personnel(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Person>>, (StatusCode, Json<ApiError>)> {
    let personnel = list_personnel(&state.api)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, Json(e)))?;
    Ok(Json(personnel))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
