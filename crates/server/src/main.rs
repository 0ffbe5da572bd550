use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use shared::{
    domain::{ProductId, ProductPayload, ProductRecord},
    error::{ApiError, ApiException, ErrorCode},
    protocol::{product_route_pattern, products_route},
};
use tracing::{info, warn};

mod api;
mod app_state;
mod config;

use api::{create_product, delete_product, list_products, update_product, ApiContext};
use app_state::AppState;
use config::load_settings;

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let app = build_router(Arc::new(AppState {
        api: ApiContext::with_products(Vec::new()),
    }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            products_route(),
            get(http_list_products).post(http_create_product),
        )
        .route(
            product_route_pattern(),
            put(http_update_product).delete(http_delete_product),
        )
        .with_state(state)
}

fn http_error(err: ApiException) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    warn!(%status, error = %err.message, "product request rejected");
    (status, Json(err.into()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_products(State(state): State<Arc<AppState>>) -> Json<Vec<ProductRecord>> {
    Json(list_products(&state.api).await)
}

async fn http_create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<ProductRecord>), HttpError> {
    let record = create_product(&state.api, payload)
        .await
        .map_err(http_error)?;
    info!(product_id = %record.id, "product created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn http_update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<ProductRecord>, HttpError> {
    let record = update_product(&state.api, ProductId::new(id), payload)
        .await
        .map_err(http_error)?;
    info!(product_id = %record.id, "product updated");
    Ok(Json(record))
}

async fn http_delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let id = ProductId::new(id);
    delete_product(&state.api, id.clone())
        .await
        .map_err(http_error)?;
    info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
