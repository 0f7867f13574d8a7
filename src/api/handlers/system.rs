//! System endpoints: service index, health check and the 404 fallback.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::config::ServiceConfig;
use crate::error::ErrorBody;

/// Service index returned by `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    /// Service name.
    pub mensaje: String,
    /// Crate version.
    pub version: String,
    /// Entry points keyed by purpose.
    pub endpoints: BTreeMap<String, String>,
    /// Path of the interactive documentation.
    pub documentacion: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    /// Number of years with a ledger.
    years: usize,
    /// Number of holidays across all years.
    holidays: usize,
}

/// Body of the 404 fallback.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundResponse {
    /// Structured error payload.
    pub error: ErrorBody,
    /// Entry points the client can use instead.
    pub available_endpoints: BTreeMap<String, String>,
}

fn endpoint_map(config: &ServiceConfig) -> BTreeMap<String, String> {
    [
        ("todos_feriados", "/feriados/all"),
        ("feriados_por_anio", "/feriados/{anio}"),
        ("consultar_fecha", "/feriados/consultar/{fecha}"),
        ("proximos_feriados", "/feriados/proximos?cantidad=N"),
        ("agregar_feriado", "/feriados/agregar/"),
        ("eliminar_feriado", "/feriados/eliminar/"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), config.prefixed(path)))
    .collect()
}

/// The entry points plus the service root and the documentation pages.
fn available_endpoints(config: &ServiceConfig) -> BTreeMap<String, String> {
    let mut map = endpoint_map(config);
    let root = if config.api_prefix.is_empty() {
        "/".to_string()
    } else {
        config.api_prefix.clone()
    };
    map.insert("raiz".to_string(), root);
    map.insert("documentacion".to_string(), config.prefixed("/docs"));
    map.insert("redoc".to_string(), config.prefixed("/redoc"));
    map
}

/// `GET /`: Service index.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service index",
    description = "Returns the service name, version, entry points and the documentation path.",
    responses(
        (status = 200, description = "Service index", body = IndexResponse),
    )
)]
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let config = &state.config;
    Json(IndexResponse {
        mensaje: "API de Feriados Bursátiles Argentinos".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: endpoint_map(config),
        documentacion: config.prefixed("/docs"),
    })
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and calendar size.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (years, holidays) = state.store.stats().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            years,
            holidays,
        }),
    )
}

/// Fallback for unknown routes: a structured 404 listing the entry points.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "route not found");
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: ErrorBody {
                code: 2000,
                kind: "route_not_found",
                message: format!("no route for {}", uri.path()),
                details: None,
            },
            available_endpoints: available_endpoints(&state.config),
        }),
    )
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn endpoint_map_applies_prefix() {
        let mut config = test_config();
        config.api_prefix = "/api".to_string();
        let map = endpoint_map(&config);
        assert_eq!(map.len(), 6);
        assert_eq!(
            map.get("todos_feriados").map(String::as_str),
            Some("/api/feriados/all")
        );
    }

    #[test]
    fn not_found_map_lists_root_and_docs() {
        let map = available_endpoints(&test_config());
        assert_eq!(map.get("raiz").map(String::as_str), Some("/"));
        assert_eq!(map.get("documentacion").map(String::as_str), Some("/docs"));
        assert_eq!(map.get("redoc").map(String::as_str), Some("/redoc"));

        let mut config = test_config();
        config.api_prefix = "/api".to_string();
        let map = available_endpoints(&config);
        assert_eq!(map.get("raiz").map(String::as_str), Some("/api"));
        assert_eq!(map.get("documentacion").map(String::as_str), Some("/api/docs"));
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn endpoint_map_without_prefix() {
        let map = endpoint_map(&test_config());
        assert_eq!(
            map.get("eliminar_feriado").map(String::as_str),
            Some("/feriados/eliminar/")
        );
    }
}
