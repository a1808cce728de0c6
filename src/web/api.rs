use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::query::shortest_path_with_no_edge;
use crate::algorithm::ShortestPathResult;
use crate::graph::DEFAULT_NO_EDGE;
use crate::web::models::*;
use crate::web::store::MapStore;
use crate::Error;

/// Shared application state
///
/// Holds saved maps only; every shortest path request builds its own graph.
#[derive(Clone)]
pub struct AppState {
    pub maps: Arc<Mutex<MapStore>>,
    /// Matrix value meaning "no edge"
    pub no_edge: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_NO_EDGE)
    }
}

impl AppState {
    pub fn new(no_edge: f64) -> Self {
        Self {
            maps: Arc::new(Mutex::new(MapStore::new())),
            no_edge,
        }
    }

    /// Locks the map store. A panic while holding the lock cannot leave the
    /// store half-written, so poisoning is ignored.
    pub fn maps(&self) -> MutexGuard<'_, MapStore> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Errors returned by the API handlers
#[derive(Debug)]
pub enum ApiError {
    /// Body missing, not JSON, or missing a required field
    InvalidInput(String),
    MissingMapFields,
    MapNotFound(u64),
    Route(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Route(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::InvalidInput(detail) => {
                log::debug!("rejected request body: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    "invalid_input",
                    "Invalid input data".to_string(),
                )
            }
            ApiError::MissingMapFields => (
                StatusCode::BAD_REQUEST,
                "invalid_input",
                "Missing 'map' or 'mapName' key in request data.".to_string(),
            ),
            ApiError::MapNotFound(id) => {
                log::debug!("map {} not found", id);
                (
                    StatusCode::NOT_FOUND,
                    "map_not_found",
                    "Map not found.".to_string(),
                )
            }
            ApiError::Route(err) => {
                let (status, code) = match &err {
                    Error::InvalidEndpoint(..) => (StatusCode::NOT_FOUND, "invalid_endpoint"),
                    Error::MalformedMatrix(_) => (StatusCode::BAD_REQUEST, "malformed_matrix"),
                    Error::UnreachableTarget(..) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "unreachable_target")
                    }
                    Error::InternalInvariantViolation(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                if err.is_input_error() {
                    log::debug!("route request failed: {}", err);
                } else {
                    log::error!("shortest path engine defect: {}", err);
                }
                (status, code, err.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/dijkstra", post(run_dijkstra))
        .route("/api/shortest-path", post(run_shortest_path))
        .route("/api/map", post(save_map))
        .route("/api/getMaps", get(get_maps))
        .route("/api/getMaps/:map_id", get(get_map))
        .route("/api/deleteMap/:map_id", delete(delete_map))
        .route("/api/health", get(health_check))
}

/// Shortest path, answered with the path alone
pub async fn run_dijkstra(
    State(state): State<AppState>,
    payload: Result<Json<ShortestPathRequest>, JsonRejection>,
) -> Result<Json<Vec<usize>>, ApiError> {
    let Json(request) = payload?;
    let (result, _) = solve(&state, &request)?;
    Ok(Json(result.path))
}

/// Shortest path with distances and search metrics
pub async fn run_shortest_path(
    State(state): State<AppState>,
    payload: Result<Json<ShortestPathRequest>, JsonRejection>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let Json(request) = payload?;
    let (result, execution_time_ms) = solve(&state, &request)?;
    Ok(Json(ShortestPathResponse::new(
        Dijkstra::new().name(),
        &result,
        execution_time_ms,
    )))
}

fn solve(
    state: &AppState,
    request: &ShortestPathRequest,
) -> Result<(ShortestPathResult<f64>, f64), ApiError> {
    let matrix = request.matrix()?;
    let (matrix, source, target) = match (matrix, request.source, request.target) {
        (Some(matrix), Some(source), Some(target)) => (matrix, source, target),
        _ => {
            return Err(ApiError::InvalidInput(
                "adjacencyList, source and target are required".to_string(),
            ))
        }
    };

    let start_time = Instant::now();
    let result = shortest_path_with_no_edge(&matrix, source, target, state.no_edge)?;
    let execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "route {} -> {} over {} vertices: {:?} (distance {})",
        source,
        target,
        matrix.len(),
        result.path,
        result.distance
    );

    Ok((result, execution_time_ms))
}

/// Save a client map
pub async fn save_map(
    State(state): State<AppState>,
    payload: Result<Json<SaveMapRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedMap>), ApiError> {
    let Json(request) = payload?;
    let (map_name, node_map) = match (request.map_name, request.map) {
        (Some(map_name), Some(node_map)) => (map_name, node_map),
        _ => return Err(ApiError::MissingMapFields),
    };

    let saved = state.maps().insert(map_name, node_map);
    log::info!("saved map {} ({})", saved.id, saved.map_name);

    Ok((StatusCode::CREATED, Json(saved)))
}

/// List saved maps
pub async fn get_maps(State(state): State<AppState>) -> Json<Vec<SavedMap>> {
    let maps = state.maps().list();
    Json(maps)
}

/// Get one saved map
pub async fn get_map(
    State(state): State<AppState>,
    Path(map_id): Path<u64>,
) -> Result<Json<SavedMap>, ApiError> {
    let saved = state.maps().get(map_id).cloned();
    saved.map(Json).ok_or(ApiError::MapNotFound(map_id))
}

/// Delete a saved map
pub async fn delete_map(
    State(state): State<AppState>,
    Path(map_id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (removed, remaining) = {
        let mut maps = state.maps();
        (maps.remove(map_id), maps.len())
    };
    match removed {
        Some(_) => {
            log::info!("deleted map {} ({} left)", map_id, remaining);
            Ok(Json(MessageResponse {
                message: "Map deleted successfully.".to_string(),
            }))
        }
        None => Err(ApiError::MapNotFound(map_id)),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
