use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::algorithm::{solve, PathResult};
use crate::graph::WeightedGraph;
use crate::ingest::{load_edge_list, AdjacencyMatrix};
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<T, ApiError>;

/// Shared application state
///
/// Every uploaded graph lives in its own session. The map lock is only held to look
/// a session up; a solve holds that session's graph lock for the whole run, so a
/// graph never sees two runs at once.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
        }
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/graphs/edge-list", post(upload_edge_list))
        .route("/api/graphs/adjacency-matrix", post(upload_adjacency_matrix))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/api/sessions/:session_id/solve", get(solve_shortest_path))
}

/// Welcome message
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the Shortest Path Solver!" }))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a session from a JSON edge list
pub async fn upload_edge_list(State(state): State<AppState>, body: String) -> ApiResult<Json<SessionInfo>> {
    let graph = load_edge_list(&body).map_err(|err| {
        warn!("Rejected edge list upload: {}", err);
        core_error(&err)
    })?;

    store_graph(&state, graph).map(Json)
}

/// Create a session from a JSON adjacency matrix
pub async fn upload_adjacency_matrix(State(state): State<AppState>, body: String) -> ApiResult<Json<SessionInfo>> {
    let graph = serde_json::from_str::<MatrixUpload>(&body)
        .map_err(|err| Error::MalformedInput(format!("adjacency matrix upload: {}", err)))
        .and_then(|upload| AdjacencyMatrix::from_rows(&upload.matrix)?.to_graph(upload.policy))
        .map_err(|err| {
            warn!("Rejected adjacency matrix upload: {}", err);
            core_error(&err)
        })?;

    store_graph(&state, graph).map(Json)
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<Vec<Uuid>>> {
    let sessions = lock_sessions(&state)?;
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionInfo>> {
    let sessions = lock_sessions(&state)?;

    match sessions.get(&session_id) {
        Some(session) => Ok(Json(session.info())),
        None => Err(session_not_found(session_id)),
    }
}

/// Drop a session and its graph
pub async fn delete_session(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> ApiResult<StatusCode> {
    let mut sessions = lock_sessions(&state)?;

    match sessions.remove(&session_id) {
        Some(_) => {
            info!("Deleted session {}", session_id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found(session_id)),
    }
}

/// Shortest path between two nodes of a session's graph
pub async fn solve_shortest_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SolveQuery>,
) -> ApiResult<Json<SolveResponse>> {
    let graph = session_graph(&state, session_id)?;
    let SolveQuery {
        start_node_id,
        end_node_id,
    } = query;

    let (start, end) = (start_node_id.clone(), end_node_id.clone());
    let outcome = tokio::task::spawn_blocking(move || -> ApiResult<PathResult> {
        let mut graph = graph.lock().map_err(|_| graph_unavailable(session_id))?;
        solve(&mut graph, &start, &end).map_err(|err| {
            warn!("Solve on session {} failed: {}", session_id, err);
            core_error(&err)
        })
    })
    .await
    .map_err(|err| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "solver_failed",
            format!("Solver task failed: {}", err),
        )
    })?;
    let result = outcome?;

    info!(
        "Solved {} -> {} on session {}: distance {:?}",
        start_node_id, end_node_id, session_id, result.distance
    );

    Ok(Json(SolveResponse {
        shortest_path: result.path,
        total_distance: result.distance,
    }))
}

// Helper functions

fn store_graph(state: &AppState, graph: WeightedGraph) -> ApiResult<SessionInfo> {
    let mut sessions = lock_sessions(state)?;

    if sessions.len() >= state.max_sessions {
        warn!("Refusing upload: {} sessions already open", sessions.len());
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "too_many_sessions",
            format!("Session limit of {} reached", state.max_sessions),
        ));
    }

    let session = Session::new(graph);
    let info = session.info();
    sessions.insert(session.id, session);

    info!(
        "Created session {} with {} nodes and {} edges",
        info.session_id, info.node_count, info.edge_count
    );
    Ok(info)
}

fn lock_sessions(state: &AppState) -> ApiResult<MutexGuard<'_, HashMap<Uuid, Session>>> {
    state.sessions.lock().map_err(|_| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "state_unavailable",
            "Session store is unavailable".to_string(),
        )
    })
}

fn session_graph(state: &AppState, session_id: Uuid) -> ApiResult<Arc<Mutex<WeightedGraph>>> {
    let sessions = lock_sessions(state)?;
    sessions
        .get(&session_id)
        .map(|session| Arc::clone(&session.graph))
        .ok_or_else(|| session_not_found(session_id))
}

fn graph_unavailable(session_id: Uuid) -> ApiError {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "state_unavailable",
        format!("Graph of session {} is unavailable", session_id),
    )
}

fn session_not_found(session_id: Uuid) -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        "session_not_found",
        format!("Session {} not found, please upload a graph first", session_id),
    )
}

fn core_error(err: &Error) -> ApiError {
    let (status, kind) = match err {
        Error::InvalidWeight(_) => (StatusCode::BAD_REQUEST, "invalid_weight"),
        Error::MalformedInput(_) => (StatusCode::BAD_REQUEST, "malformed_input"),
        Error::NodeNotFound(_) => (StatusCode::NOT_FOUND, "node_not_found"),
        Error::BrokenInvariant(_) => (StatusCode::INTERNAL_SERVER_ERROR, "broken_invariant"),
    };
    error_response(status, kind, err.to_string())
}

fn error_response(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}
