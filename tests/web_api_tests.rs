use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use shortest_path_solver::web::models::{SessionInfo, SolveResponse};
use shortest_path_solver::web::api::{create_router, AppState};
use shortest_path_solver::web::server::{build_app, ServerConfig};
use std::collections::HashMap;
use std::time::Duration;
use tower::ServiceExt;

const SCENARIO_EDGES: &str = r#"[
    {"source": "A", "target": "B", "weight": 1, "bidirectional": true},
    {"source": "B", "target": "C", "weight": 2, "bidirectional": true},
    {"source": "A", "target": "C", "weight": 5, "bidirectional": false}
]"#;

fn test_app(max_sessions: usize) -> Router {
    build_app(&ServerConfig {
        max_sessions,
        ..ServerConfig::default()
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn upload_scenario(app: &Router) -> SessionInfo {
    let (status, body) = send(app, "POST", "/api/graphs/edge-list", SCENARIO_EDGES).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let app = test_app(10);

    let (status, body) = send(&app, "GET", "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Shortest Path Solver!");

    let (status, body) = send(&app, "GET", "/api/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_upload_edge_list_then_solve() {
    let app = test_app(10);
    let session = upload_scenario(&app).await;
    assert_eq!(session.node_count, 3);
    assert_eq!(session.edge_count, 5);

    let uri = format!(
        "/api/sessions/{}/solve?start_node_id=A&end_node_id=C",
        session.session_id
    );
    let (status, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::OK);

    let answer: SolveResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        answer.shortest_path,
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert_eq!(answer.total_distance, Some(3.0));
}

#[tokio::test]
async fn test_unreachable_target_returns_nulls() {
    let app = test_app(10);
    let (status, body) = send(
        &app,
        "POST",
        "/api/graphs/edge-list",
        r#"[{"source": "A", "target": "B", "weight": 1}]"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session: SessionInfo = serde_json::from_value(body).unwrap();

    let uri = format!("/api/sessions/{}/solve?start_node_id=B&end_node_id=A", session.session_id);
    let (status, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortest_path"], Value::Null);
    assert_eq!(body["total_distance"], Value::Null);
}

#[tokio::test]
async fn test_upload_adjacency_matrix_with_policy() {
    let app = test_app(10);
    let payload = r#"{"matrix": [["A", "B"], [0, 2], ["inf", 0]], "policy": "directed"}"#;

    let (status, body) = send(&app, "POST", "/api/graphs/adjacency-matrix", payload).await;
    assert_eq!(status, StatusCode::OK);
    let session: SessionInfo = serde_json::from_value(body).unwrap();
    assert_eq!(session.edge_count, 1);

    let uri = format!("/api/sessions/{}/solve?start_node_id=B&end_node_id=A", session.session_id);
    let (_, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(body["total_distance"], Value::Null);

    // policy defaults to bidirectional
    let payload = r#"{"matrix": [["A", "B"], [0, 2], ["inf", 0]]}"#;
    let (_, body) = send(&app, "POST", "/api/graphs/adjacency-matrix", payload).await;
    let session: SessionInfo = serde_json::from_value(body).unwrap();
    assert_eq!(session.edge_count, 2);
}

#[tokio::test]
async fn test_bad_uploads_are_rejected() {
    let app = test_app(10);

    let (status, body) = send(&app, "POST", "/api/graphs/edge-list", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_input");

    let negative = r#"[{"source": "A", "target": "B", "weight": -1}]"#;
    let (status, body) = send(&app, "POST", "/api/graphs/edge-list", negative).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_weight");

    let ragged = r#"{"matrix": [["A", "B"], [0, 1]]}"#;
    let (status, body) = send(&app, "POST", "/api/graphs/adjacency-matrix", ragged).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_input");

    let (_, body) = send(&app, "GET", "/api/sessions", "").await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_session_and_node() {
    let app = test_app(10);

    let missing = uuid::Uuid::new_v4();
    let uri = format!("/api/sessions/{}/solve?start_node_id=A&end_node_id=C", missing);
    let (status, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let session = upload_scenario(&app).await;
    let uri = format!("/api/sessions/{}/solve?start_node_id=A&end_node_id=Q", session.session_id);
    let (status, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "node_not_found");
}

#[tokio::test]
async fn test_sessions_are_independent_and_deletable() {
    let app = test_app(10);
    let first = upload_scenario(&app).await;
    let second = upload_scenario(&app).await;
    assert_ne!(first.session_id, second.session_id);

    let (_, body) = send(&app, "GET", "/api/sessions", "").await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let uri = format!("/api/sessions/{}", first.session_id);
    let (status, _) = send(&app, "DELETE", &uri, "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/sessions/{}", second.session_id);
    let (status, body) = send(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node_count"], 3);
}

#[tokio::test]
async fn test_session_limit() {
    let app = test_app(1);
    upload_scenario(&app).await;

    let (status, body) = send(&app, "POST", "/api/graphs/edge-list", SCENARIO_EDGES).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "too_many_sessions");
}

#[tokio::test]
async fn test_busy_graph_does_not_block_other_sessions() {
    let state = AppState::new(10);
    let app = create_router().with_state(state.clone());
    let busy = upload_scenario(&app).await;
    let idle = upload_scenario(&app).await;

    // Hold the busy session's graph as a long run would
    let busy_graph = {
        let sessions = state.sessions.lock().unwrap();
        sessions[&busy.session_id].graph.clone()
    };
    let _running = busy_graph.lock().unwrap();

    let work = async {
        let uri = format!("/api/sessions/{}/solve?start_node_id=A&end_node_id=C", idle.session_id);
        let (status, body) = send(&app, "GET", &uri, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_distance"], 3.0);

        let (status, _) = send(&app, "POST", "/api/graphs/edge-list", SCENARIO_EDGES).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/sessions", "").await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    };

    tokio::time::timeout(Duration::from_secs(5), work)
        .await
        .expect("other sessions must stay usable while one graph is locked");
}

#[test]
fn test_config_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("SOLVER_HOST", "0.0.0.0"),
        ("SOLVER_PORT", "9090"),
        ("SOLVER_MAX_SESSIONS", "0"),
        ("SOLVER_CORS", "off"),
    ]
    .into_iter()
    .collect();

    let config = ServerConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

    assert_eq!(config.host, [0, 0, 0, 0]);
    assert_eq!(config.port, 9090);
    // zero is not a usable limit, so the default stays
    assert_eq!(config.max_sessions, ServerConfig::default().max_sessions);
    assert!(!config.enable_cors);
    assert_eq!(config.addr().to_string(), "0.0.0.0:9090");
}

#[test]
fn test_config_defaults_without_variables() {
    let config = ServerConfig::from_lookup(|_| None);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
}
