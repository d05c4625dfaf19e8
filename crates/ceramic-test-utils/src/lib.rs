//! In-memory mock of the Ceramic node HTTP API, using [axum](https://github.com/tokio-rs/axum).
//!
//! Streams are stored as raw JSON states. Only ids made of lowercase
//! base36 characters, at least ten long, are accepted.

use std::{
    collections::{BTreeSet, HashMap},
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub const HEALTHY: &str = "Alive!";
pub const SUPPORTED_CHAIN: &str = "eip155:3";

#[derive(Default)]
struct Node {
    streams: HashMap<String, Value>,
    pins: BTreeSet<String>,
    created: usize,
}

type Shared = Arc<Mutex<Node>>;

/// Handle to a running mock node.
#[derive(Clone)]
pub struct MockNode {
    /// API base URL, e.g. `http://127.0.0.1:4000/api/v0`.
    pub base_url: String,
    node: Shared,
}

impl MockNode {
    /// Stores a stream state, replacing any previous state under the same id.
    pub fn insert_stream(&self, stream_id: &str, state: Value) {
        lock(&self.node).streams.insert(stream_id.to_string(), state);
    }

    pub fn stream(&self, stream_id: &str) -> Option<Value> {
        lock(&self.node).streams.get(stream_id).cloned()
    }

    pub fn is_pinned(&self, stream_id: &str) -> bool {
        lock(&self.node).pins.contains(stream_id)
    }
}

/// Starts a mock node on a free local port.
pub async fn spawn_node() -> MockNode {
    let node = Shared::default();

    let port = port_check::free_local_port().expect("Failed to find free port");
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = TcpListener::bind(addr).await.expect("Failed to bind port");
    info!("Mock node listening on port {}", port);

    let router = create_router(node.clone());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Server error: {}", e);
        }
    });

    MockNode {
        base_url: format!("http://{}/api/v0", addr),
        node,
    }
}

fn create_router(node: Shared) -> Router {
    let api = Router::new()
        .route("/streams", post(create_stream))
        .route("/streams/:id", get(load_stream))
        .route("/multiqueries", post(multiquery))
        .route("/commits", post(apply_commit))
        .route("/commits/:id", get(get_commits))
        .route("/pins", get(list_pins))
        .route(
            "/pins/:id",
            get(confirm_pin).post(add_pin).delete(remove_pin),
        )
        .route("/node/chains", get(chains))
        .route("/node/healthcheck", get(healthcheck))
        .with_state(node);

    Router::new().nest("/api/v0", api)
}

fn lock(node: &Shared) -> MutexGuard<'_, Node> {
    node.lock().unwrap_or_else(|e| e.into_inner())
}

fn is_valid_id(id: &str) -> bool {
    id.len() >= 10 && id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn error_response(status: StatusCode, message: String) -> Response {
    debug!("Responding {}: {}", status, message);
    (status, Json(json!({ "error": message }))).into_response()
}

fn check_id(id: &str) -> Result<(), Response> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("invalid identifier: {}", id),
        ))
    }
}

fn not_found(id: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("stream not found: {}", id))
}

fn holder(id: &str, state: &Value) -> Json<Value> {
    Json(json!({ "streamId": id, "state": state }))
}

async fn create_stream(State(node): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut node = lock(&node);
    node.created += 1;

    let id = format!("kjzl6cwe1jw{:010}", node.created);
    let genesis = &body["genesis"];

    let state = json!({
        "type": body["type"],
        "content": genesis.get("data").cloned().unwrap_or(json!({})),
        "metadata": genesis.get("header").cloned().unwrap_or(json!({ "controllers": [] })),
        "signature": 0,
        "anchorStatus": "PENDING",
        "log": [{ "cid": format!("bafygenesis{}", node.created), "type": 0 }],
    });

    node.streams.insert(id.clone(), state.clone());
    holder(&id, &state).into_response()
}

async fn load_stream(State(node): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(res) = check_id(&id) {
        return res;
    }

    match lock(&node).streams.get(&id) {
        Some(state) => holder(&id, state).into_response(),
        None => not_found(&id),
    }
}

async fn multiquery(State(node): State<Shared>, Json(body): Json<Value>) -> Response {
    let node = lock(&node);

    let states = body["queries"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|q| q["streamId"].as_str())
        .filter_map(|id| node.streams.get(id).map(|s| (id.to_string(), s.clone())))
        .collect::<serde_json::Map<_, _>>();

    Json(Value::Object(states)).into_response()
}

async fn get_commits(State(node): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(res) = check_id(&id) {
        return res;
    }

    let node = lock(&node);
    let Some(state) = node.streams.get(&id) else {
        return not_found(&id);
    };

    let commits = state["log"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|entry| json!({ "cid": entry["cid"], "value": {} }))
        .collect::<Vec<_>>();

    Json(json!({ "streamId": id, "commits": commits })).into_response()
}

async fn apply_commit(State(node): State<Shared>, Json(body): Json<Value>) -> Response {
    let Some(id) = body["streamId"].as_str() else {
        return error_response(StatusCode::BAD_REQUEST, "missing streamId".to_string());
    };

    let mut node = lock(&node);
    let Some(state) = node.streams.get_mut(id) else {
        return not_found(id);
    };

    if let Some(data) = body["commit"].get("data") {
        state["content"] = data.clone();
    }

    let len = state["log"].as_array().map(Vec::len).unwrap_or_default();
    if let Some(log) = state["log"].as_array_mut() {
        log.push(json!({ "cid": format!("bafycommit{}", len), "type": 1 }));
    }

    holder(id, state).into_response()
}

async fn list_pins(State(node): State<Shared>) -> Response {
    let pins = lock(&node).pins.iter().cloned().collect::<Vec<_>>();
    Json(json!({ "pinnedStreamIds": pins })).into_response()
}

async fn confirm_pin(State(node): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(res) = check_id(&id) {
        return res;
    }

    let pinned = if lock(&node).pins.contains(&id) {
        vec![id]
    } else {
        Vec::new()
    };

    Json(json!({ "pinnedStreamIds": pinned })).into_response()
}

async fn add_pin(State(node): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(res) = check_id(&id) {
        return res;
    }

    let mut node = lock(&node);
    if !node.streams.contains_key(&id) {
        return not_found(&id);
    }

    node.pins.insert(id.clone());
    Json(json!({ "streamId": id, "isPinned": true })).into_response()
}

async fn remove_pin(State(node): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(res) = check_id(&id) {
        return res;
    }

    lock(&node).pins.remove(&id);
    Json(json!({ "streamId": id, "isPinned": false })).into_response()
}

async fn chains() -> Json<Value> {
    Json(json!({ "supportedChains": [SUPPORTED_CHAIN] }))
}

async fn healthcheck() -> &'static str {
    HEALTHY
}
