use super::*;
use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use shared::domain::{BpmnDiagram, Side};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    sync_calls: Arc<Mutex<Vec<(i64, String)>>>,
    created: Arc<Mutex<Vec<Value>>>,
    saved: Arc<Mutex<Vec<Roundtrip>>>,
}

fn sample_roundtrip(id: i64, name: &str) -> Roundtrip {
    Roundtrip {
        id: RoundtripId(id),
        name: name.to_string(),
        last_sync: None,
        left_hand_side: None,
        right_hand_side: None,
    }
}

async fn handle_current_user() -> Json<Value> {
    Json(json!({ "name": "walter" }))
}

async fn handle_list() -> Json<Vec<Roundtrip>> {
    Json(vec![sample_roundtrip(1, "Invoice"), sample_roundtrip(2, "Order")])
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Json<Roundtrip> {
    let name = payload["name"].as_str().unwrap_or_default().to_string();
    state.created.lock().await.push(payload);
    Json(sample_roundtrip(42, &name))
}

async fn handle_details(Path(id): Path<i64>) -> Result<Json<Roundtrip>, StatusCode> {
    if id == 999 {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(sample_roundtrip(id, "Invoice")))
}

async fn handle_save(
    State(state): State<ServerState>,
    Json(payload): Json<Roundtrip>,
) -> Json<Roundtrip> {
    state.saved.lock().await.push(payload.clone());
    Json(payload)
}

async fn handle_sync(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Roundtrip>, StatusCode> {
    let mode = query.get("syncMode").cloned().unwrap_or_default();
    state.sync_calls.lock().await.push((id, mode));
    if id == 13 {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let mut synced = sample_roundtrip(id, "Invoice");
    synced.last_sync = Some("2024-01-01T00:00:00Z".parse().expect("timestamp"));
    Ok(Json(synced))
}

async fn handle_name_check(Query(query): Query<HashMap<String, String>>) -> &'static str {
    match query.get("name").map(String::as_str) {
        Some("Invoice") => "false",
        _ => "true",
    }
}

async fn handle_modeler_names() -> Json<Vec<&'static str>> {
    Json(vec!["Signavio", "fox designer", "Yaoqiang"])
}

async fn spawn_cycle_server() -> Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/cycle/currentUser", get(handle_current_user))
        .route(
            "/cycle/secured/resource/roundtrip",
            get(handle_list).post(handle_create),
        )
        .route(
            "/cycle/secured/resource/roundtrip/isNameValid",
            get(handle_name_check),
        )
        .route(
            "/cycle/secured/resource/roundtrip/:id/details",
            get(handle_details).post(handle_save),
        )
        .route("/cycle/secured/resource/roundtrip/:id/sync", post(handle_sync))
        .route(
            "/cycle/secured/resource/diagram/modelerNames",
            get(handle_modeler_names),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/cycle"), state))
}

#[tokio::test]
async fn fetches_current_user_beneath_context_path() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let user = client.current_user().await.expect("user");
    assert_eq!(user.name, "walter");
}

#[tokio::test]
async fn lists_roundtrips() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let roundtrips = client.list_roundtrips().await.expect("list");
    let names: Vec<_> = roundtrips.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Invoice", "Order"]);
}

#[tokio::test]
async fn sync_posts_mode_as_query_parameter() {
    let (base_url, state) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let synced = client
        .sync_roundtrip(RoundtripId(7), SyncMode::RightToLeft)
        .await
        .expect("sync");

    assert_eq!(synced.id, RoundtripId(7));
    assert!(synced.last_sync.is_some());
    assert_eq!(
        state.sync_calls.lock().await.as_slice(),
        &[(7, "RIGHT_TO_LEFT".to_string())]
    );
}

#[tokio::test]
async fn sync_server_error_surfaces_status() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let err = client
        .sync_roundtrip(RoundtripId(13), SyncMode::LeftToRight)
        .await
        .expect_err("sync must fail");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn details_bad_request_is_flagged() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let err = client
        .roundtrip_details(RoundtripId(999))
        .await
        .expect_err("details must fail");
    assert!(err.is_bad_request());

    let found = client
        .roundtrip_details(RoundtripId(4))
        .await
        .expect("details");
    assert_eq!(found.id, RoundtripId(4));
}

#[tokio::test]
async fn name_check_reads_plain_text_answer() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    assert!(!client.is_name_valid("Invoice").await.expect("check"));
    assert!(client.is_name_valid("Fresh name").await.expect("check"));
}

#[tokio::test]
async fn create_posts_name_payload() {
    let (base_url, state) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let created = client.create_roundtrip("Shipping").await.expect("create");
    assert_eq!(created.id, RoundtripId(42));
    assert_eq!(created.name, "Shipping");
    assert_eq!(
        state.created.lock().await.as_slice(),
        &[json!({ "name": "Shipping" })]
    );
}

#[tokio::test]
async fn save_posts_full_roundtrip() {
    let (base_url, state) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let mut roundtrip = sample_roundtrip(5, "Invoice");
    roundtrip.set_diagram(
        Side::RightHandSide,
        BpmnDiagram {
            modeler: Some("fox designer".to_string()),
            ..BpmnDiagram::default()
        },
    );
    let saved = client.save_roundtrip(&roundtrip).await.expect("save");

    assert_eq!(saved, roundtrip);
    assert_eq!(state.saved.lock().await.as_slice(), &[roundtrip]);
}

#[tokio::test]
async fn fetches_modeler_names() {
    let (base_url, _) = spawn_cycle_server().await.expect("server");
    let client = CycleClient::connect(&base_url).expect("client");

    let names = client.modeler_names().await.expect("names");
    assert_eq!(names, ["Signavio", "fox designer", "Yaoqiang"]);
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = CycleClient::connect(&format!("http://{addr}/cycle")).expect("client");
    assert!(matches!(
        client.current_user().await,
        Err(RequestFailure::Transport(_))
    ));
}
