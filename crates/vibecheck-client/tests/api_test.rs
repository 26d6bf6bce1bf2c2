//! Integration tests for the API client against a loopback backend.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use vibecheck_client::{
    ApiClient, ClassRoster, FileSessionStore, StudentFlow, CODE_SESSION_KEY,
};
use vibecheck_common::{ClassId, Emotion, EventType, VibeCheckError};
use vibecheck_config::ApiConfig;

#[derive(Clone, Default)]
struct BackendState {
    hits: Arc<AtomicUsize>,
    renames: Arc<Mutex<Vec<(i64, String)>>>,
    registrations: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url,
        timeout_seconds: 5,
        max_retries: 2,
        session_cookie: None,
    })
    .unwrap()
}

async fn rename(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    body: String,
) -> StatusCode {
    state.renames.lock().unwrap().push((id, body));
    StatusCode::NO_CONTENT
}

async fn delete(Path(id): Path<i64>) -> StatusCode {
    if id == 99 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn release(Json(body): Json<Value>) -> Json<Value> {
    let class_name = body["nomeTurma"].as_str().unwrap_or_default();
    Json(json!({ "codigo": format!("IN-{class_name}") }))
}

async fn verify(Query(params): Query<HashMap<String, String>>) -> Json<bool> {
    Json(params.get("codigo").map(String::as_str) == Some("ABC123"))
}

async fn register(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    state.registrations.lock().unwrap().push(params);
    StatusCode::OK
}

async fn flaky_dashboard(State(state): State<BackendState>) -> Result<Json<Value>, StatusCode> {
    if state.hits.fetch_add(1, Ordering::SeqCst) == 0 {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!([
        { "data": "01/06/2024 10:00", "emocao": 1, "turma": "A", "tipo": "CHECKIN" },
        { "data": "03/06/2024 09:00", "emocao": 2, "turma": "B", "tipo": "CHECKOUT" }
    ])))
}

async fn forbidden_classes(State(state): State<BackendState>) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::FORBIDDEN
}

async fn authenticated_dashboard(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !cookie.contains("JSESSIONID=teacher-42") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        { "data": "01/06/2024 10:00", "emocao": 9, "turma": "A", "tipo": "CHECKIN" }
    ])))
}

fn backend_router(state: BackendState) -> Router {
    Router::new()
        .route("/logout", post(|| async { StatusCode::OK }))
        .route(
            "/api/codigo/turmas",
            get(|| async {
                Json(json!([
                    { "id": 0, "nome": "Sem turma" },
                    { "id": 3, "nome": "b" },
                    { "id": 1, "nome": "A" },
                    { "id": 2, "nome": "STRING" }
                ]))
            }),
        )
        .route("/api/codigo/liberar-checkin", post(release))
        .route("/api/turmas/:id", put(rename).delete(delete))
        .route("/api/registro/verificar-codigo", get(verify))
        .route("/api/registro/registrar", post(register))
        .with_state(state)
}

#[tokio::test]
async fn test_classes_drop_placeholders() {
    let base = spawn_backend(backend_router(BackendState::default())).await;
    let classes = client(base).classes().await.unwrap();

    let ids: Vec<ClassId> = classes.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![ClassId(3), ClassId(1)]);
}

#[tokio::test]
async fn test_release_code_posts_class_name() {
    let base = spawn_backend(backend_router(BackendState::default())).await;
    let code = client(base)
        .release_code(EventType::Checkin, "3A")
        .await
        .unwrap();

    assert_eq!(code, "IN-3A");
}

#[tokio::test]
async fn test_roster_rename_and_delete() {
    let state = BackendState::default();
    let base = spawn_backend(backend_router(state.clone())).await;

    let mut roster = ClassRoster::load(client(base)).await.unwrap();
    roster.rename(ClassId(3), " Biologia ").await.unwrap();
    assert_eq!(
        state.renames.lock().unwrap().as_slice(),
        &[(3, "Biologia".to_string())]
    );

    let pending = roster.request_delete(ClassId(1)).unwrap();
    pending.confirm(&mut roster).await.unwrap();
    assert_eq!(roster.classes().len(), 1);
    assert_eq!(roster.classes()[0].name, "Biologia");
}

#[tokio::test]
async fn test_delete_not_found_is_api_error() {
    let base = spawn_backend(backend_router(BackendState::default())).await;
    let err = client(base).delete_class(ClassId(99)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_student_flow_against_backend() {
    let state = BackendState::default();
    let base = spawn_backend(backend_router(state.clone())).await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    let flow = StudentFlow::new(client(base.clone()), FileSessionStore::new(&session_path));
    assert!(flow.enter_code("WRONG").await.is_err());
    flow.enter_code("ABC123").await.unwrap();

    // A later invocation picks the code up from disk.
    let flow = StudentFlow::new(client(base), FileSessionStore::new(&session_path));
    flow.submit_emotion(Emotion::Anxious).await.unwrap();

    let registrations = state.registrations.lock().unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0]["codigo"], "ABC123");
    assert_eq!(registrations[0]["emocao"], "8");
    drop(registrations);

    assert_eq!(flow.current_code().unwrap(), None);
    assert!(!std::fs::read_to_string(&session_path)
        .unwrap()
        .contains(CODE_SESSION_KEY));
}

#[tokio::test]
async fn test_get_retries_server_errors() {
    let state = BackendState::default();
    let router = Router::new()
        .route("/api/codigo/dashboard", get(flaky_dashboard))
        .with_state(state.clone());
    let base = spawn_backend(router).await;

    let records = client(base).dashboard_records().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].event_type, EventType::Checkout);
    assert_eq!(state.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_does_not_retry_client_errors() {
    let state = BackendState::default();
    let router = Router::new()
        .route("/api/codigo/turmas", get(forbidden_classes))
        .with_state(state.clone());
    let base = spawn_backend(router).await;

    let err = client(base).classes().await.unwrap_err();

    assert!(matches!(err, VibeCheckError::Api { status_code: Some(403), .. }));
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(&ApiConfig {
        base_url: format!("http://{addr}"),
        timeout_seconds: 2,
        max_retries: 0,
        session_cookie: None,
    })
    .unwrap()
    .logout()
    .await
    .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_session_cookie_reaches_backend() {
    let router = Router::new().route("/api/codigo/dashboard", get(authenticated_dashboard));
    let base = spawn_backend(router).await;

    let anonymous = client(base.clone()).dashboard_records().await.unwrap_err();
    assert_eq!(anonymous.status_code(), Some(401));

    let records = ApiClient::new(&ApiConfig {
        base_url: base,
        timeout_seconds: 5,
        max_retries: 0,
        session_cookie: Some("JSESSIONID=teacher-42".to_string()),
    })
    .unwrap()
    .dashboard_records()
    .await
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].emotion_code, 9);
}
