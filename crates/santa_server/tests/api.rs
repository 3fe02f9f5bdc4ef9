//! Router-level tests for the assignment API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use santa_core::{AssignmentBackend, AssignmentStore, DrawConfig, FileBackend, MemoryBackend};
use santa_server::{AssignmentServer, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn memory_server() -> AssignmentServer {
    let backend: Box<dyn AssignmentBackend> = Box::new(MemoryBackend::new());
    let store = Arc::new(AssignmentStore::new(backend, DrawConfig::default()));
    AssignmentServer::with_store(ServerConfig::default(), store)
}

async fn send(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, body)
}

#[tokio::test]
async fn health_check() {
    let router = memory_server().router();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn get_on_empty_server_is_no_content() {
    let router = memory_server().router();
    let (status, body) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    // reading twice still does not create anything
    let (status, _) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reset_always_returns_a_fresh_assignment() {
    let router = memory_server().router();

    let (status, first) = send(&router, "POST", "/api/assignments/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let first = first.unwrap();
    assert!(first["message"].is_string());

    let (status, second) = send(&router, "POST", "/api/assignments/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let second = second.unwrap();
    assert_ne!(first["assignments"], second["assignments"]);
    assert_eq!(second["repeated"], false);

    let (status, current) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current.unwrap()["assignments"], second["assignments"]);
}

#[tokio::test]
async fn import_lifecycle() {
    let router = memory_server().router();
    let candidate = json!({"ibo": "ahmet", "adnan": "ibo", "ahmet": "adnan"});

    let (status, body) = send(
        &router,
        "POST",
        "/api/assignments/import",
        Some(json!({ "assignments": candidate })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap()["assignments"], candidate);

    let other = json!({"ibo": "adnan", "adnan": "ahmet", "ahmet": "ibo"});
    let (status, body) = send(
        &router,
        "POST",
        "/api/assignments/import",
        Some(json!({ "assignments": other })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let body = body.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(body["assignments"], candidate);
}

#[tokio::test]
async fn import_validation_failures_are_bad_requests() {
    let router = memory_server().router();

    let cases = [
        json!({}),
        json!({"assignments": "ibo"}),
        json!({"assignments": {"ibo": "adnan", "adnan": "ibo"}}),
        json!({"assignments": {"ibo": "ahmet", "adnan": "ibo", "ahmet": "ahmet"}}),
        json!({"assignments": {"ibo": "ibo", "adnan": "ahmet", "ahmet": "adnan"}}),
    ];
    for case in cases {
        let (status, body) = send(&router, "POST", "/api/assignments/import", Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.unwrap()["error"].is_string());
    }

    let (status, _) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let router = memory_server().router();
    let (status, body) = send(&router, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.unwrap()["error"].as_str().unwrap().contains("/api/nope"));
}

#[tokio::test]
async fn file_backed_server_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.json");

    let router = AssignmentServer::new(ServerConfig::default().with_data_file(&path)).router();
    let (_, reset) = send(&router, "POST", "/api/assignments/reset", None).await;
    let assignments = reset.unwrap()["assignments"].clone();

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, assignments);
    assert!(FileBackend::new(&path).load().unwrap().is_some());

    let router = AssignmentServer::new(ServerConfig::default().with_data_file(&path)).router();
    let (status, body) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["assignments"], assignments);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_resets_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.json");
    let router = AssignmentServer::new(ServerConfig::default().with_data_file(&path)).router();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let router = router.clone();
            tokio::spawn(async move {
                send(&router, "POST", "/api/assignments/reset", None).await.0
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let (status, body) = send(&router, "GET", "/api/assignments", None).await;
    assert_eq!(status, StatusCode::OK);
    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(body.unwrap()["assignments"], on_disk);
}
