//! Integration tests for `SeriesService` against an in-process store.
//!
//! A small axum router stands in for the real store, backed by an
//! in-memory record list. The stub enforces the store's contract at
//! the boundary: create payloads must not carry an `id`, updates are
//! addressed by the `id` in the PUT body, and unknown records answer
//! 404.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;

use showlog_client::{SeriesService, ServiceError, StoreTransport, TransportError};
use showlog_core::{Category, SeriesDraft};

// ---------------------------------------------------------------------------
// Stub store
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct StubStore {
    records: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn list_series(State(store): State<StubStore>) -> Json<serde_json::Value> {
    let records = store.records.lock().unwrap();
    Json(serde_json::Value::Array(records.clone()))
}

async fn get_series(
    State(store): State<StubStore>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let records = store.records.lock().unwrap();
    records
        .iter()
        .find(|r| r["id"].as_i64() == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_series(
    State(store): State<StubStore>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    // The store owns id assignment; clients must not send one.
    if body.get("id").is_some() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut records = store.records.lock().unwrap();
    let next_id = records
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let mut stored = body;
    stored["id"] = serde_json::json!(next_id);
    records.push(stored.clone());
    Ok(Json(stored))
}

async fn update_series(
    State(store): State<StubStore>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = body
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let mut records = store.records.lock().unwrap();
    let slot = records
        .iter_mut()
        .find(|r| r["id"].as_i64() == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_series(State(store): State<StubStore>, Path(id): Path<i64>) -> StatusCode {
    let mut records = store.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["id"].as_i64() != Some(id));
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Serve `router` on an ephemeral port, returning its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub store");
    let addr = listener.local_addr().expect("stub store address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub store server error");
    });
    format!("http://{addr}")
}

/// Spawn the full stub store seeded with `initial` records.
async fn spawn_store(initial: Vec<serde_json::Value>) -> String {
    let store = StubStore {
        records: Arc::new(Mutex::new(initial)),
    };
    let router = Router::new()
        .route(
            "/series",
            get(list_series).post(create_series).put(update_series),
        )
        .route("/series/{id}", get(get_series).delete(delete_series))
        .with_state(store);
    spawn(router).await
}

/// A URL nothing is listening on.
async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}")
}

fn service_for(url: &str) -> SeriesService {
    SeriesService::new(StoreTransport::new(url))
}

fn wire_record(id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "seasons": 5,
        "releaseDate": "2008-01-20",
        "director": "Vince Gilligan",
        "production": "Sony Pictures",
        "category": "Drama",
        "watchedAt": "2023-06-15",
    })
}

fn draft(title: &str) -> SeriesDraft {
    SeriesDraft {
        title: title.into(),
        season_count: 4,
        release_date: NaiveDate::from_ymd_opt(2016, 7, 15).unwrap(),
        director: "The Duffer Brothers".into(),
        production_company: "Netflix".into(),
        category: Category::ScienceFiction,
        watched_date: NaiveDate::from_ymd_opt(2023, 8, 20).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Test: list decodes wire records into the domain model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_decoded_records() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad"), wire_record(2, "The Wire")]).await;
    let service = service_for(&url);

    let all = service.list().await.expect("list should succeed");

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Breaking Bad");
    assert_eq!(all[0].season_count, 5);
    assert_eq!(all[0].production_company, "Sony Pictures");
    assert_eq!(
        all[0].watched_date,
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test: malformed collection elements are skipped, not fatal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_skips_malformed_records() {
    let url = spawn_store(vec![
        wire_record(1, "Breaking Bad"),
        serde_json::json!({ "id": 2, "title": "half a record" }),
    ])
    .await;
    let service = service_for(&url);

    let all = service.list().await.expect("list should still succeed");

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
}

// ---------------------------------------------------------------------------
// Test: a non-array collection body is treated as empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_tolerates_non_array_body() {
    let router = Router::new().route(
        "/series",
        get(|| async { Json(serde_json::json!({ "unexpected": "shape" })) }),
    );
    let url = spawn(router).await;
    let service = service_for(&url);

    let all = service.list().await.expect("list should succeed");
    assert!(all.is_empty());
}

// ---------------------------------------------------------------------------
// Test: get_by_id fetches one record; unknown ids classify as NotFound
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_by_id_returns_the_record() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad")]).await;
    let service = service_for(&url);

    let series = service.get_by_id(1).await.expect("record exists");
    assert_eq!(series.title, "Breaking Bad");
    assert_eq!(series.category, Category::Drama);
}

#[tokio::test]
async fn get_by_id_unknown_id_is_not_found() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad")]).await;
    let service = service_for(&url);

    let err = service.get_by_id(99).await.expect_err("no such record");

    assert_matches!(
        &err,
        ServiceError::Fetch {
            id: 99,
            source: TransportError::NotFound { .. }
        }
    );
    assert!(err.to_string().starts_with("Failed to fetch series 99: Not found:"));
}

// ---------------------------------------------------------------------------
// Test: create sends no id and returns the stored record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_id_and_echoes_record() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad"), wire_record(2, "The Wire")]).await;
    let service = service_for(&url);

    // The stub answers 400 if the payload carries an id, so success
    // here also proves the id was stripped.
    let created = service
        .create(draft("Stranger Things"))
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 3);
    assert_eq!(created.title, "Stranger Things");
    assert_eq!(created.category, Category::ScienceFiction);

    let all = service.list().await.expect("list after create");
    assert_eq!(all.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: update replaces the record via a collection-level PUT
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_the_stored_record() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad")]).await;
    let service = service_for(&url);

    let mut series = service.get_by_id(1).await.expect("record exists");
    series.title = "Breaking Bad (rewatch)".into();
    series.season_count = 6;

    let updated = service.update(series).await.expect("update should succeed");
    assert_eq!(updated.title, "Breaking Bad (rewatch)");

    let fetched = service.get_by_id(1).await.expect("record still exists");
    assert_eq!(fetched.title, "Breaking Bad (rewatch)");
    assert_eq!(fetched.season_count, 6);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad")]).await;
    let service = service_for(&url);

    let mut series = service.get_by_id(1).await.expect("record exists");
    series.id = 99;

    let err = service.update(series).await.expect_err("no such record");
    assert_matches!(
        &err,
        ServiceError::Update {
            id: 99,
            source: TransportError::NotFound { .. }
        }
    );
}

// ---------------------------------------------------------------------------
// Test: delete removes the record; a second delete is NotFound
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_the_record() {
    let url = spawn_store(vec![wire_record(1, "Breaking Bad"), wire_record(2, "The Wire")]).await;
    let service = service_for(&url);

    service.delete(1).await.expect("delete should succeed");

    let all = service.list().await.expect("list after delete");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 2);

    let err = service.delete(1).await.expect_err("already gone");
    assert_matches!(
        &err,
        ServiceError::Delete {
            id: 1,
            source: TransportError::NotFound { .. }
        }
    );
}

// ---------------------------------------------------------------------------
// Test: a 5xx answer is classified as a server fault
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_fault_is_classified() {
    let router = Router::new().route(
        "/series",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn(router).await;
    let service = service_for(&url);

    let err = service.list().await.expect_err("store is broken");

    assert!(err.transport().is_server_fault());
    assert!(err.to_string().contains("Store internal error (500)"));
    assert!(err.to_string().contains("boom"));
}

// ---------------------------------------------------------------------------
// Test: other non-success statuses are not server faults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_errors_are_not_server_faults() {
    let router = Router::new().route(
        "/series",
        get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
    );
    let url = spawn(router).await;
    let service = service_for(&url);

    let err = service.list().await.expect_err("store refuses");

    assert!(!err.transport().is_server_fault());
    assert_matches!(err.transport(), TransportError::Status { status: 418, .. });
    assert!(err.to_string().contains("Store error (418)"));
}

// ---------------------------------------------------------------------------
// Test: nothing listening classifies as Unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_store_is_classified() {
    let url = unreachable_url().await;
    let service = service_for(&url);

    let err = service.list().await.expect_err("nothing is listening");

    assert_matches!(err.transport(), TransportError::Unreachable { .. });
    assert!(err.to_string().starts_with("Failed to list series: Store unreachable at"));
}

// ---------------------------------------------------------------------------
// Test: a slow store surfaces as a request error, not a hang
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_timeout_surfaces_as_request_error() {
    let router = Router::new().route(
        "/series",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!([]))
        }),
    );
    let url = spawn(router).await;
    let service = SeriesService::new(StoreTransport::with_timeout(
        url.as_str(),
        Duration::from_millis(200),
    ));

    let err = service.list().await.expect_err("store is too slow");
    assert_matches!(err.transport(), TransportError::Request(e) if e.is_timeout());
}

// ---------------------------------------------------------------------------
// Test: the connection probe answers true/false and never fails
// ---------------------------------------------------------------------------

#[tokio::test]
async fn probe_reports_reachability() {
    let url = spawn_store(vec![]).await;
    assert!(service_for(&url).test_connection().await);

    let dead = unreachable_url().await;
    assert!(!service_for(&dead).test_connection().await);

    let broken = spawn(Router::new().route(
        "/series",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    assert!(!service_for(&broken).test_connection().await);
}
