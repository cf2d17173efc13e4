// reserve-client/tests/owner_console.rs
// Owner console: mutate, then reload from the service

use chrono::NaiveDate;
use reserve_client::models::{ReservationFilter, ReservationStatus};
use reserve_client::{ClientConfig, ClientError, ErrorKind, OwnerConsole, ReserveClient};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PANEL: &str = "/api/restaurants/3/panel";

async fn signed_in(server: &MockServer, roles: &[&str]) -> ReserveClient {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "email": "owner@example.com", "roles": roles
        })))
        .mount(server)
        .await;
    let client = ReserveClient::new(ClientConfig::new(format!("{}/api", server.uri()))).unwrap();
    client.login("owner@example.com", "secret").await.unwrap();
    client
}

fn tables() -> Value {
    json!([
        {"id": 5, "name": "Okno", "seats": 4, "isActive": true, "restaurantId": 3},
        {"id": 6, "name": null, "seats": 2, "isActive": false, "restaurantId": 3}
    ])
}

fn reservation(status: &str, table_ids: &[i64]) -> Value {
    let tables: Vec<Value> = table_ids
        .iter()
        .map(|id| json!({"table": {"id": id, "name": null, "seats": 4}}))
        .collect();
    json!([{
        "id": 9, "date": "2025-01-20T00:00:00.000Z", "time": "18:00", "people": 4,
        "durationMinutes": 90, "status": status,
        "user": {"id": 7, "email": "guest@example.com"}, "tables": tables
    }])
}

async fn mount_snapshot(server: &MockServer, reservations: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/tables")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tables()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/reservations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(reservations))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_assign_then_unassign_is_visible_after_reload() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;

    mount_snapshot(&server, reservation("PENDING", &[])).await;
    let mut console = OwnerConsole::open(client, 3).await.unwrap();
    assert!(console.reservation(9).unwrap().tables.is_empty());
    assert_eq!(console.assignable_tables().len(), 1);

    server.reset().await;
    Mock::given(method("POST"))
        .and(path(format!("{PANEL}/reservations/9/assign-table")))
        .and(body_json(json!({"tableId": 5})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_snapshot(&server, reservation("PENDING", &[5])).await;
    console.assign_table(9, 5).await.unwrap();
    assert!(console.reservation(9).unwrap().has_table(5));

    server.reset().await;
    Mock::given(method("POST"))
        .and(path(format!("{PANEL}/reservations/9/unassign-table")))
        .and(body_json(json!({"tableId": 5})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_snapshot(&server, reservation("PENDING", &[])).await;
    console.unassign_table(9, 5).await.unwrap();
    assert!(!console.reservation(9).unwrap().has_table(5));
}

#[tokio::test]
async fn test_inactive_table_is_not_offered() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;
    mount_snapshot(&server, reservation("PENDING", &[])).await;
    Mock::given(method("POST"))
        .and(path(format!("{PANEL}/reservations/9/assign-table")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut console = OwnerConsole::open(client, 3).await.unwrap();
    let err = console.assign_table(9, 6).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAllowed(_)));
}

#[tokio::test]
async fn test_failed_mutation_keeps_snapshot() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;
    mount_snapshot(&server, reservation("PENDING", &[])).await;
    Mock::given(method("POST"))
        .and(path(format!("{PANEL}/reservations/9/assign-table")))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Table is taken"})),
        )
        .mount(&server)
        .await;

    let mut console = OwnerConsole::open(client, 3).await.unwrap();
    let err = console.assign_table(9, 5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(console.reservation(9).unwrap().tables.is_empty());
    assert_eq!(console.tables().len(), 2);
}

#[tokio::test]
async fn test_status_changes_follow_the_state_machine() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;
    mount_snapshot(&server, reservation("PENDING", &[])).await;
    let mut console = OwnerConsole::open(client, 3).await.unwrap();

    server.reset().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PANEL}/reservations/9/status")))
        .and(body_json(json!({"status": "CONFIRMED"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_snapshot(&server, reservation("CONFIRMED", &[])).await;
    console
        .set_status(9, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(console.reservation(9).unwrap().status, ReservationStatus::Confirmed);

    // CONFIRMED cannot go back to PENDING or be rejected
    for next in [ReservationStatus::Pending, ReservationStatus::Rejected] {
        let err = console.set_status(9, next).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAllowed(_)));
    }
}

#[tokio::test]
async fn test_filter_is_sent_as_query() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/tables")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tables()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/reservations")))
        .and(query_param("date", "2025-01-20"))
        .and(query_param("status", "PENDING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reservation("PENDING", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let mut console = OwnerConsole::new(client, 3);
    let filter = ReservationFilter::on(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
        .with_status(ReservationStatus::Pending);
    console.apply_filter(filter).await.unwrap();
    assert_eq!(console.reservations().len(), 1);
}

#[tokio::test]
async fn test_partial_load_applies_nothing() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["RESTAURANT_OWNER"]).await;
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/tables")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PANEL}/reservations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(reservation("PENDING", &[])))
        .mount(&server)
        .await;

    let mut console = OwnerConsole::new(client, 3);
    assert!(console.reload().await.is_err());
    assert!(console.reservations().is_empty());
    assert!(console.tables().is_empty());
}

#[tokio::test]
async fn test_guest_is_refused() {
    let server = MockServer::start().await;
    let client = signed_in(&server, &["USER"]).await;
    let err = OwnerConsole::open(client, 3).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}
