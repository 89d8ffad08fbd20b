//! End-to-end CRUD against PostgreSQL; each test uses its own schema.
//! Ignored by default: `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use axum::http::{Method, StatusCode};
use chrono::DateTime;
use common::{create_horse, get, send, TestDb};
use serde_json::{json, Value};
use std::collections::HashSet;
use uuid::Uuid;

fn names(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect()
}

fn radii(page: &Value) -> Vec<f64> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["radius"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn create_then_read_round_trips() {
    let db = TestDb::setup().await;
    let created = create_horse(&db.router, "Bucephalus", 2.5, "black").await;
    assert_eq!(created["name"], "Bucephalus");
    assert_eq!(created["radius"], 2.5);
    assert_eq!(created["color"], "black");
    assert_eq!(created["created_at"], created["updated_at"]);
    DateTime::parse_from_rfc3339(created["created_at"].as_str().unwrap()).unwrap();

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = get(&db.router, &format!("/api/v1/horses/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn created_ids_are_distinct() {
    let db = TestDb::setup().await;
    let mut ids = HashSet::new();
    for i in 0..5 {
        let horse = create_horse(&db.router, &format!("Horse {}", i), 1.0, "grey").await;
        ids.insert(horse["id"].as_str().unwrap().to_string());
    }
    assert_eq!(ids.len(), 5);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn missing_horse_is_not_found() {
    let db = TestDb::setup().await;
    let uri = format!("/api/v1/horses/{}", Uuid::now_v7());
    let (status, body) = get(&db.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, _) = send(&db.router, Method::PATCH, &uri, Some(json!({"color": "red"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&db.router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn partial_update_touches_only_given_fields() {
    let db = TestDb::setup().await;
    let created = create_horse(&db.router, "Rocinante", 1.25, "white").await;
    let uri = format!("/api/v1/horses/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&db.router, Method::PATCH, &uri, Some(json!({"radius": 3.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["radius"], 3.0);
    assert_eq!(updated["name"], "Rocinante");
    assert_eq!(updated["color"], "white");
    assert_eq!(updated["created_at"], created["created_at"]);

    let before = DateTime::parse_from_rfc3339(created["updated_at"].as_str().unwrap()).unwrap();
    let after = DateTime::parse_from_rfc3339(updated["updated_at"].as_str().unwrap()).unwrap();
    assert!(after > before);

    let (status, again) = send(&db.router, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let latest = DateTime::parse_from_rfc3339(again["updated_at"].as_str().unwrap()).unwrap();
    assert!(latest > after);
    assert_eq!(again["radius"], 3.0);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn delete_removes_the_horse() {
    let db = TestDb::setup().await;
    let created = create_horse(&db.router, "Pegasus", 4.0, "white").await;
    let uri = format!("/api/v1/horses/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&db.router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = get(&db.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&db.router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn total_ignores_paging() {
    let db = TestDb::setup().await;
    for i in 0..7 {
        create_horse(&db.router, &format!("Horse {}", i), 1.0 + i as f64, "bay").await;
    }
    let (status, first) = get(&db.router, "/api/v1/horses/?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total"], 7);
    assert_eq!(first["items"].as_array().unwrap().len(), 3);
    assert_eq!(first["skip"], 0);
    assert_eq!(first["limit"], 3);

    let (_, last) = get(&db.router, "/api/v1/horses/?skip=6&limit=3").await;
    assert_eq!(last["total"], 7);
    assert_eq!(last["items"].as_array().unwrap().len(), 1);

    let (_, beyond) = get(&db.router, "/api/v1/horses/?skip=50").await;
    assert_eq!(beyond["total"], 7);
    assert!(beyond["items"].as_array().unwrap().is_empty());
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn default_order_is_newest_first() {
    let db = TestDb::setup().await;
    for name in ["first", "second", "third"] {
        create_horse(&db.router, name, 1.0, "bay").await;
    }
    let (_, page) = get(&db.router, "/api/v1/horses").await;
    assert_eq!(names(&page), vec!["third", "second", "first"]);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn sorts_by_radius_both_ways() {
    let db = TestDb::setup().await;
    for (name, radius) in [("c", 3.0), ("a", 1.0), ("b", 2.0)] {
        create_horse(&db.router, name, radius, "bay").await;
    }
    let (_, asc) = get(&db.router, "/api/v1/horses/?sort_by=radius&sort_order=asc").await;
    assert_eq!(radii(&asc), vec![1.0, 2.0, 3.0]);
    let (_, desc) = get(&db.router, "/api/v1/horses/?sort_by=radius").await;
    assert_eq!(radii(&desc), vec![3.0, 2.0, 1.0]);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn filters_combine() {
    let db = TestDb::setup().await;
    create_horse(&db.router, "Буцефал", 1.0, "black").await;
    create_horse(&db.router, "Silver", 2.0, "white").await;
    create_horse(&db.router, "Silverado", 5.0, "grey").await;
    create_horse(&db.router, "100% Horse", 3.0, "bay").await;

    let (_, page) = get(&db.router, "/api/v1/horses/?name=%D0%B1%D1%83%D1%86").await;
    assert_eq!(names(&page), vec!["Буцефал"]);

    let (_, page) = get(
        &db.router,
        "/api/v1/horses/?name=SILVER&min_radius=1.5&max_radius=4&sort_by=name&sort_order=asc",
    )
    .await;
    assert_eq!(names(&page), vec!["Silver"]);
    assert_eq!(page["total"], 1);

    let (_, page) = get(&db.router, "/api/v1/horses/?name=%25").await;
    assert_eq!(names(&page), vec!["100% Horse"]);

    let (_, page) = get(&db.router, "/api/v1/horses/?min_radius=2&max_radius=2").await;
    assert_eq!(names(&page), vec!["Silver"]);

    let (status, page) = get(&db.router, "/api/v1/horses/?min_radius=2&max_radius=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
    assert!(page["items"].as_array().unwrap().is_empty());
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn ready_sees_the_database() {
    let db = TestDb::setup().await;
    let (status, body) = get(&db.router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));
    db.teardown().await;
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn migrations_are_idempotent() {
    let db = TestDb::setup().await;
    let applied = spherical_horses::apply_migrations(&db.pool).await.unwrap();
    assert!(applied.is_empty());
    db.teardown().await;
}
