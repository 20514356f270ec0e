//! API Integration Tests
//!
//! Require a Postgres instance at DATABASE_URL; skipped when it is unset.
//! Every test works in its own freshly minted session, so tests can share
//! the database and run in parallel.

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

mod common;

fn amount_of(value: &Value) -> f64 {
    value["amount"].as_f64().expect("amount should be a number")
}

#[tokio::test]
async fn test_create_transaction_sets_session_cookie() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(
            json!({ "title": "New Transaction", "amount": 5000, "type": "credit" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("session cookie should be set")
        .to_string();
    assert!(set_cookie.starts_with("sessionId="));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_transactions() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(
            json!({ "title": "New Transaction", "amount": 5000, "type": "credit" }),
            None,
        ),
    )
    .await;
    let cookie = common::session_cookie(&response).expect("session cookie");

    let response = common::send(&app, common::get_request("/transactions", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    let transactions = json["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["title"], "New Transaction");
    assert_eq!(amount_of(&transactions[0]), 5000.0);
    assert!(transactions[0].get("session_id").is_none());
}

#[tokio::test]
async fn test_existing_session_is_reused_and_order_kept() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(json!({ "title": "First", "amount": 10, "type": "credit" }), None),
    )
    .await;
    let cookie = common::session_cookie(&response).unwrap();

    for (title, amount, kind) in [("Second", 20, "debit"), ("Third", 30, "credit")] {
        let response = common::send(
            &app,
            common::create_request(
                json!({ "title": title, "amount": amount, "type": kind }),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(common::session_cookie(&response).is_none());
    }

    let response = common::send(&app, common::get_request("/transactions", Some(&cookie))).await;
    let json = common::body_json(response).await;
    let transactions = json["transactions"].as_array().unwrap();

    let titles: Vec<&str> = transactions
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(amount_of(&transactions[1]), -20.0);
}

#[tokio::test]
async fn test_get_specific_transaction() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(
            json!({ "title": "New Transaction", "amount": 5000, "type": "credit" }),
            None,
        ),
    )
    .await;
    let cookie = common::session_cookie(&response).unwrap();

    let response = common::send(&app, common::get_request("/transactions", Some(&cookie))).await;
    let json = common::body_json(response).await;
    let id = json["transactions"][0]["id"].as_str().unwrap().to_string();

    let response = common::send(
        &app,
        common::get_request(&format!("/transactions/{}", id), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["transaction"]["id"], id.as_str());
    assert_eq!(json["transaction"]["title"], "New Transaction");
    assert_eq!(amount_of(&json["transaction"]), 5000.0);
}

#[tokio::test]
async fn test_other_session_cannot_read_transaction() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(json!({ "title": "Private", "amount": 99, "type": "credit" }), None),
    )
    .await;
    let owner = common::session_cookie(&response).unwrap();

    let response = common::send(&app, common::get_request("/transactions", Some(&owner))).await;
    let json = common::body_json(response).await;
    let id = json["transactions"][0]["id"].as_str().unwrap().to_string();

    let stranger = format!("sessionId={}", uuid::Uuid::new_v4());
    let uri = format!("/transactions/{}", id);

    let response = common::send(&app, common::get_request(&uri, Some(&stranger))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert!(json.get("transaction").is_none());

    let response = common::send(&app, common::get_request("/transactions", Some(&stranger))).await;
    let json = common::body_json(response).await;
    assert_eq!(json["transactions"], json!([]));
}

#[tokio::test]
async fn test_unknown_id_returns_empty_payload() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let cookie = format!("sessionId={}", uuid::Uuid::new_v4());
    let uri = format!("/transactions/{}", uuid::Uuid::new_v4());

    let response = common::send(&app, common::get_request(&uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({}));
}

#[tokio::test]
async fn test_summary() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let response = common::send(
        &app,
        common::create_request(
            json!({ "title": "Credit Transaction", "amount": 5000, "type": "credit" }),
            None,
        ),
    )
    .await;
    let cookie = common::session_cookie(&response).unwrap();

    let response = common::send(
        &app,
        common::create_request(
            json!({ "title": "Debit Transaction", "amount": 2000, "type": "debit" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = common::send(
        &app,
        common::get_request("/transactions/summary", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(amount_of(&json["summary"]), 3000.0);
}

#[tokio::test]
async fn test_summary_without_transactions_is_zero() {
    let Some(pool) = common::setup_test_db().await else { return };
    let app = common::app(pool);

    let cookie = format!("sessionId={}", uuid::Uuid::new_v4());
    let response = common::send(
        &app,
        common::get_request("/transactions/summary", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(amount_of(&json["summary"]), 0.0);
}
