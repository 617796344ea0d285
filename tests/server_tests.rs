// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quantmaster::db;
use quantmaster::models::{Loan, MonthlyRecord, Settings};
use quantmaster::server::{handlers, AppState};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("api.sqlite");
    db::open_or_init(&path).unwrap();
    (dir, AppState::new(path))
}

fn record(id: &str, month: &str) -> MonthlyRecord {
    serde_json::from_value(json!({
        "id": id, "month": month, "recordDate": "2024-03-17T22:30:33",
        "targetProvident": 5000, "targetCash": 10000,
        "incomeHand": 16966, "incomeSide": 0, "incomeProvident": 3938,
        "expRent": 1750, "expCreditCard": 3093, "expBaiTiao": 753, "expHuabei": 0, "expDaily": 4038,
        "balanceProvident": 89038, "balanceInvestments": 50000, "balanceLiquid": 550000, "balanceLent": 20000,
        "liquidAssets": [{ "id": "l1", "name": "bank", "amount": 550000 }],
        "lentItems": [{ "id": "loan_1", "borrower": "Wang", "date": "2023-11-15",
                        "amount": 20000, "status": "UNPAID", "repaidAmount": 0 }]
    }))
    .unwrap()
}

#[tokio::test]
async fn settings_get_and_put() {
    let (_dir, state) = setup();
    let Json(s) = handlers::get_settings(State(state.clone())).await.unwrap();
    assert_eq!(s, Settings::default());

    let mut updated = s.clone();
    updated.monthly_cash_goal = Decimal::from(12000);
    updated.auto_fill_missing_months = true;
    let Json(body) = handlers::put_settings(State(state.clone()), Ok(Json(updated.clone())))
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let Json(s) = handlers::get_settings(State(state)).await.unwrap();
    assert_eq!(s, updated);
}

#[tokio::test]
async fn loans_post_replaces_ledger() {
    let (_dir, state) = setup();
    let first: Vec<Loan> = serde_json::from_value(json!([
        { "id": "L1", "borrower": "Wang", "date": "2023-11-15", "amount": 20000, "status": "UNPAID", "repaidAmount": 0 },
        { "id": "L2", "borrower": "Cousin", "date": "2023-12-01", "amount": 5000, "status": "PAID", "repaidAmount": 5000 }
    ]))
    .unwrap();
    handlers::replace_loans(State(state.clone()), Ok(Json(first)))
        .await
        .unwrap();

    let second: Vec<Loan> = serde_json::from_value(json!([
        { "id": "L3", "borrower": "Li", "amount": 800 }
    ]))
    .unwrap();
    let Json(body) = handlers::replace_loans(State(state.clone()), Ok(Json(second.clone())))
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let Json(all) = handlers::list_loans(State(state)).await.unwrap();
    assert_eq!(all, second);
    assert_eq!(all[0].status, "UNPAID");
}

#[tokio::test]
async fn records_save_list_delete() {
    let (_dir, state) = setup();
    for (id, month) in [("b", "2024-01"), ("a", "2023-12")] {
        let Json(body) = handlers::save_record(State(state.clone()), Ok(Json(record(id, month))))
            .await
            .unwrap();
        assert_eq!(body, json!({ "status": "saved", "id": id }));
    }

    let Json(all) = handlers::list_records(State(state.clone())).await.unwrap();
    let months: Vec<&str> = all.iter().map(|r| r.month.as_str()).collect();
    assert_eq!(months, ["2023-12", "2024-01"]);
    assert_eq!(all[0].lent_items.len(), 1);

    let Json(one) = handlers::get_record(State(state.clone()), Path("b".to_string()))
        .await
        .unwrap();
    assert_eq!(one, record("b", "2024-01"));

    let Json(body) = handlers::delete_record(State(state.clone()), Path("a".to_string()))
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "deleted" }));
    // idempotent
    handlers::delete_record(State(state.clone()), Path("a".to_string()))
        .await
        .unwrap();

    let Json(all) = handlers::list_records(State(state)).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn record_wire_format_is_camel_case() {
    let (_dir, state) = setup();
    handlers::save_record(State(state.clone()), Ok(Json(record("a", "2024-01"))))
        .await
        .unwrap();
    let Json(all) = handlers::list_records(State(state)).await.unwrap();
    let v = serde_json::to_value(&all).unwrap();
    assert_eq!(v[0]["expBaiTiao"], json!(753.0));
    assert_eq!(v[0]["lentItems"][0]["repaidAmount"], json!(0.0));
    assert_eq!(v[0]["sideIncomeDetail"], json!([]));
    assert!(v[0].get("exp_baitiao").is_none());
}

#[tokio::test]
async fn unknown_record_is_404() {
    let (_dir, state) = setup();
    let err = handlers::get_record(State(state), Path("nope".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_save_is_500_and_keeps_previous_state() {
    let (_dir, state) = setup();
    let good = record("a", "2024-01");
    handlers::save_record(State(state.clone()), Ok(Json(good.clone())))
        .await
        .unwrap();

    let mut bad = good.clone();
    bad.income_hand = Decimal::ZERO;
    bad.lent_items.push(bad.lent_items[0].clone());
    let err = handlers::save_record(State(state.clone()), Ok(Json(bad)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail.contains("UNIQUE"));

    let Json(one) = handlers::get_record(State(state), Path("a".to_string()))
        .await
        .unwrap();
    assert_eq!(one, good);
}

#[tokio::test]
async fn blank_id_is_422() {
    let (_dir, state) = setup();
    let err = handlers::save_record(State(state), Ok(Json(record("", "2024-01"))))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err.detail.contains("id"));
}

#[tokio::test]
async fn summary_uses_saved_records_and_settings() {
    let (_dir, state) = setup();
    handlers::save_record(State(state.clone()), Ok(Json(record("a", "2024-01"))))
        .await
        .unwrap();
    handlers::save_record(State(state.clone()), Ok(Json(record("b", "2024-02"))))
        .await
        .unwrap();
    let Json(rows) = handlers::records_summary(State(state)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].discrepancy, Decimal::ZERO);
    // income 20904, expense 9634
    assert_eq!(rows[1].total_income, Decimal::from(20904));
    assert_eq!(rows[1].total_expense, Decimal::from(9634));
    assert_eq!(rows[1].discrepancy, Decimal::from(9634 - 20904));
}


/// Serves the full router on an ephemeral port and returns its base URL.
async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, quantmaster::server::app(state))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn record_without_month_is_422_naming_the_field() {
    let (_dir, state) = setup();
    let base = spawn_app(state).await;

    let mut body = serde_json::to_value(record("a", "2024-01")).unwrap();
    body.as_object_mut().unwrap().remove("month");
    let resp = client()
        .post(format!("{}/records", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert!(v["detail"].as_str().unwrap().contains("month"), "{}", v);

    let all: Vec<MonthlyRecord> = client()
        .get(format!("{}/records", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn mistyped_amount_is_422_naming_the_field() {
    let (_dir, state) = setup();
    let base = spawn_app(state).await;

    let mut body = serde_json::to_value(record("a", "2024-01")).unwrap();
    body["incomeHand"] = json!("lots");
    let resp = client()
        .post(format!("{}/records", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert!(v["detail"].as_str().unwrap().contains("incomeHand"), "{}", v);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (_dir, state) = setup();
    let base = spawn_app(state).await;

    let resp = client()
        .put(format!("{}/settings", base))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"monthlyCashGoal\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert!(v["detail"].is_string());
}

#[tokio::test]
async fn api_prefix_serves_the_same_store() {
    let (_dir, state) = setup();
    let base = spawn_app(state).await;

    let resp = client()
        .post(format!("{}/api/records", base))
        .json(&record("a", "2024-01"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v, json!({ "status": "saved", "id": "a" }));

    let all: Vec<MonthlyRecord> = client()
        .get(format!("{}/records", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all, vec![record("a", "2024-01")]);

    let health = client().get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.status().as_u16(), 200);
}

#[tokio::test]
async fn record_named_summary_is_reachable_by_id() {
    let (_dir, state) = setup();
    let base = spawn_app(state).await;

    client()
        .post(format!("{}/records", base))
        .json(&record("summary", "2024-01"))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let one: MonthlyRecord = client()
        .get(format!("{}/records/summary", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(one.id, "summary");

    let rows: Vec<serde_json::Value> = client()
        .get(format!("{}/summary", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let resp = client()
        .delete(format!("{}/records/summary", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v, json!({ "status": "deleted" }));

    let gone = client()
        .get(format!("{}/records/summary", base))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}
