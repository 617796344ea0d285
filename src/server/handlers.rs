// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Loan, MonthlyRecord, Settings};
use crate::notify;
use crate::server::{ApiError, AppState};
use crate::store::{loans, records, settings};
use crate::summary::{summarize, MonthSummary};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Settings> {
    let s = state.with_conn(|conn| Ok(settings::get(conn)?)).await?;
    Ok(Json(s))
}

pub async fn put_settings(
    State(state): State<AppState>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = payload?;
    state
        .with_conn(move |conn| Ok(settings::replace(conn, &body)?))
        .await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn list_loans(State(state): State<AppState>) -> ApiResult<Vec<Loan>> {
    let all = state.with_conn(|conn| Ok(loans::list(conn)?)).await?;
    Ok(Json(all))
}

pub async fn replace_loans(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Loan>>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = payload?;
    state
        .with_conn(move |conn| Ok(loans::replace_all(conn, &body)?))
        .await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn list_records(State(state): State<AppState>) -> ApiResult<Vec<MonthlyRecord>> {
    let all = state.with_conn(|conn| Ok(records::list(conn)?)).await?;
    Ok(Json(all))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MonthlyRecord> {
    let rec = state.with_conn(move |conn| Ok(records::get(conn, &id)?)).await?;
    Ok(Json(rec))
}

pub async fn save_record(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyRecord>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(rec) = payload?;
    let id = rec.id.clone();
    let (current, rec) = state
        .with_conn(move |conn| {
            records::save(conn, &rec)?;
            let current = settings::get(conn)?;
            Ok((current, rec))
        })
        .await?;

    // Fire and forget; a webhook problem never fails the save.
    tokio::task::spawn_blocking(move || {
        if let Err(e) = notify::notify_record_saved(&current, &rec) {
            tracing::warn!(month = %rec.month, error = %format!("{:#}", e), "webhook notification failed");
        }
    });

    Ok(Json(json!({ "status": "saved", "id": id })))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    state
        .with_conn(move |conn| Ok(records::delete(conn, &id)?))
        .await?;
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn records_summary(State(state): State<AppState>) -> ApiResult<Vec<MonthSummary>> {
    let rows = state
        .with_conn(|conn| {
            let all = records::list(conn)?;
            let current = settings::get(conn)?;
            Ok(summarize(&all, &current))
        })
        .await?;
    Ok(Json(rows))
}
