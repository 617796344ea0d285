// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::server::{handlers, AppState};
use axum::{
    routing::{delete, get},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/loans", get(handlers::list_loans).post(handlers::replace_loans))
        .route(
            "/records",
            get(handlers::list_records).post(handlers::save_record),
        )
        .route("/records/:id", delete(handlers::delete_record).get(handlers::get_record))
        .route("/summary", get(handlers::records_summary))
}
