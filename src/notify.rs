// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{MonthlyRecord, Settings};
use crate::utils::http_client;
use anyhow::{Context, Result};
use serde_json::{json, Value};

/// WeChat Work robot text message announcing a saved month.
pub fn record_saved_message(rec: &MonthlyRecord) -> Value {
    json!({
        "msgtype": "text",
        "text": {
            "content": format!(
                "Saved record for {}. Total assets: {:.2}",
                rec.month,
                rec.total_assets()
            )
        }
    })
}

/// Posts the save notification when a webhook is configured. Returns whether
/// anything was sent.
pub fn notify_record_saved(settings: &Settings, rec: &MonthlyRecord) -> Result<bool> {
    let url = settings.wechat_webhook_url.trim();
    if url.is_empty() {
        return Ok(false);
    }
    let resp = http_client()?
        .post(url)
        .json(&record_saved_message(rec))
        .send()
        .with_context(|| format!("POST webhook for {}", rec.month))?;
    resp.error_for_status()
        .with_context(|| format!("Webhook rejected notification for {}", rec.month))?;
    tracing::info!(month = %rec.month, "webhook notified");
    Ok(true)
}
