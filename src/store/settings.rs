// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::row_decimal;
use crate::error::{StoreError, StoreResult};
use crate::models::Settings;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn settings_from_row(r: &Row<'_>) -> rusqlite::Result<Settings> {
    Ok(Settings {
        wechat_webhook_url: r.get(0)?,
        monthly_provident_goal: row_decimal(r, 1)?,
        auto_provident_withdrawal: row_decimal(r, 2)?,
        monthly_cash_goal: row_decimal(r, 3)?,
        auto_fill_missing_months: r.get::<_, i64>(4)? != 0,
    })
}

pub fn get(conn: &Connection) -> StoreResult<Settings> {
    conn.query_row(
        "SELECT wechat_webhook_url, monthly_provident_goal, auto_provident_withdrawal,
                monthly_cash_goal, auto_fill_missing_months
         FROM settings WHERE id=1",
        [],
        settings_from_row,
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found("settings row missing; database not initialized"))
}

/// Overwrites every field of the singleton row. Values are stored as given.
pub fn replace(conn: &Connection, s: &Settings) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE settings SET
            wechat_webhook_url=?1,
            monthly_provident_goal=?2,
            auto_provident_withdrawal=?3,
            monthly_cash_goal=?4,
            auto_fill_missing_months=?5
         WHERE id=1",
        params![
            s.wechat_webhook_url,
            s.monthly_provident_goal.to_string(),
            s.auto_provident_withdrawal.to_string(),
            s.monthly_cash_goal.to_string(),
            s.auto_fill_missing_months as i64,
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::not_found(
            "settings row missing; database not initialized",
        ));
    }
    tracing::info!(auto_fill = s.auto_fill_missing_months, "settings replaced");
    Ok(())
}
