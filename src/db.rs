// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "QuantMaster", "quantmaster"));

pub const DB_FILE: &str = "quantmaster.sqlite";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(DB_FILE))
}

/// Opens a connection with foreign keys enforced. Does not touch the schema.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    let conn = open(path)?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "schema ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Idempotent: creates missing tables and the settings row, never overwrites.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        id INTEGER PRIMARY KEY CHECK (id = 1),
        wechat_webhook_url TEXT NOT NULL DEFAULT '',
        monthly_provident_goal TEXT NOT NULL DEFAULT '5000',
        auto_provident_withdrawal TEXT NOT NULL DEFAULT '2000',
        monthly_cash_goal TEXT NOT NULL DEFAULT '10000',
        auto_fill_missing_months INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS monthly_records(
        id TEXT PRIMARY KEY,
        month TEXT NOT NULL, -- YYYY-MM, duplicates allowed
        record_date TEXT NOT NULL,
        target_provident TEXT NOT NULL DEFAULT '0',
        target_cash TEXT NOT NULL DEFAULT '0',
        income_hand TEXT NOT NULL DEFAULT '0',
        income_side TEXT NOT NULL DEFAULT '0',
        income_provident TEXT NOT NULL DEFAULT '0',
        exp_rent TEXT NOT NULL DEFAULT '0',
        exp_credit_card TEXT NOT NULL DEFAULT '0',
        exp_baitiao TEXT NOT NULL DEFAULT '0',
        exp_huabei TEXT NOT NULL DEFAULT '0',
        exp_daily TEXT NOT NULL DEFAULT '0',
        balance_provident TEXT NOT NULL DEFAULT '0',
        balance_investments TEXT NOT NULL DEFAULT '0',
        balance_liquid TEXT NOT NULL DEFAULT '0',
        balance_lent TEXT NOT NULL DEFAULT '0',
        note TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_monthly_records_month ON monthly_records(month);

    CREATE TABLE IF NOT EXISTS record_extra_items(
        id TEXT NOT NULL,
        record_id TEXT NOT NULL,
        category TEXT NOT NULL CHECK(category IN ('SIDE_INCOME','EXTRA_INCOME','EXTRA_EXPENSE')),
        name TEXT NOT NULL,
        value TEXT NOT NULL DEFAULT '0',
        PRIMARY KEY(record_id, category, id),
        FOREIGN KEY(record_id) REFERENCES monthly_records(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS liquid_asset_snapshots(
        id TEXT NOT NULL,
        record_id TEXT NOT NULL,
        name TEXT NOT NULL,
        amount TEXT NOT NULL DEFAULT '0',
        PRIMARY KEY(record_id, id),
        FOREIGN KEY(record_id) REFERENCES monthly_records(id) ON DELETE CASCADE
    );

    -- point-in-time copies of the ledger, independent of later loan edits
    CREATE TABLE IF NOT EXISTS monthly_loan_snapshots(
        id TEXT NOT NULL,
        record_id TEXT NOT NULL,
        borrower TEXT NOT NULL,
        date TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL DEFAULT '0',
        status TEXT NOT NULL DEFAULT 'UNPAID',
        repaid_amount TEXT NOT NULL DEFAULT '0',
        notes TEXT NOT NULL DEFAULT '',
        PRIMARY KEY(record_id, id),
        FOREIGN KEY(record_id) REFERENCES monthly_records(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS loans(
        id TEXT PRIMARY KEY,
        borrower TEXT NOT NULL,
        date TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL DEFAULT '0',
        status TEXT NOT NULL DEFAULT 'UNPAID',
        repaid_amount TEXT NOT NULL DEFAULT '0',
        notes TEXT NOT NULL DEFAULT ''
    );

    INSERT OR IGNORE INTO settings(id) VALUES (1);
    "#,
    )?;
    Ok(())
}
