// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Builds the nested `MonthlyRecord` view from a parent row and its four child
//! tables. One query per child collection per record; nothing is cached.

use super::loans::loan_from_row;
use super::row_decimal;
use crate::error::StoreResult;
use crate::models::{ExtraCategory, ExtraItem, LiquidAsset, Loan, MonthlyRecord};
use rusqlite::{params, Connection, Row};

pub(crate) const RECORD_COLUMNS: &str = "id, month, record_date, target_provident, target_cash,
    income_hand, income_side, income_provident,
    exp_rent, exp_credit_card, exp_baitiao, exp_huabei, exp_daily,
    balance_provident, balance_investments, balance_liquid, balance_lent, note";

/// Maps a `monthly_records` row selected with [`RECORD_COLUMNS`]. Child
/// collections are left empty.
pub(crate) fn record_from_row(r: &Row<'_>) -> rusqlite::Result<MonthlyRecord> {
    Ok(MonthlyRecord {
        id: r.get(0)?,
        month: r.get(1)?,
        record_date: r.get(2)?,
        target_provident: row_decimal(r, 3)?,
        target_cash: row_decimal(r, 4)?,
        income_hand: row_decimal(r, 5)?,
        income_side: row_decimal(r, 6)?,
        income_provident: row_decimal(r, 7)?,
        exp_rent: row_decimal(r, 8)?,
        exp_credit_card: row_decimal(r, 9)?,
        exp_baitiao: row_decimal(r, 10)?,
        exp_huabei: row_decimal(r, 11)?,
        exp_daily: row_decimal(r, 12)?,
        balance_provident: row_decimal(r, 13)?,
        balance_investments: row_decimal(r, 14)?,
        balance_liquid: row_decimal(r, 15)?,
        balance_lent: row_decimal(r, 16)?,
        note: r.get(17)?,
        side_income_detail: Vec::new(),
        extra_income: Vec::new(),
        extra_expenses: Vec::new(),
        liquid_assets: Vec::new(),
        lent_items: Vec::new(),
    })
}

fn extra_item_from_row(r: &Row<'_>) -> rusqlite::Result<ExtraItem> {
    Ok(ExtraItem {
        id: r.get(0)?,
        name: r.get(1)?,
        value: row_decimal(r, 2)?,
    })
}

fn liquid_asset_from_row(r: &Row<'_>) -> rusqlite::Result<LiquidAsset> {
    Ok(LiquidAsset {
        id: r.get(0)?,
        name: r.get(1)?,
        amount: row_decimal(r, 2)?,
    })
}

pub fn extra_items(
    conn: &Connection,
    record_id: &str,
    category: ExtraCategory,
) -> StoreResult<Vec<ExtraItem>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, value FROM record_extra_items
         WHERE record_id=?1 AND category=?2 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![record_id, category.as_str()], extra_item_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn liquid_assets(conn: &Connection, record_id: &str) -> StoreResult<Vec<LiquidAsset>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, amount FROM liquid_asset_snapshots WHERE record_id=?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![record_id], liquid_asset_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn loan_snapshots(conn: &Connection, record_id: &str) -> StoreResult<Vec<Loan>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, borrower, date, amount, status, repaid_amount, notes
         FROM monthly_loan_snapshots WHERE record_id=?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![record_id], loan_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Fills the child collections of a parent-only record.
pub fn assemble(conn: &Connection, mut rec: MonthlyRecord) -> StoreResult<MonthlyRecord> {
    for category in ExtraCategory::ALL {
        *rec.extras_mut(category) = extra_items(conn, &rec.id, category)?;
    }
    rec.liquid_assets = liquid_assets(conn, &rec.id)?;
    rec.lent_items = loan_snapshots(conn, &rec.id)?;
    Ok(rec)
}
