// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::assembly::{assemble, record_from_row, RECORD_COLUMNS};
use crate::error::{StoreError, StoreResult};
use crate::models::{ExtraCategory, MonthlyRecord};
use rusqlite::{params, Connection, OptionalExtension};

/// Every record with its children, ordered by `month` ascending (text order).
pub fn list(conn: &Connection) -> StoreResult<Vec<MonthlyRecord>> {
    let parents = {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM monthly_records ORDER BY month ASC, rowid ASC",
            RECORD_COLUMNS
        ))?;
        let rows = stmt.query_map([], record_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };
    let mut out = Vec::with_capacity(parents.len());
    for p in parents {
        out.push(assemble(conn, p)?);
    }
    tracing::debug!(count = out.len(), "assembled monthly records");
    Ok(out)
}

pub fn get(conn: &Connection, id: &str) -> StoreResult<MonthlyRecord> {
    let parent = conn
        .query_row(
            &format!("SELECT {} FROM monthly_records WHERE id=?1", RECORD_COLUMNS),
            params![id],
            record_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found(format!("record '{}'", id)))?;
    assemble(conn, parent)
}

/// Records for one month. Month keys are not unique, so this may return more
/// than one.
pub fn find_by_month(conn: &Connection, month: &str) -> StoreResult<Vec<MonthlyRecord>> {
    let parents = {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM monthly_records WHERE month=?1 ORDER BY rowid",
            RECORD_COLUMNS
        ))?;
        let rows = stmt.query_map(params![month], record_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };
    parents.into_iter().map(|p| assemble(conn, p)).collect()
}

/// Rejects ids that cannot identify a row. Field presence and types are
/// already enforced by deserialization.
pub fn validate(rec: &MonthlyRecord) -> StoreResult<()> {
    if rec.id.trim().is_empty() {
        return Err(StoreError::validation("id: must not be empty"));
    }
    for category in ExtraCategory::ALL {
        if let Some(pos) = rec.extras(category).iter().position(|i| i.id.trim().is_empty()) {
            return Err(StoreError::validation(format!(
                "{}[{}].id: must not be empty",
                category.field_name(),
                pos
            )));
        }
    }
    if let Some(pos) = rec.liquid_assets.iter().position(|a| a.id.trim().is_empty()) {
        return Err(StoreError::validation(format!(
            "liquidAssets[{}].id: must not be empty",
            pos
        )));
    }
    if let Some(pos) = rec.lent_items.iter().position(|l| l.id.trim().is_empty()) {
        return Err(StoreError::validation(format!(
            "lentItems[{}].id: must not be empty",
            pos
        )));
    }
    Ok(())
}

/// Upserts the parent row and replaces all four child collections in one
/// transaction. On any failure nothing is applied.
pub fn save(conn: &mut Connection, rec: &MonthlyRecord) -> StoreResult<()> {
    validate(rec)?;
    let tx = conn.transaction()?;
    if let Err(e) = write_record(&tx, rec) {
        tracing::warn!(record = %rec.id, month = %rec.month, error = %e, "record save rolled back");
        return Err(e);
    }
    tx.commit()?;
    tracing::info!(
        record = %rec.id,
        month = %rec.month,
        liquid_assets = rec.liquid_assets.len(),
        loan_snapshots = rec.lent_items.len(),
        "record saved"
    );
    Ok(())
}

fn write_record(conn: &Connection, rec: &MonthlyRecord) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO monthly_records(
            id, month, record_date, target_provident, target_cash,
            income_hand, income_side, income_provident,
            exp_rent, exp_credit_card, exp_baitiao, exp_huabei, exp_daily,
            balance_provident, balance_investments, balance_liquid, balance_lent, note
         ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18)
         ON CONFLICT(id) DO UPDATE SET
            month=excluded.month,
            record_date=excluded.record_date,
            target_provident=excluded.target_provident,
            target_cash=excluded.target_cash,
            income_hand=excluded.income_hand,
            income_side=excluded.income_side,
            income_provident=excluded.income_provident,
            exp_rent=excluded.exp_rent,
            exp_credit_card=excluded.exp_credit_card,
            exp_baitiao=excluded.exp_baitiao,
            exp_huabei=excluded.exp_huabei,
            exp_daily=excluded.exp_daily,
            balance_provident=excluded.balance_provident,
            balance_investments=excluded.balance_investments,
            balance_liquid=excluded.balance_liquid,
            balance_lent=excluded.balance_lent,
            note=excluded.note",
        params![
            rec.id,
            rec.month,
            rec.record_date,
            rec.target_provident.to_string(),
            rec.target_cash.to_string(),
            rec.income_hand.to_string(),
            rec.income_side.to_string(),
            rec.income_provident.to_string(),
            rec.exp_rent.to_string(),
            rec.exp_credit_card.to_string(),
            rec.exp_baitiao.to_string(),
            rec.exp_huabei.to_string(),
            rec.exp_daily.to_string(),
            rec.balance_provident.to_string(),
            rec.balance_investments.to_string(),
            rec.balance_liquid.to_string(),
            rec.balance_lent.to_string(),
            rec.note,
        ],
    )?;

    conn.execute(
        "DELETE FROM liquid_asset_snapshots WHERE record_id=?1",
        params![rec.id],
    )?;
    for a in &rec.liquid_assets {
        conn.execute(
            "INSERT INTO liquid_asset_snapshots(id, record_id, name, amount) VALUES (?1,?2,?3,?4)",
            params![a.id, rec.id, a.name, a.amount.to_string()],
        )?;
    }

    conn.execute(
        "DELETE FROM monthly_loan_snapshots WHERE record_id=?1",
        params![rec.id],
    )?;
    for l in &rec.lent_items {
        conn.execute(
            "INSERT INTO monthly_loan_snapshots(id, record_id, borrower, date, amount, status, repaid_amount, notes)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
            params![
                l.id,
                rec.id,
                l.borrower,
                l.date,
                l.amount.to_string(),
                l.status,
                l.repaid_amount.to_string(),
                l.notes,
            ],
        )?;
    }

    conn.execute(
        "DELETE FROM record_extra_items WHERE record_id=?1",
        params![rec.id],
    )?;
    for category in ExtraCategory::ALL {
        for i in rec.extras(category) {
            conn.execute(
                "INSERT INTO record_extra_items(id, record_id, category, name, value) VALUES (?1,?2,?3,?4,?5)",
                params![i.id, rec.id, category.as_str(), i.name, i.value.to_string()],
            )?;
        }
    }
    Ok(())
}

/// Deletes a record and, by cascade, its children. Returns whether a row
/// existed; a missing id is not an error.
pub fn delete(conn: &Connection, id: &str) -> StoreResult<bool> {
    let removed = conn.execute("DELETE FROM monthly_records WHERE id=?1", params![id])?;
    tracing::info!(record = %id, removed, "record deleted");
    Ok(removed > 0)
}
