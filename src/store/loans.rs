// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::row_decimal;
use crate::error::{StoreError, StoreResult};
use crate::models::Loan;
use rusqlite::{params, Connection, Row};

pub(crate) fn loan_from_row(r: &Row<'_>) -> rusqlite::Result<Loan> {
    Ok(Loan {
        id: r.get(0)?,
        borrower: r.get(1)?,
        date: r.get(2)?,
        amount: row_decimal(r, 3)?,
        status: r.get(4)?,
        repaid_amount: row_decimal(r, 5)?,
        notes: r.get(6)?,
    })
}

/// All loans in the ledger. Callers must not rely on the order.
pub fn list(conn: &Connection) -> StoreResult<Vec<Loan>> {
    let mut stmt = conn.prepare(
        "SELECT id, borrower, date, amount, status, repaid_amount, notes FROM loans",
    )?;
    let rows = stmt.query_map([], loan_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    tracing::debug!(count = out.len(), "loaded loan ledger");
    Ok(out)
}

/// Rejects loans whose id is blank, with the same message shape as record
/// validation.
pub fn validate(loans: &[Loan]) -> StoreResult<()> {
    match loans.iter().position(|l| l.id.trim().is_empty()) {
        Some(pos) => Err(StoreError::validation(format!("[{}].id: must not be empty", pos))),
        None => Ok(()),
    }
}

/// Replaces the entire ledger with `loans`. Runs in one transaction, so a
/// failing insert leaves the previous ledger untouched.
pub fn replace_all(conn: &mut Connection, loans: &[Loan]) -> StoreResult<()> {
    validate(loans)?;
    let tx = conn.transaction()?;
    let removed = tx.execute("DELETE FROM loans", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO loans(id, borrower, date, amount, status, repaid_amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for l in loans {
            if let Err(e) = stmt.execute(params![
                l.id,
                l.borrower,
                l.date,
                l.amount.to_string(),
                l.status,
                l.repaid_amount.to_string(),
                l.notes,
            ]) {
                tracing::warn!(loan = %l.id, error = %e, "loan ledger replace rolled back");
                return Err(e.into());
            }
        }
    }
    tx.commit()?;
    tracing::info!(removed, inserted = loans.len(), "loan ledger replaced");
    Ok(())
}
