// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Loan;
use crate::store::loans as store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("import", sub)) => import(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let loans = store::list(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &loans)? {
        let rows = loans
            .into_iter()
            .map(|l| {
                vec![
                    l.id,
                    l.borrower,
                    l.date,
                    format!("{:.2}", l.amount),
                    l.status,
                    format!("{:.2}", l.repaid_amount),
                    l.notes,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Borrower", "Date", "Amount", "Status", "Repaid", "Notes"],
                rows
            )
        );
    }
    Ok(())
}

pub fn import(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let loans: Vec<Loan> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid loan list in {}", path))?;
    store::replace_all(conn, &loans)?;
    println!("Loan ledger replaced with {} loans", loans.len());
    Ok(())
}
