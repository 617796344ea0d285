// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MonthlyRecord;
use crate::store::records as store;
use crate::summary::{total_expense, total_income};
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("save", sub)) => save(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if store::delete(conn, id)? {
                println!("Removed record {}", id);
            } else {
                println!("No record {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn overview_rows(records: &[MonthlyRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                r.id.clone(),
                format!("{:.2}", total_income(r)),
                format!("{:.2}", total_expense(r)),
                format!("{:.2}", r.total_assets()),
                r.note.clone(),
            ]
        })
        .collect()
}

const OVERVIEW_HEADERS: [&str; 6] = ["Month", "ID", "Income", "Expense", "Assets", "Note"];

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let records = store::list(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        println!("{}", pretty_table(&OVERVIEW_HEADERS, overview_rows(&records)));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let records = store::find_by_month(conn, &month)?;
    if records.is_empty() {
        anyhow::bail!("No record for {}", month);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        return Ok(());
    }
    println!("{}", pretty_table(&OVERVIEW_HEADERS, overview_rows(&records)));
    for r in &records {
        let mut items = Vec::new();
        for (kind, list) in [
            ("Side income", &r.side_income_detail),
            ("Extra income", &r.extra_income),
            ("Extra expense", &r.extra_expenses),
        ] {
            for i in list {
                items.push(vec![kind.to_string(), i.name.clone(), format!("{:.2}", i.value)]);
            }
        }
        for a in &r.liquid_assets {
            items.push(vec!["Liquid asset".into(), a.name.clone(), format!("{:.2}", a.amount)]);
        }
        for l in &r.lent_items {
            items.push(vec![
                format!("Loan ({})", l.status),
                l.borrower.clone(),
                format!("{:.2}", l.amount.saturating_sub(l.repaid_amount)),
            ]);
        }
        if !items.is_empty() {
            println!("{}", pretty_table(&["Kind", "Name", "Amount"], items));
        }
    }
    Ok(())
}

pub fn save(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let rec: MonthlyRecord =
        serde_json::from_str(&raw).with_context(|| format!("Invalid record in {}", path))?;
    store::save(conn, &rec).with_context(|| format!("Save record {}", rec.id))?;
    println!("Saved record {} for {}", rec.id, rec.month);
    Ok(())
}
