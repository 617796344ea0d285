// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::records;
use anyhow::{bail, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(conn, sub),
        _ => Ok(()),
    }
}

const CSV_HEADER: [&str; 18] = [
    "id",
    "month",
    "record_date",
    "target_provident",
    "target_cash",
    "income_hand",
    "income_side",
    "income_provident",
    "exp_rent",
    "exp_credit_card",
    "exp_baitiao",
    "exp_huabei",
    "exp_daily",
    "balance_provident",
    "balance_investments",
    "balance_liquid",
    "balance_lent",
    "note",
];

fn export_records(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let all = records::list(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(CSV_HEADER)?;
            for r in &all {
                wtr.write_record([
                    r.id.clone(),
                    r.month.clone(),
                    r.record_date.clone(),
                    r.target_provident.to_string(),
                    r.target_cash.to_string(),
                    r.income_hand.to_string(),
                    r.income_side.to_string(),
                    r.income_provident.to_string(),
                    r.exp_rent.to_string(),
                    r.exp_credit_card.to_string(),
                    r.exp_baitiao.to_string(),
                    r.exp_huabei.to_string(),
                    r.exp_daily.to_string(),
                    r.balance_provident.to_string(),
                    r.balance_investments.to_string(),
                    r.balance_liquid.to_string(),
                    r.balance_lent.to_string(),
                    r.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&all)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} records to {}", all.len(), out);
    Ok(())
}
