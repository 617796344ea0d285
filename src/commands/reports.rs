// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{records, settings};
use crate::summary::summarize;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let all = records::list(conn)?;
    let current = settings::get(conn)?;
    let data = summarize(&all, &current);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                let month = if s.missing_months > 0 {
                    format!("{} (+{} filled)", s.month, s.missing_months)
                } else {
                    s.month.clone()
                };
                vec![
                    month,
                    format!("{:.2}", s.total_income),
                    format!("{:.2}", s.total_expense),
                    format!("{:.2}", s.actual_assets),
                    format!("{:.2}", s.theoretical_assets),
                    format!("{:.2}", s.discrepancy),
                    format!("{:.1}%", s.savings_rate.saturating_mul(rust_decimal::Decimal::ONE_HUNDRED)),
                    if s.goal_met { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Month",
                    "Income",
                    "Expense",
                    "Assets",
                    "Theoretical",
                    "Discrepancy",
                    "Savings rate",
                    "Goal met"
                ],
                rows
            )
        );
    }
    Ok(())
}
