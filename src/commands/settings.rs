// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::settings as store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = store::get(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Webhook URL".into(), s.wechat_webhook_url.clone()],
            vec!["Monthly provident goal".into(), s.monthly_provident_goal.to_string()],
            vec!["Auto provident withdrawal".into(), s.auto_provident_withdrawal.to_string()],
            vec!["Monthly cash goal".into(), s.monthly_cash_goal.to_string()],
            vec!["Auto-fill missing months".into(), s.auto_fill_missing_months.to_string()],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

/// Read-modify-replace: flags that are not given keep their stored value.
pub fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut s = store::get(conn)?;
    if let Some(url) = sub.get_one::<String>("webhook_url") {
        s.wechat_webhook_url = url.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("provident_goal") {
        s.monthly_provident_goal = parse_decimal(v.trim())?;
    }
    if let Some(v) = sub.get_one::<String>("withdrawal") {
        s.auto_provident_withdrawal = parse_decimal(v.trim())?;
    }
    if let Some(v) = sub.get_one::<String>("cash_goal") {
        s.monthly_cash_goal = parse_decimal(v.trim())?;
    }
    if let Some(v) = sub.get_one::<bool>("auto_fill") {
        s.auto_fill_missing_months = *v;
    }
    store::replace(conn, &s)?;
    println!("Settings updated");
    Ok(())
}
