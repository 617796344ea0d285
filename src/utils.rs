// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!("quantmaster/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Months since year 0 for a `YYYY-MM` key, `None` when it does not parse
/// or the year is too large to count in months.
pub fn month_index(month: &str) -> Option<i32> {
    let (y, m) = month.trim().split_once('-')?;
    let y: i32 = y.parse().ok()?;
    let m: i32 = m.parse().ok()?;
    if !(1..=12).contains(&m) {
        return None;
    }
    y.checked_mul(12)?.checked_add(m - 1)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_index_orders_and_rejects_garbage() {
        assert_eq!(month_index("2024-01").unwrap() - month_index("2023-12").unwrap(), 1);
        assert_eq!(month_index("2024-03").unwrap() - month_index("2024-01").unwrap(), 2);
        assert_eq!(month_index("2024-13"), None);
        assert_eq!(month_index("January"), None);
    }

    #[test]
    fn month_index_is_none_for_years_past_i32_months() {
        assert_eq!(month_index("999999999-01"), None);
        assert_eq!(month_index("-999999999-01"), None);
        assert!(month_index("178956970-01").is_some());
    }

    #[test]
    fn parse_month_requires_year_and_month() {
        assert!(parse_month("2024-02").is_ok());
        assert!(parse_month("2024-2-1").is_err());
        assert!(parse_month("24").is_err());
    }
}
