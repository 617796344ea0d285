// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived per-month figures: flows, actual vs. theoretical assets, and goal
//! achievement. Pure functions over already-loaded records.

use crate::models::{MonthlyRecord, Settings};
use crate::utils::month_index;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub id: String,
    pub month: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub actual_assets: Decimal,
    pub theoretical_assets: Decimal,
    pub discrepancy: Decimal,
    pub missing_months: u32,
    pub cash_saved: Decimal,
    pub provident_saved: Decimal,
    pub cash_goal: Decimal,
    pub provident_goal: Decimal,
    pub goal_met: bool,
    pub savings_rate: Decimal,
}

// Stored amounts are unbounded up to Decimal::MAX, so every sum saturates
// instead of panicking on overflow.
fn sum<'a>(values: impl Iterator<Item = &'a Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}

pub fn total_income(r: &MonthlyRecord) -> Decimal {
    sum([&r.income_hand, &r.income_side, &r.income_provident].into_iter())
        .saturating_add(sum(r.extra_income.iter().map(|i| &i.value)))
}

pub fn total_expense(r: &MonthlyRecord) -> Decimal {
    sum([&r.exp_rent, &r.exp_credit_card, &r.exp_baitiao, &r.exp_huabei, &r.exp_daily].into_iter())
        .saturating_add(sum(r.extra_expenses.iter().map(|i| &i.value)))
}

/// A zero target on an old record means "use the current setting".
fn or_setting(target: Decimal, fallback: Decimal) -> Decimal {
    if target.is_zero() { fallback } else { target }
}

/// Months skipped between two keys; unparseable keys count as adjacent.
fn gap_between(prev: &str, cur: &str) -> u32 {
    let (Some(p), Some(c)) = (month_index(prev), month_index(cur)) else {
        return 0;
    };
    match c.checked_sub(p) {
        Some(d) if d > 1 => u32::try_from(d - 1).unwrap_or(0),
        _ => 0,
    }
}

/// `records` must already be in month order, as returned by the record store.
pub fn summarize(records: &[MonthlyRecord], settings: &Settings) -> Vec<MonthSummary> {
    let mut out = Vec::with_capacity(records.len());
    let mut prev: Option<&MonthlyRecord> = None;
    for r in records {
        let income = total_income(r);
        let expense = total_expense(r);
        let actual = r.total_assets();

        let cash_goal = or_setting(r.target_cash, settings.monthly_cash_goal);
        let provident_goal = or_setting(r.target_provident, settings.monthly_provident_goal);

        let (theoretical, missing) = match prev {
            None => (actual, 0),
            Some(p) => {
                let missing = if settings.auto_fill_missing_months {
                    gap_between(&p.month, &r.month)
                } else {
                    0
                };
                let fill = Decimal::from(missing).saturating_mul(cash_goal.saturating_add(provident_goal));
                let theoretical = p
                    .total_assets()
                    .saturating_add(income)
                    .saturating_sub(expense)
                    .saturating_add(fill);
                (theoretical, missing)
            }
        };

        let cash_saved = r
            .income_hand
            .saturating_add(sum(r.extra_income.iter().map(|i| &i.value)))
            .saturating_sub(expense);
        let provident_saved = r.income_provident;
        // A quotient too large to represent is reported as zero.
        let savings_rate = cash_saved
            .saturating_add(provident_saved)
            .saturating_add(r.income_side)
            .checked_div(income)
            .map(|q| q.round_dp(4))
            .unwrap_or(Decimal::ZERO);

        out.push(MonthSummary {
            id: r.id.clone(),
            month: r.month.clone(),
            total_income: income,
            total_expense: expense,
            actual_assets: actual,
            theoretical_assets: theoretical,
            discrepancy: actual.saturating_sub(theoretical),
            missing_months: missing,
            cash_saved,
            provident_saved,
            cash_goal,
            provident_goal,
            goal_met: cash_saved >= cash_goal && provident_saved >= provident_goal,
            savings_rate,
        });
        prev = Some(r);
    }
    out
}
