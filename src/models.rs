// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Treats an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn default_loan_status() -> String {
    LOAN_STATUS_UNPAID.to_string()
}

pub const LOAN_STATUS_UNPAID: &str = "UNPAID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub wechat_webhook_url: String,
    pub monthly_provident_goal: Decimal,
    pub auto_provident_withdrawal: Decimal,
    pub monthly_cash_goal: Decimal,
    pub auto_fill_missing_months: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wechat_webhook_url: String::new(),
            monthly_provident_goal: Decimal::from(5000),
            auto_provident_withdrawal: Decimal::from(2000),
            monthly_cash_goal: Decimal::from(10000),
            auto_fill_missing_months: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraCategory {
    SideIncome,
    ExtraIncome,
    ExtraExpense,
}

impl ExtraCategory {
    pub const ALL: [ExtraCategory; 3] = [
        ExtraCategory::SideIncome,
        ExtraCategory::ExtraIncome,
        ExtraCategory::ExtraExpense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraCategory::SideIncome => "SIDE_INCOME",
            ExtraCategory::ExtraIncome => "EXTRA_INCOME",
            ExtraCategory::ExtraExpense => "EXTRA_EXPENSE",
        }
    }

    /// Name of the collection carrying this category on the wire.
    pub fn field_name(&self) -> &'static str {
        match self {
            ExtraCategory::SideIncome => "sideIncomeDetail",
            ExtraCategory::ExtraIncome => "extraIncome",
            ExtraCategory::ExtraExpense => "extraExpenses",
        }
    }
}

impl fmt::Display for ExtraCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtraCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SIDE_INCOME" => Ok(ExtraCategory::SideIncome),
            "EXTRA_INCOME" => Ok(ExtraCategory::ExtraIncome),
            "EXTRA_EXPENSE" => Ok(ExtraCategory::ExtraExpense),
            other => Err(format!("unknown extra item category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraItem {
    pub id: String,
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidAsset {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

/// A loan as held in the global ledger. The same shape is reused for the
/// per-month snapshots stored alongside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub borrower: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    pub amount: Decimal,
    #[serde(default = "default_loan_status")]
    pub status: String,
    #[serde(default)]
    pub repaid_amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub id: String,
    pub month: String, // YYYY-MM
    pub record_date: String,

    pub target_provident: Decimal,
    pub target_cash: Decimal,

    pub income_hand: Decimal,
    pub income_side: Decimal,
    pub income_provident: Decimal,

    pub exp_rent: Decimal,
    pub exp_credit_card: Decimal,
    #[serde(rename = "expBaiTiao")]
    pub exp_baitiao: Decimal,
    pub exp_huabei: Decimal,
    pub exp_daily: Decimal,

    pub balance_provident: Decimal,
    pub balance_investments: Decimal,
    pub balance_liquid: Decimal,
    pub balance_lent: Decimal,

    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub side_income_detail: Vec<ExtraItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_income: Vec<ExtraItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_expenses: Vec<ExtraItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liquid_assets: Vec<LiquidAsset>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lent_items: Vec<Loan>,
}

impl MonthlyRecord {
    pub fn extras(&self, category: ExtraCategory) -> &[ExtraItem] {
        match category {
            ExtraCategory::SideIncome => &self.side_income_detail,
            ExtraCategory::ExtraIncome => &self.extra_income,
            ExtraCategory::ExtraExpense => &self.extra_expenses,
        }
    }

    pub fn extras_mut(&mut self, category: ExtraCategory) -> &mut Vec<ExtraItem> {
        match category {
            ExtraCategory::SideIncome => &mut self.side_income_detail,
            ExtraCategory::ExtraIncome => &mut self.extra_income,
            ExtraCategory::ExtraExpense => &mut self.extra_expenses,
        }
    }

    /// Sum of the four balances, saturating at the `Decimal` bounds.
    pub fn total_assets(&self) -> Decimal {
        self.balance_provident
            .saturating_add(self.balance_investments)
            .saturating_add(self.balance_liquid)
            .saturating_add(self.balance_lent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_accepts_null_and_missing_children() {
        let rec: MonthlyRecord = serde_json::from_value(json!({
            "id": "rec_1", "month": "2024-01", "recordDate": "2024-01-31T10:00:00",
            "targetProvident": 5000, "targetCash": 10000,
            "incomeHand": 16000, "incomeSide": 0, "incomeProvident": 3938,
            "expRent": 1750, "expCreditCard": 0, "expBaiTiao": 0, "expHuabei": 0, "expDaily": 1000,
            "balanceProvident": 1, "balanceInvestments": 2, "balanceLiquid": 3, "balanceLent": 4,
            "note": null,
            "extraIncome": null
        }))
        .unwrap();
        assert!(rec.note.is_empty());
        assert!(rec.extra_income.is_empty());
        assert!(rec.lent_items.is_empty());
        assert_eq!(rec.total_assets(), Decimal::from(10));
    }

    #[test]
    fn record_rejects_missing_scalar() {
        let err = serde_json::from_value::<MonthlyRecord>(json!({
            "id": "rec_1", "recordDate": "2024-01-31"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("missing field `month`"));
    }

    #[test]
    fn loan_defaults_status_and_serializes_camel_case() {
        let loan: Loan = serde_json::from_value(json!({
            "id": "loan_1", "borrower": "Wang", "date": "2023-11-15", "amount": 20000
        }))
        .unwrap();
        assert_eq!(loan.status, "UNPAID");
        let v = serde_json::to_value(&loan).unwrap();
        assert_eq!(v["repaidAmount"], json!(0.0));
        assert_eq!(v["amount"], json!(20000.0));
    }

    #[test]
    fn extra_category_round_trips_through_str() {
        for c in ExtraCategory::ALL {
            assert_eq!(c.as_str().parse::<ExtraCategory>().unwrap(), c);
        }
        assert!("OTHER".parse::<ExtraCategory>().is_err());
    }
}
