// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceError;
use crate::money::{de_amount, de_opt_amount};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(FinanceError::UnknownChoice {
                field: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    Amortized,
}

impl FromStr for InterestType {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(InterestType::Simple),
            "amortized" => Ok(InterestType::Amortized),
            _ => Err(FinanceError::UnknownChoice {
                field: "interest type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterestType::Simple => write!(f, "simple"),
            InterestType::Amortized => write!(f, "amortized"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Biweekly,
    Weekly,
}

impl FromStr for Frequency {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "biweekly" => Ok(Frequency::Biweekly),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(FinanceError::UnknownChoice {
                field: "frequency",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Bank,
    Cash,
    Card,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtStatus {
    Active,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    Active,
    Paused,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentKind {
    /// Savings goal tracked against a target.
    Goal,
    /// Investment policy with an expected annual return.
    Insurance,
}

impl FromStr for InvestmentKind {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goal" => Ok(InvestmentKind::Goal),
            "insurance" | "policy" => Ok(InvestmentKind::Insurance),
            _ => Err(FinanceError::UnknownChoice {
                field: "investment type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentKind::Goal => write!(f, "goal"),
            InvestmentKind::Insurance => write!(f, "insurance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Completed,
    Matured,
    Cancelled,
}

/// Accepts `YYYY-MM-DD` as well as full timestamps, keeping only the date part.
pub fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_api_date(&s).map_err(serde::de::Error::custom)
}

pub fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => parse_api_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn parse_api_date(s: &str) -> Result<NaiveDate, FinanceError> {
    let t = s.trim();
    let head = t.get(..10).unwrap_or(t);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|_| FinanceError::InvalidDate(s.into()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    #[serde(deserialize_with = "de_amount")]
    pub balance: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub committed_to_goals: Option<Decimal>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub r#type: TransactionKind,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: String,
    pub r#type: TransactionKind,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "de_date")]
    pub transaction_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    #[serde(alias = "category")]
    pub category_id: i64,
    #[serde(default)]
    pub category_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "de_date")]
    pub period_start: NaiveDate,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub status: BudgetStatus,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub spent: Option<Decimal>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    #[serde(default)]
    pub account_id: Option<i64>,
    pub name: String,
    #[serde(deserialize_with = "de_amount")]
    pub target_amount: Decimal,
    #[serde(deserialize_with = "de_amount")]
    pub current_amount: Decimal,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub creditor_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub principal_amount: Decimal,
    #[serde(deserialize_with = "de_amount")]
    pub interest_rate: Decimal,
    pub interest_type: InterestType,
    pub term_months: u32,
    #[serde(deserialize_with = "de_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "de_amount")]
    pub monthly_payment: Decimal,
    #[serde(deserialize_with = "de_amount")]
    pub amount_paid: Decimal,
    pub status: DebtStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_progress: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub name: String,
    pub transaction_type: TransactionKind,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    pub frequency: Frequency,
    #[serde(default)]
    pub day_of_period: u32,
    #[serde(alias = "account")]
    pub account_id: i64,
    #[serde(default, alias = "category")]
    pub category_id: Option<i64>,
    #[serde(deserialize_with = "de_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub investment_type: InvestmentKind,
    pub name: String,
    #[serde(default, alias = "account")]
    pub account_id: Option<i64>,
    #[serde(default, deserialize_with = "de_amount")]
    pub initial_amount: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub current_amount: Decimal,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub target_amount: Option<Decimal>,
    #[serde(default)]
    pub institution_name: Option<String>,
    /// Annual percentage, e.g. `8.5`.
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub expected_return_rate: Option<Decimal>,
    #[serde(default)]
    pub maturity_term_months: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub maturity_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub deadline: Option<NaiveDate>,
    pub status: InvestmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    #[serde(default)]
    pub from_account_name: String,
    pub to_account_id: i64,
    #[serde(default)]
    pub to_account_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "de_date")]
    pub transfer_date: NaiveDate,
}

/// Payload for `POST /debts/`; `monthly_payment` is filled in by the client.
#[derive(Debug, Clone, Serialize)]
pub struct DebtDraft {
    pub creditor_name: String,
    pub principal_amount: Decimal,
    pub interest_rate: Decimal,
    pub interest_type: InterestType,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}
