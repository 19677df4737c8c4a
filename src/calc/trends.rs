// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceError;
use crate::models::{Budget, BudgetStatus, Category, Transaction, TransactionKind};
use crate::money::{round_currency, to_f64};
use crate::utils::{add_months, month_end, month_start};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const TREND_WINDOWS: [u32; 3] = [3, 6, 12];
pub const DEFAULT_TREND_MONTHS: u32 = 6;
/// Month-over-month moves within ±1% count as stable.
pub const STABLE_BAND_PERCENT: f64 = 1.0;

pub fn trend_window(months: u32) -> Result<u32, FinanceError> {
    if TREND_WINDOWS.contains(&months) {
        Ok(months)
    } else {
        Err(FinanceError::UnknownChoice {
            field: "trend window (3, 6 or 12 months)",
            value: months.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increase => "increase",
            TrendDirection::Decrease => "decrease",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySpending {
    /// `YYYY-MM`.
    pub month: String,
    pub amount: Decimal,
    /// Change against the previous month; `None` when that month had no spending.
    pub change_percentage: Option<f64>,
    pub vs_previous: TrendDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTrend {
    pub category_id: i64,
    pub category_name: String,
    pub period_months: u32,
    pub monthly_data: Vec<MonthlySpending>,
    /// Limit of the category's newest active budget, drawn as a reference line.
    pub budget_reference: Option<Decimal>,
    pub average_spending: Decimal,
    pub total_spending: Decimal,
}

fn direction(previous: Option<Decimal>, amount: Decimal) -> (Option<f64>, TrendDirection) {
    match previous {
        Some(prev) if prev > Decimal::ZERO => {
            let pct = (to_f64(amount) - to_f64(prev)) / to_f64(prev) * 100.0;
            let dir = if pct > STABLE_BAND_PERCENT {
                TrendDirection::Increase
            } else if pct < -STABLE_BAND_PERCENT {
                TrendDirection::Decrease
            } else {
                TrendDirection::Stable
            };
            (Some((pct * 100.0).round() / 100.0), dir)
        }
        Some(_) if amount > Decimal::ZERO => (None, TrendDirection::Increase),
        _ => (None, TrendDirection::Stable),
    }
}

/// Newest active budget for the category; ids grow with creation time.
pub fn budget_reference(budgets: &[Budget], category_id: i64) -> Option<Decimal> {
    budgets
        .iter()
        .filter(|b| b.category_id == category_id && b.status == BudgetStatus::Active)
        .max_by_key(|b| b.id)
        .map(|b| b.amount)
}

/// Expenses of one category bucketed by month over the `months` months ending
/// with `today`'s month. Months without spending are kept as zero.
pub fn category_trend(
    category: &Category,
    transactions: &[Transaction],
    budgets: &[Budget],
    months: u32,
    today: NaiveDate,
) -> CategoryTrend {
    let current = month_start(today);
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut first = current;
    for back in 0..months {
        let Some(m) = i32::try_from(back).ok().and_then(|b| add_months(current, -b)) else {
            break;
        };
        buckets.insert(m.format("%Y-%m").to_string(), Decimal::ZERO);
        first = m;
    }
    let last = month_end(today);

    for t in transactions.iter().filter(|t| {
        t.r#type == TransactionKind::Expense
            && t.category_id == Some(category.id)
            && t.transaction_date >= first
            && t.transaction_date <= last
    }) {
        let key = t.transaction_date.format("%Y-%m").to_string();
        *buckets.entry(key).or_insert(Decimal::ZERO) += t.amount;
    }

    let mut previous = None;
    let mut monthly_data = Vec::with_capacity(buckets.len());
    for (month, amount) in buckets {
        let (change_percentage, vs_previous) = direction(previous, amount);
        monthly_data.push(MonthlySpending {
            month,
            amount,
            change_percentage,
            vs_previous,
        });
        previous = Some(amount);
    }

    let total_spending: Decimal = monthly_data.iter().map(|m| m.amount).sum();
    let average_spending = if monthly_data.is_empty() {
        Decimal::ZERO
    } else {
        round_currency(total_spending / Decimal::from(monthly_data.len()))
    };

    CategoryTrend {
        category_id: category.id,
        category_name: category.name.clone(),
        period_months: months,
        monthly_data,
        budget_reference: budget_reference(budgets, category.id),
        average_spending,
        total_spending,
    }
}

/// Categories that have at least one active budget, by name.
pub fn budgeted_categories<'a>(categories: &'a [Category], budgets: &[Budget]) -> Vec<&'a Category> {
    let mut out: Vec<&Category> = categories
        .iter()
        .filter(|c| {
            budgets
                .iter()
                .any(|b| b.category_id == c.id && b.status == BudgetStatus::Active)
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}
