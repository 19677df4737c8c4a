// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetStatus, Transaction, TransactionKind};
use crate::money::to_f64;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub const WARNING_THRESHOLD: f64 = 80.0;
pub const EXCEEDED_THRESHOLD: f64 = 100.0;
const MAX_WARNINGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Safe,
    Warning,
    Exceeded,
}

impl BudgetBand {
    pub fn from_percentage(pct: f64) -> Self {
        if pct < WARNING_THRESHOLD {
            BudgetBand::Safe
        } else if pct < EXCEEDED_THRESHOLD {
            BudgetBand::Warning
        } else {
            BudgetBand::Exceeded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetBand::Safe => "safe",
            BudgetBand::Warning => "warning",
            BudgetBand::Exceeded => "exceeded",
        }
    }
}

pub fn budget_percentage(spent: Decimal, budgeted: Decimal) -> f64 {
    if budgeted <= Decimal::ZERO {
        return 0.0;
    }
    to_f64(spent) / to_f64(budgeted) * 100.0
}

pub fn in_period(budget: &Budget, date: NaiveDate) -> bool {
    date >= budget.period_start && budget.period_end.is_none_or(|end| date <= end)
}

/// Expenses booked against the budget's category inside its period.
pub fn spent_in_period(budget: &Budget, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == TransactionKind::Expense)
        .filter(|t| t.category_id == Some(budget.category_id))
        .filter(|t| in_period(budget, t.transaction_date))
        .map(|t| t.amount)
        .sum()
}

pub fn is_current(budget: &Budget, today: NaiveDate) -> bool {
    budget.status == BudgetStatus::Active && in_period(budget, today)
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: f64,
    pub display_percentage: f64,
    pub band: BudgetBand,
}

impl BudgetProgress {
    /// Amount over the limit once the budget is exceeded.
    pub fn overrun(&self) -> Option<Decimal> {
        (self.band == BudgetBand::Exceeded).then(|| self.spent - self.budgeted)
    }
}

pub fn budget_progress(budget: &Budget, spent: Decimal) -> BudgetProgress {
    progress_with(budget, spent, budget_percentage(spent, budget.amount))
}

fn progress_with(budget: &Budget, spent: Decimal, percentage: f64) -> BudgetProgress {
    BudgetProgress {
        budget_id: budget.id,
        category: budget.category_name.clone(),
        budgeted: budget.amount,
        spent,
        remaining: budget.amount - spent,
        percentage,
        display_percentage: percentage.min(100.0),
        band: BudgetBand::from_percentage(percentage),
    }
}

/// Progress for every current budget. Spending and percentage reported by
/// the server are trusted; otherwise both are derived from `transactions`.
pub fn current_budgets(
    budgets: &[Budget],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .filter(|b| is_current(b, today))
        .map(|b| match (b.spent, b.percentage) {
            (Some(spent), Some(pct)) if pct.is_finite() => progress_with(b, spent, pct),
            (Some(spent), _) => budget_progress(b, spent),
            (None, _) => budget_progress(b, spent_in_period(b, transactions)),
        })
        .collect()
}

/// Budgets at or above the warning threshold, worst first.
pub fn budget_warnings(progress: &[BudgetProgress]) -> Vec<BudgetProgress> {
    let mut out: Vec<BudgetProgress> = progress
        .iter()
        .filter(|p| p.percentage >= WARNING_THRESHOLD)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    out.truncate(MAX_WARNINGS);
    out
}
