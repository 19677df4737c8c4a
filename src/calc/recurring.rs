// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Debt, DebtStatus, Frequency, RecurringTransaction, Transaction, TransactionKind};
use crate::money::to_f64;
use crate::utils::{add_months, month_start, month_end};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Months of history used to estimate non-recurring spending.
pub const VARIABLE_LOOKBACK_MONTHS: u32 = 3;
/// Longest horizon `recurring project` accepts.
pub const MAX_PROJECTION_MONTHS: u32 = 120;

impl Frequency {
    /// Occurrences per month. A month is treated as exactly four weeks.
    pub fn multiplier(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Biweekly => 2,
            Frequency::Weekly => 4,
        }
    }
}

pub fn monthly_equivalent(amount: Decimal, frequency: Frequency) -> Decimal {
    amount * Decimal::from(frequency.multiplier())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecurringSummary {
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
    pub net: Decimal,
}

pub fn recurring_summary(items: &[RecurringTransaction]) -> RecurringSummary {
    let mut s = RecurringSummary::default();
    for r in items.iter().filter(|r| r.is_active) {
        let m = monthly_equivalent(r.amount, r.frequency);
        match r.transaction_type {
            TransactionKind::Income => s.monthly_income += m,
            TransactionKind::Expense => s.monthly_expense += m,
        }
    }
    s.net = s.monthly_income - s.monthly_expense;
    s
}

fn runs_during(r: &RecurringTransaction, first: NaiveDate, last: NaiveDate) -> bool {
    r.is_active && r.start_date <= last && r.end_date.is_none_or(|end| end >= first)
}

pub fn active_debt_payments(debts: &[Debt]) -> Decimal {
    debts
        .iter()
        .filter(|d| d.status == DebtStatus::Active)
        .map(|d| d.monthly_payment)
        .sum()
}

/// Average monthly spending over the lookback window that is not explained by
/// recurring expenses or debt installments. Never negative.
pub fn variable_spending_average(
    transactions: &[Transaction],
    recurring: &[RecurringTransaction],
    debts: &[Debt],
    today: NaiveDate,
) -> Decimal {
    let months = Decimal::from(VARIABLE_LOOKBACK_MONTHS);
    let since = add_months(month_start(today), -(VARIABLE_LOOKBACK_MONTHS as i32))
        .unwrap_or(NaiveDate::MIN);
    let all_expenses: Decimal = transactions
        .iter()
        .filter(|t| t.r#type == TransactionKind::Expense)
        .filter(|t| t.transaction_date >= since && t.transaction_date <= today)
        .map(|t| t.amount)
        .sum();
    let recurring_expenses: Decimal = recurring
        .iter()
        .filter(|r| r.is_active && r.transaction_type == TransactionKind::Expense)
        .map(|r| monthly_equivalent(r.amount, r.frequency) * months)
        .sum();
    let debt_payments = active_debt_payments(debts) * months;
    let variable = all_expenses - recurring_expenses - debt_payments;
    if variable < Decimal::ZERO {
        Decimal::ZERO
    } else {
        variable / months
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthProjection {
    pub month: String,
    pub month_name: String,
    pub projected_income: Decimal,
    pub projected_expenses: Decimal,
    pub recurring_expenses: Decimal,
    pub debt_payments: Decimal,
    pub variable_expenses: Decimal,
    pub net_balance: Decimal,
    pub cumulative_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub projections: Vec<MonthProjection>,
    pub total_monthly_income: Decimal,
    pub total_monthly_expenses: Decimal,
    pub average_net_balance: Decimal,
    pub variable_spending_estimate: Decimal,
    pub savings_rate: f64,
    pub negative_months: usize,
    pub final_balance: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub recurring: &'a [RecurringTransaction],
    pub debts: &'a [Debt],
    pub transactions: &'a [Transaction],
    pub include_variable: bool,
}

/// Month-by-month income/expense projection starting at `today`'s month.
pub fn project(input: ProjectionInput<'_>, today: NaiveDate, months: u32) -> ProjectionReport {
    let variable = if input.include_variable {
        variable_spending_average(input.transactions, input.recurring, input.debts, today)
    } else {
        Decimal::ZERO
    };
    let debt_payments = active_debt_payments(input.debts);

    let mut projections = Vec::with_capacity(months.min(MAX_PROJECTION_MONTHS) as usize);
    let mut cumulative = Decimal::ZERO;
    for offset in 0..months {
        // the calendar ends before the horizon does
        let Some(first) = i32::try_from(offset)
            .ok()
            .and_then(|o| add_months(month_start(today), o))
        else {
            break;
        };
        let last = month_end(first);
        let mut income = Decimal::ZERO;
        let mut recurring_expenses = Decimal::ZERO;
        for r in input.recurring.iter().filter(|r| runs_during(r, first, last)) {
            let m = monthly_equivalent(r.amount, r.frequency);
            match r.transaction_type {
                TransactionKind::Income => income += m,
                TransactionKind::Expense => recurring_expenses += m,
            }
        }
        let expenses = recurring_expenses + debt_payments + variable;
        let net = income - expenses;
        cumulative += net;
        projections.push(MonthProjection {
            month: first.format("%Y-%m").to_string(),
            month_name: first.format("%B %Y").to_string(),
            projected_income: income,
            projected_expenses: expenses,
            recurring_expenses,
            debt_payments,
            variable_expenses: variable,
            net_balance: net,
            cumulative_balance: cumulative,
        });
    }

    let n = Decimal::from(projections.len().max(1));
    let avg = |f: fn(&MonthProjection) -> Decimal| -> Decimal {
        projections.iter().map(f).sum::<Decimal>() / n
    };
    let total_monthly_income = avg(|p| p.projected_income);
    let total_monthly_expenses = avg(|p| p.projected_expenses);
    let average_net_balance = avg(|p| p.net_balance);
    let savings_rate = if total_monthly_income > Decimal::ZERO {
        to_f64(average_net_balance) / to_f64(total_monthly_income) * 100.0
    } else {
        0.0
    };

    ProjectionReport {
        negative_months: projections
            .iter()
            .filter(|p| p.net_balance < Decimal::ZERO)
            .count(),
        final_balance: projections
            .last()
            .map(|p| p.cumulative_balance)
            .unwrap_or(Decimal::ZERO),
        projections,
        total_monthly_income,
        total_monthly_expenses,
        average_net_balance,
        variable_spending_estimate: variable,
        savings_rate,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub month: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceProjection {
    pub data: Vec<BalancePoint>,
    pub final_balance: Decimal,
}

/// The dashboard's short-range outlook: current balance carried forward by
/// the recurring monthly net less active debt installments.
pub fn balance_projection(
    current_balance: Decimal,
    recurring: &[RecurringTransaction],
    debts: &[Debt],
    today: NaiveDate,
    months: u32,
) -> BalanceProjection {
    let summary = recurring_summary(recurring);
    let monthly_net = summary.monthly_income - summary.monthly_expense - active_debt_payments(debts);
    let mut balance = current_balance;
    let mut data = Vec::with_capacity(months as usize);
    for i in 0..months {
        let at = today + Duration::days(30 * i64::from(i));
        data.push(BalancePoint {
            month: at.format("%b").to_string(),
            balance,
        });
        balance += monthly_net;
    }
    BalanceProjection {
        data,
        final_balance: balance,
    }
}
