// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::accounts::total_balance;
use crate::calc::budget::{budget_warnings, current_budgets, BudgetProgress};
use crate::calc::debt::{upcoming_payments, UpcomingPayment, UPCOMING_HORIZON_DAYS};
use crate::calc::goal::{goals_summary, top_goals, GoalProgress, GoalsSummary};
use crate::calc::recurring::{balance_projection, BalanceProjection};
use crate::calc::totals::{period_totals, DASHBOARD_PERIOD_DAYS};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::Snapshot;
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub const MINI_PROJECTION_MONTHS: u32 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub period_days: i64,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub total_balance: Decimal,
    pub budget_warnings: Vec<BudgetProgress>,
    pub goals: GoalsSummary,
    pub top_goals: Vec<GoalProgress>,
    pub upcoming_payments: Vec<UpcomingPayment>,
    pub projection: BalanceProjection,
}

pub fn build(snap: &Snapshot, today: NaiveDate) -> Dashboard {
    let period = period_totals(&snap.transactions, today, DASHBOARD_PERIOD_DAYS);
    let balance = total_balance(&snap.accounts);
    let budgets = current_budgets(&snap.budgets, &snap.transactions, today);
    Dashboard {
        as_of: today,
        period_days: DASHBOARD_PERIOD_DAYS,
        income: period.income,
        expenses: period.expenses,
        net: period.net(),
        total_balance: balance,
        budget_warnings: budget_warnings(&budgets),
        goals: goals_summary(&snap.goals),
        top_goals: top_goals(&snap.goals, &snap.investments),
        upcoming_payments: upcoming_payments(&snap.debts, today, UPCOMING_HORIZON_DAYS),
        projection: balance_projection(
            balance,
            &snap.recurring,
            &snap.debts,
            today,
            MINI_PROJECTION_MONTHS,
        ),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(m);
    let today = today_from(m)?;
    let snap = Snapshot::load(conn)?;
    let d = build(&snap, today);
    if maybe_print_json(json_flag, jsonl_flag, &d)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;

    println!("Last {} days as of {}", d.period_days, d.as_of);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net", "Total balance"],
            vec![vec![
                fmt_money(&d.income, &ccy),
                fmt_money(&d.expenses, &ccy),
                fmt_money(&d.net, &ccy),
                fmt_money(&d.total_balance, &ccy),
            ]],
        )
    );

    if !d.budget_warnings.is_empty() {
        println!("Budget warnings");
        let rows = d
            .budget_warnings
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    format!("{:.1}%", b.percentage),
                    b.band.as_str().to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Used", "Status"], rows));
    }

    println!(
        "Goals: {} in progress, {} completed",
        d.goals.in_progress, d.goals.completed
    );
    if !d.top_goals.is_empty() {
        let rows = d
            .top_goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    format!("{:.1}%", g.percentage),
                    fmt_money(&g.target, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Progress", "Target"], rows));
    }

    if !d.upcoming_payments.is_empty() {
        println!("Upcoming payments");
        let rows = d
            .upcoming_payments
            .iter()
            .map(|p| {
                vec![
                    p.creditor.clone(),
                    p.next_payment_date.to_string(),
                    fmt_money(&p.payment_amount, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Creditor", "Due", "Amount"], rows));
    }

    let rows = d
        .projection
        .data
        .iter()
        .map(|p| vec![p.month.clone(), fmt_money(&p.balance, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Month", "Projected balance"], rows));
    Ok(())
}
