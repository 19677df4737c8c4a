// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::recurring::{
    monthly_equivalent, project, recurring_summary, ProjectionInput, ProjectionReport,
    RecurringSummary,
};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::Snapshot;
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("project", sub)) => projection(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_summary(conn: &Connection) -> Result<RecurringSummary> {
    let snap = Snapshot::load(conn)?;
    Ok(recurring_summary(&snap.recurring))
}

pub fn query_projection(conn: &Connection, sub: &clap::ArgMatches) -> Result<ProjectionReport> {
    let today = today_from(sub)?;
    let months = *sub
        .get_one::<u32>("months")
        .context("Missing '--months'")?;
    let snap = Snapshot::load(conn)?;
    let input = ProjectionInput {
        recurring: &snap.recurring,
        debts: &snap.debts,
        transactions: &snap.transactions,
        include_variable: !sub.get_flag("no-variable"),
    };
    Ok(project(input, today, months))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let snap = Snapshot::load(conn)?;
    let s = recurring_summary(&snap.recurring);
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = snap
        .recurring
        .iter()
        .filter(|r| r.is_active)
        .map(|r| {
            vec![
                r.name.clone(),
                r.transaction_type.to_string(),
                r.frequency.to_string(),
                fmt_money(&r.amount, &ccy),
                fmt_money(&monthly_equivalent(r.amount, r.frequency), &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Type", "Frequency", "Amount", "Per month"], rows)
    );
    println!(
        "Monthly income: {}  Monthly expenses: {}  Net: {}",
        fmt_money(&s.monthly_income, &ccy),
        fmt_money(&s.monthly_expense, &ccy),
        fmt_money(&s.net, &ccy)
    );
    Ok(())
}

fn projection(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let report = query_projection(conn, sub)?;
    // jsonl streams one month per line
    if maybe_print_json(false, jsonl_flag, &report.projections)?
        || maybe_print_json(json_flag, false, &report)?
    {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = report
        .projections
        .iter()
        .map(|p| {
            vec![
                p.month_name.clone(),
                fmt_money(&p.projected_income, &ccy),
                fmt_money(&p.projected_expenses, &ccy),
                fmt_money(&p.net_balance, &ccy),
                fmt_money(&p.cumulative_balance, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Net", "Cumulative"], rows)
    );
    println!(
        "Average net: {}  Savings rate: {:.1}%  Negative months: {}",
        fmt_money(&report.average_net_balance, &ccy),
        report.savings_rate,
        report.negative_months
    );
    Ok(())
}
