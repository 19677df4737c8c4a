// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::budget::{budget_warnings, current_budgets, BudgetProgress};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::Snapshot;
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => {
            let data = status_rows(conn, sub)?;
            print_rows(conn, sub, &data)?;
        }
        Some(("warnings", sub)) => {
            let data = budget_warnings(&status_rows(conn, sub)?);
            if data.is_empty() && !sub.get_flag("json") && !sub.get_flag("jsonl") {
                println!("All budgets are under 80% of their limit.");
                return Ok(());
            }
            print_rows(conn, sub, &data)?;
        }
        _ => {}
    }
    Ok(())
}

pub fn status_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetProgress>> {
    let today = today_from(sub)?;
    let snap = Snapshot::load(conn)?;
    Ok(current_budgets(&snap.budgets, &snap.transactions, today))
}

fn print_rows(conn: &Connection, sub: &clap::ArgMatches, data: &[BudgetProgress]) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|p| {
            let left = match p.overrun() {
                Some(over) => format!("over by {}", fmt_money(&over, &ccy)),
                None => fmt_money(&p.remaining, &ccy),
            };
            vec![
                p.category.clone(),
                fmt_money(&p.budgeted, &ccy),
                fmt_money(&p.spent, &ccy),
                left,
                format!("{:.1}%", p.percentage),
                p.band.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "Spent", "Remaining", "Used", "Status"],
            rows
        )
    );
    Ok(())
}
