// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::trends::{budgeted_categories, category_trend, trend_window, CategoryTrend};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::Snapshot;
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("category", sub)) => show(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<CategoryTrend> {
    let today = today_from(sub)?;
    let id = *sub.get_one::<i64>("id").context("Missing category id")?;
    let months = trend_window(*sub.get_one::<u32>("months").context("Missing '--months'")?)?;
    let snap = Snapshot::load(conn)?;
    let category = snap
        .categories
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("Category {} not found. Run `finboard sync --only categories`.", id))?;
    Ok(category_trend(
        category,
        &snap.transactions,
        &snap.budgets,
        months,
        today,
    ))
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let t = query_trend(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &t)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    println!("{}: last {} months", t.category_name, t.period_months);
    let rows: Vec<Vec<String>> = t
        .monthly_data
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                fmt_money(&m.amount, &ccy),
                m.change_percentage
                    .map(|p| format!("{:+.2}%", p))
                    .unwrap_or_default(),
                m.vs_previous.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Spent", "Change", "Trend"], rows)
    );
    println!(
        "Total: {}  Average: {}",
        fmt_money(&t.total_spending, &ccy),
        fmt_money(&t.average_spending, &ccy)
    );
    if let Some(limit) = t.budget_reference {
        println!("Budget: {}", fmt_money(&limit, &ccy));
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let snap = Snapshot::load(conn)?;
    let cats = budgeted_categories(&snap.categories, &snap.budgets);
    if maybe_print_json(json_flag, jsonl_flag, &cats)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = cats
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.icon.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Category", "Icon"], rows));
    Ok(())
}
