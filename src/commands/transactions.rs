// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::grouping::{group_transactions, TransactionGroup};
use crate::calc::totals::{
    label_categories, sorted, stats, SortOrder, TransactionFilter, TransactionStats,
};
use crate::models::{Category, Transaction, TransactionKind};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("stats", sub)) => print_stats(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<TransactionKind>()?),
        None => None,
    };
    Ok(TransactionFilter {
        kind,
        categories: sub
            .get_many::<i64>("category")
            .map(|v| v.copied().collect())
            .unwrap_or_default(),
        accounts: sub
            .get_many::<i64>("account")
            .map(|v| v.copied().collect())
            .unwrap_or_default(),
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
    })
}

/// Mirrored transactions after the command-line filter and sort.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from_args(sub)?;
    let order = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let mut all: Vec<Transaction> = store::load(conn, Resource::Transactions)?;
    let categories: Vec<Category> = store::load(conn, Resource::Categories)?;
    label_categories(&mut all, &categories);
    Ok(sorted(&filter.apply(&all), order))
}

pub fn query_groups(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionGroup>> {
    let today = today_from(sub)?;
    let rows = query_rows(conn, sub)?;
    Ok(group_transactions(&rows, today))
}

pub fn query_stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<TransactionStats> {
    Ok(stats(&query_rows(conn, sub)?))
}

fn signed(tx: &Transaction, ccy: &str) -> String {
    match tx.r#type {
        TransactionKind::Income => format!("+{}", fmt_money(&tx.amount, ccy)),
        TransactionKind::Expense => format!("-{}", fmt_money(&tx.amount, ccy)),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let groups = query_groups(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &groups)? {
        return Ok(());
    }
    if groups.is_empty() {
        println!("No transactions. Run `finboard sync` first or relax the filters.");
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    for g in groups {
        println!("{} ({})", g.label, g.count);
        let rows: Vec<Vec<String>> = g
            .transactions
            .iter()
            .map(|t| {
                vec![
                    t.transaction_date.to_string(),
                    t.account_name.clone(),
                    t.description.clone().unwrap_or_default(),
                    t.category_name.clone(),
                    signed(t, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Account", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn print_stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let s = query_stats(conn, sub)?;
    #[derive(serde::Serialize)]
    struct Out {
        #[serde(flatten)]
        stats: TransactionStats,
        net: rust_decimal::Decimal,
    }
    let out = Out { stats: s, net: s.net() };
    if !maybe_print_json(json_flag, jsonl_flag, &out)? {
        let ccy = Session::load(conn)?.currency;
        println!(
            "{}",
            pretty_table(
                &["Count", "Income", "Expenses", "Net"],
                vec![vec![
                    s.count.to_string(),
                    fmt_money(&s.income, &ccy),
                    fmt_money(&s.expenses, &ccy),
                    fmt_money(&s.net(), &ccy),
                ]],
            )
        );
    }
    Ok(())
}
