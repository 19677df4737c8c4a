// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::accounts::{account_balances, total_balance, AccountBalance};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::Snapshot;
use crate::utils::{maybe_print_json, output_flags, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_rows(snap: &Snapshot) -> Vec<AccountBalance> {
    account_balances(&snap.accounts, &snap.goals)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let snap = Snapshot::load(conn)?;
    let data = query_rows(&snap);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                fmt_money(&a.balance, &a.currency),
                fmt_money(&a.committed_to_goals, &a.currency),
                fmt_money(&a.available_balance, &a.currency),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Account", "Balance", "Committed", "Available"], rows)
    );
    let ccy = Session::load(conn)?.currency;
    println!("Total balance: {}", fmt_money(&total_balance(&snap.accounts), &ccy));
    Ok(())
}
