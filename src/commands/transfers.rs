// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::accounts::{transfer_flow, transfers_for, TransferFlow};
use crate::models::Transfer;
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::{maybe_print_json, output_flags, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferListing {
    pub transfers: Vec<Transfer>,
    /// Only when filtered to one account.
    pub flow: Option<TransferFlow>,
}

pub fn query_listing(conn: &Connection, sub: &clap::ArgMatches) -> Result<TransferListing> {
    let account = sub.get_one::<i64>("account").copied();
    let all: Vec<Transfer> = store::load(conn, Resource::Transfers)?;
    Ok(TransferListing {
        transfers: transfers_for(&all, account),
        flow: account.map(|id| transfer_flow(&all, id)),
    })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let listing = query_listing(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &listing)? {
        return Ok(());
    }
    if listing.transfers.is_empty() {
        println!("No transfers.");
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = listing
        .transfers
        .iter()
        .map(|t| {
            vec![
                t.transfer_date.to_string(),
                t.from_account_name.clone(),
                t.to_account_name.clone(),
                fmt_money(&t.amount, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "From", "To", "Amount"], rows));
    if let Some(flow) = listing.flow {
        println!(
            "In: {}  Out: {}  Net: {}",
            fmt_money(&flow.incoming, &ccy),
            fmt_money(&flow.outgoing, &ccy),
            fmt_money(&flow.net, &ccy)
        );
    }
    Ok(())
}
