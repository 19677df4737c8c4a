// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::investment::{investment_summary, investment_view, InvestmentView};
use crate::models::{Investment, InvestmentKind};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::{maybe_print_json, output_flags, pretty_table, today_from};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn load_filtered(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Investment>> {
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<InvestmentKind>()?),
        None => None,
    };
    let all: Vec<Investment> = store::load(conn, Resource::Investments)?;
    Ok(all
        .into_iter()
        .filter(|i| kind.is_none_or(|k| i.investment_type == k))
        .collect())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<InvestmentView>> {
    let today = today_from(sub)?;
    let items = load_filtered(conn, sub)?;
    Ok(items.iter().map(|i| investment_view(i, today)).collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let today = today_from(sub)?;
    let items = load_filtered(conn, sub)?;
    let data: Vec<InvestmentView> = items.iter().map(|i| investment_view(i, today)).collect();
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No investments. Run `finboard sync` first.");
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|v| {
            let progress = match v.kind {
                InvestmentKind::Goal => format!("{:.1}%", v.percentage),
                InvestmentKind::Insurance => fmt_money(&v.gain, &ccy),
            };
            vec![
                v.name.clone(),
                v.kind.to_string(),
                v.institution.clone().unwrap_or_default(),
                fmt_money(&v.current_amount, &ccy),
                v.target_amount
                    .map(|t| fmt_money(&t, &ccy))
                    .unwrap_or_default(),
                progress,
                fmt_money(&v.projected_final_value, &ccy),
                v.maturity_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Name",
                "Type",
                "Institution",
                "Current",
                "Target",
                "Progress/Gain",
                "Projected",
                "Matures"
            ],
            rows
        )
    );
    let s = investment_summary(&items);
    println!(
        "Active: {}  Invested: {}  Current: {}  Projected at maturity: {}",
        s.active,
        fmt_money(&s.invested, &ccy),
        fmt_money(&s.current, &ccy),
        fmt_money(&s.projected_final, &ccy)
    );
    Ok(())
}
