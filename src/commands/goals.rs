// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::goal::{goal_progress, goals_summary, GoalProgress};
use crate::money::fmt_money;
use crate::session::Session;
use crate::store::{self, Resource};
use crate::models::Goal;
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

pub fn query_rows(conn: &Connection) -> Result<Vec<GoalProgress>> {
    let goals: Vec<Goal> = store::load(conn, Resource::Goals)?;
    Ok(goals.iter().map(goal_progress).collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = query_rows(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                fmt_money(&g.current, &ccy),
                fmt_money(&g.target, &ccy),
                g.remaining
                    .map(|r| fmt_money(&r, &ccy))
                    .unwrap_or_else(|| "reached".to_string()),
                format!("{:.1}%", g.percentage),
                g.tier.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Saved", "Target", "Remaining", "Progress", "Tier"],
            rows
        )
    );
    let goals: Vec<Goal> = store::load(conn, Resource::Goals)?;
    let summary = goals_summary(&goals);
    println!(
        "In progress: {}  Completed: {}",
        summary.in_progress, summary.completed
    );
    Ok(())
}
