// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::query_rows;
use crate::error::FinanceError;
use crate::money::round_currency;
use crate::utils::required;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        return Err(FinanceError::UnknownChoice {
            field: "export format",
            value: fmt,
        })
        .context("Use csv or json");
    }

    let rows = query_rows(conn, sub)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "date", "account", "description", "type", "amount", "category",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.transaction_date.to_string(),
                    t.account_name.clone(),
                    t.description.clone().unwrap_or_default(),
                    t.r#type.to_string(),
                    format!("{:.2}", round_currency(t.amount)),
                    t.category_name.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.transaction_date.to_string(),
                        "account": t.account_name,
                        "description": t.description,
                        "type": t.r#type.to_string(),
                        "amount": format!("{:.2}", round_currency(t.amount)),
                        "category": t.category_name,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    info!(count = rows.len(), path = %out, "transactions exported");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
