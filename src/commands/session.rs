// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::{Session, Theme};
use crate::utils::{maybe_print_json, output_flags, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut session = Session::load(conn)?;
    match m.subcommand() {
        Some(("show", sub)) => show(&session, sub)?,
        Some(("set-url", sub)) => {
            session.set_api_url(required(sub, "url")?);
            session.save(conn)?;
            println!("API URL set to {}", session.api_url);
        }
        Some(("set-token", sub)) => {
            session.access_token = Some(required(sub, "access")?.trim().to_string());
            if let Some(r) = sub.get_one::<String>("refresh") {
                session.refresh_token = Some(r.trim().to_string());
            }
            session.save(conn)?;
            info!("access token stored");
            println!("Token saved");
        }
        Some(("theme", sub)) => {
            session.theme = match sub.get_one::<String>("theme").map(|s| s.as_str()) {
                None | Some("toggle") => session.theme.toggled(),
                Some(s) => s.parse::<Theme>()?,
            };
            session.save(conn)?;
            println!("Theme: {}", session.theme);
        }
        Some(("currency", sub)) => {
            session.currency = required(sub, "code")?.trim().to_ascii_uppercase();
            session.save(conn)?;
            println!("Display currency: {}", session.currency);
        }
        Some(("logout", _)) => {
            session.clear_tokens();
            session.save(conn)?;
            info!("tokens cleared");
            println!("Logged out");
        }
        _ => {}
    }
    Ok(())
}

fn show(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, session)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["API URL", "Authenticated", "Theme", "Currency"],
            vec![vec![
                session.api_url.clone(),
                if session.is_authenticated() { "yes" } else { "no" }.to_string(),
                session.theme.to_string(),
                session.currency.clone(),
            ]],
        )
    );
    Ok(())
}
