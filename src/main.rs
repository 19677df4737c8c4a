// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use finboard::{cli, commands, db, log::init_logging};

fn run(matches: &clap::ArgMatches) -> Result<()> {
    // loan quotes are pure; no store needed
    if let Some(("loan", sub)) = matches.subcommand() {
        return commands::loan::handle(sub);
    }

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("session", sub)) => commands::session::handle(&conn, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&conn, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&conn, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("transfer", sub)) => commands::transfers::handle(&conn, sub)?,
        Some(("investment", sub)) => commands::investments::handle(&conn, sub)?,
        Some(("trends", sub)) => commands::trends::handle(&conn, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        tracing::error!(error = %e, "Application failed");
        return Err(e);
    }
    Ok(())
}
