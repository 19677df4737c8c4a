// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::calc::debt::{
    debt_progress, upcoming_payments, DebtProgress, UpcomingPayment, UPCOMING_HORIZON_DAYS,
};
use crate::commands::loan::{loan_args, print_quote, quote_from_args};
use crate::models::{Debt, DebtDraft};
use crate::money::{fmt_money, parse_amount};
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::{
    maybe_print_json, output_flags, parse_date, pretty_table, required, today_from,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("upcoming", sub)) => upcoming(conn, sub)?,
        Some(("create", sub)) => create(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<DebtProgress>> {
    let today = today_from(sub)?;
    let debts: Vec<Debt> = store::load(conn, Resource::Debts)?;
    Ok(debts.iter().map(|d| debt_progress(d, today)).collect())
}

pub fn query_upcoming(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<UpcomingPayment>> {
    let today = today_from(sub)?;
    let debts: Vec<Debt> = store::load(conn, Resource::Debts)?;
    Ok(upcoming_payments(&debts, today, UPCOMING_HORIZON_DAYS))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = query_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|d| {
            vec![
                d.creditor.clone(),
                fmt_money(&d.monthly_payment, &ccy),
                fmt_money(&d.total_amount, &ccy),
                fmt_money(&d.amount_paid, &ccy),
                fmt_money(&d.remaining, &ccy),
                format!("{:.1}%", d.percentage),
                if d.is_paid() {
                    "paid".to_string()
                } else {
                    d.payments_remaining.to_string()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Creditor", "Monthly", "Total", "Paid", "Remaining", "Progress", "Payments left"],
            rows
        )
    );
    Ok(())
}

fn upcoming(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = query_upcoming(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = Session::load(conn)?.currency;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|p| {
            vec![
                p.creditor.clone(),
                p.next_payment_date.to_string(),
                format!("{} d", p.days_until_due),
                fmt_money(&p.payment_amount, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Creditor", "Due", "In", "Amount"], rows));
    Ok(())
}

pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<DebtDraft> {
    let a = loan_args(sub)?;
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => today_from(sub)?,
    };
    Ok(DebtDraft {
        creditor_name: required(sub, "creditor")?.trim().to_string(),
        principal_amount: parse_amount(required(sub, "principal")?)?,
        interest_rate: parse_amount(required(sub, "rate")?)?,
        interest_type: a.method,
        term_months: a.months,
        start_date,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    // Validates the loan terms before anything is sent.
    let quote = quote_from_args(sub)?;
    let draft = draft_from_args(sub)?;
    let session = Session::load(conn)?;
    let client = ApiClient::new(&session)?;
    let debt = client.create_debt(&draft)?;
    println!("Created debt #{} with {}", debt.id, debt.creditor_name);
    print_quote(sub, &quote)
}
