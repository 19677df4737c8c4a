// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::loan::{quote_loan, InterestType, LoanQuote};
use crate::money::to_f64;
use crate::utils::{maybe_print_json, output_flags, parse_decimal, pretty_table, required};
use anyhow::{Context, Result};

pub struct LoanArgs {
    pub principal: f64,
    pub rate: f64,
    pub months: u32,
    pub method: InterestType,
}

/// Reads `--principal --rate --months --type`, shared by `loan` and `debt create`.
pub fn loan_args(sub: &clap::ArgMatches) -> Result<LoanArgs> {
    let principal = to_f64(parse_decimal(required(sub, "principal")?)?);
    let rate = to_f64(parse_decimal(required(sub, "rate")?)?);
    let months = *sub
        .get_one::<u32>("months")
        .context("Missing required argument '--months'")?;
    let method = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<InterestType>()?,
        None => InterestType::Amortized,
    };
    Ok(LoanArgs {
        principal,
        rate,
        months,
        method,
    })
}

pub fn quote_from_args(sub: &clap::ArgMatches) -> Result<LoanQuote> {
    let a = loan_args(sub)?;
    Ok(quote_loan(a.principal, a.rate, a.months, a.method)?)
}

pub fn print_quote(sub: &clap::ArgMatches, q: &LoanQuote) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, q)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Method", "Monthly payment", "Total interest", "Total amount", "Interest %"],
            vec![vec![
                q.method.to_string(),
                format!("{:.2}", q.monthly_payment),
                format!("{:.2}", q.total_interest),
                format!("{:.2}", q.total_amount),
                format!("{:.2}%", q.interest_ratio_percent),
            ]],
        )
    );
    Ok(())
}

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let q = quote_from_args(sub)?;
    print_quote(sub, &q)
}
