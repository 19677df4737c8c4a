// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed monthly payment for a loan under the two interest methods the
//! backend stores.
//!
//! - **Simple**: interest is computed once over the whole term
//!   (`P × r × t`) and the total is split into equal installments.
//! - **Amortized**: the standard annuity payment,
//!   `PMT = P · i(1 + i)^n / ((1 + i)^n − 1)` with `i` the monthly rate.
//!
//! Arithmetic is `f64` without intermediate rounding; callers round to cents
//! with [`monthly_payment_for_storage`] before persisting.

use crate::error::FinanceError;
use crate::money::to_money;
use rust_decimal::Decimal;
use serde::Serialize;

pub use crate::models::InterestType;

fn validate(principal: f64, annual_rate_percent: f64, months: u32) -> Result<(), FinanceError> {
    if months == 0 {
        return Err(FinanceError::loan("term must be at least one month"));
    }
    if !principal.is_finite() || principal <= 0.0 {
        return Err(FinanceError::loan(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(FinanceError::loan(format!(
            "interest rate cannot be negative, got {}",
            annual_rate_percent
        )));
    }
    Ok(())
}

/// Monthly installment for `principal` borrowed at `annual_rate_percent`
/// (e.g. `12.0` for 12%) over `months`.
///
/// # Errors
///
/// Returns [`FinanceError::InvalidLoanParameters`] when `months` is zero, the
/// principal is not positive, the rate is negative or not finite, or the
/// resulting payment overflows.
pub fn calculate_monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    months: u32,
    method: InterestType,
) -> Result<f64, FinanceError> {
    validate(principal, annual_rate_percent, months)?;
    let n = f64::from(months);

    let payment = match method {
        InterestType::Simple => {
            let total_interest = principal * (annual_rate_percent / 100.0) * (n / 12.0);
            (principal + total_interest) / n
        }
        InterestType::Amortized => {
            if annual_rate_percent == 0.0 {
                principal / n
            } else {
                // P·i / (1 − (1 + i)^−n), in a form that neither overflows
                // for long terms nor cancels for tiny rates.
                let monthly_rate = annual_rate_percent / 100.0 / 12.0;
                let discount = -(-n * monthly_rate.ln_1p()).exp_m1();
                principal * monthly_rate / discount
            }
        }
    };
    if !payment.is_finite() {
        return Err(FinanceError::loan(format!(
            "payment is not representable for principal {} over {} months",
            principal, months
        )));
    }
    Ok(payment)
}

/// The payment rounded to cents, as sent in `monthly_payment` when a debt is created.
pub fn monthly_payment_for_storage(
    principal: f64,
    annual_rate_percent: f64,
    months: u32,
    method: InterestType,
) -> Result<Decimal, FinanceError> {
    let p = calculate_monthly_payment(principal, annual_rate_percent, months, method)?;
    to_money(p)
}

/// Summary shown before a debt is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuote {
    pub method: InterestType,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_amount: f64,
    /// Total interest as a percentage of the principal.
    pub interest_ratio_percent: f64,
}

pub fn quote_loan(
    principal: f64,
    annual_rate_percent: f64,
    months: u32,
    method: InterestType,
) -> Result<LoanQuote, FinanceError> {
    let monthly_payment = calculate_monthly_payment(principal, annual_rate_percent, months, method)?;
    let total_interest = monthly_payment * f64::from(months) - principal;
    if !total_interest.is_finite() {
        return Err(FinanceError::loan("total repaid is not representable"));
    }
    Ok(LoanQuote {
        method,
        monthly_payment,
        total_interest,
        total_amount: principal + total_interest,
        interest_ratio_percent: total_interest / principal * 100.0,
    })
}
