// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Debt, DebtStatus, InterestType};
use crate::money::{round_currency, to_f64};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Months are approximated as 30 days when counting elapsed installments.
pub const DAYS_PER_MONTH: i64 = 30;
pub const UPCOMING_HORIZON_DAYS: i64 = 15;

/// Colour band shared by debt and goal progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Low,
    Medium,
    High,
    Complete,
}

impl ProgressTier {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 100.0 {
            ProgressTier::Complete
        } else if pct >= 75.0 {
            ProgressTier::High
        } else if pct >= 50.0 {
            ProgressTier::Medium
        } else {
            ProgressTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressTier::Low => "low",
            ProgressTier::Medium => "medium",
            ProgressTier::High => "high",
            ProgressTier::Complete => "complete",
        }
    }
}

/// Interest over the full term. Arithmetic saturates at [`Decimal::MAX`]
/// instead of overflowing on implausible server values.
pub fn total_interest(debt: &Debt) -> Decimal {
    let term = Decimal::from(debt.term_months);
    let interest = match debt.interest_type {
        InterestType::Simple => debt
            .principal_amount
            .checked_mul(debt.interest_rate / Decimal::ONE_HUNDRED)
            .and_then(|x| x.checked_mul(term))
            .map(|x| x / Decimal::from(12)),
        InterestType::Amortized => debt
            .monthly_payment
            .checked_mul(term)
            .and_then(|x| x.checked_sub(debt.principal_amount)),
    };
    interest.unwrap_or(Decimal::MAX)
}

pub fn total_amount(debt: &Debt) -> Decimal {
    debt.principal_amount
        .checked_add(total_interest(debt))
        .unwrap_or(Decimal::MAX)
}

pub fn remaining_balance(debt: &Debt) -> Decimal {
    total_amount(debt)
        .checked_sub(debt.amount_paid)
        .unwrap_or(Decimal::MAX)
}

/// Server-supplied progress wins; otherwise `paid / total × 100`.
pub fn payment_progress(debt: &Debt) -> f64 {
    if let Some(p) = debt.payment_progress {
        return p;
    }
    let total = total_amount(debt);
    if total > Decimal::ZERO {
        to_f64(debt.amount_paid) / to_f64(total) * 100.0
    } else {
        0.0
    }
}

pub fn months_elapsed(start: NaiveDate, now: NaiveDate) -> u32 {
    let days = (now - start).num_days();
    if days <= 0 {
        return 0;
    }
    (days / DAYS_PER_MONTH) as u32
}

pub fn months_remaining(debt: &Debt, now: NaiveDate) -> u32 {
    debt.term_months.saturating_sub(months_elapsed(debt.start_date, now))
}

pub fn payments_remaining(remaining: Decimal, monthly_payment: Decimal) -> u32 {
    if remaining <= Decimal::ZERO || monthly_payment <= Decimal::ZERO {
        return 0;
    }
    remaining
        .checked_div(monthly_payment)
        .and_then(|n| n.ceil().to_u32())
        .unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtProgress {
    pub id: i64,
    pub creditor: String,
    pub status: DebtStatus,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub remaining: Decimal,
    pub percentage: f64,
    pub display_percentage: f64,
    pub tier: ProgressTier,
    pub months_elapsed: u32,
    pub months_remaining: u32,
    pub payments_remaining: u32,
}

impl DebtProgress {
    pub fn is_paid(&self) -> bool {
        self.percentage >= 100.0
    }
}

pub fn debt_progress(debt: &Debt, now: NaiveDate) -> DebtProgress {
    let total = total_amount(debt);
    let remaining = remaining_balance(debt);
    let percentage = payment_progress(debt);
    DebtProgress {
        id: debt.id,
        creditor: debt.creditor_name.clone(),
        status: debt.status,
        monthly_payment: debt.monthly_payment,
        total_interest: round_currency(total_interest(debt)),
        total_amount: round_currency(total),
        amount_paid: debt.amount_paid,
        remaining: round_currency(remaining),
        percentage,
        display_percentage: percentage.min(100.0),
        tier: ProgressTier::from_percentage(percentage),
        months_elapsed: months_elapsed(debt.start_date, now),
        months_remaining: months_remaining(debt, now),
        payments_remaining: payments_remaining(remaining, debt.monthly_payment),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingPayment {
    pub debt_id: i64,
    pub creditor: String,
    pub next_payment_date: NaiveDate,
    pub payment_amount: Decimal,
    pub days_until_due: i64,
}

/// Active debts whose next installment falls within `horizon_days`, soonest
/// first, at most five. Installments are assumed due on the start date's day
/// of month.
pub fn upcoming_payments(debts: &[Debt], today: NaiveDate, horizon_days: i64) -> Vec<UpcomingPayment> {
    let mut out: Vec<UpcomingPayment> = debts
        .iter()
        .filter(|d| d.status == DebtStatus::Active)
        .filter_map(|d| {
            let diff = i64::from(d.start_date.day()) - i64::from(today.day());
            let days_until = diff.rem_euclid(DAYS_PER_MONTH);
            if days_until > horizon_days {
                return None;
            }
            let due_in = days_until.max(1);
            Some(UpcomingPayment {
                debt_id: d.id,
                creditor: d.creditor_name.clone(),
                next_payment_date: today + chrono::Duration::days(due_in),
                payment_amount: d.monthly_payment,
                days_until_due: due_in,
            })
        })
        .collect();
    out.sort_by_key(|p| p.days_until_due);
    out.truncate(5);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt(kind: InterestType, payment: Decimal, paid: Decimal) -> Debt {
        Debt {
            id: 1,
            creditor_name: "Bank".into(),
            principal_amount: dec!(1000),
            interest_rate: dec!(12),
            interest_type: kind,
            term_months: 12,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            monthly_payment: payment,
            amount_paid: paid,
            status: DebtStatus::Active,
            notes: None,
            payment_progress: None,
        }
    }

    #[test]
    fn simple_debt_totals() {
        let d = debt(InterestType::Simple, dec!(93.33), dec!(560));
        assert_eq!(total_interest(&d), dec!(120));
        assert_eq!(total_amount(&d), dec!(1120));
        assert_eq!(remaining_balance(&d), dec!(560));
        assert!((payment_progress(&d) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn amortized_interest_comes_from_stored_payment() {
        let d = debt(InterestType::Amortized, dec!(88.85), dec!(0));
        assert_eq!(total_interest(&d), dec!(66.20));
        assert_eq!(payment_progress(&d), 0.0);
    }

    #[test]
    fn server_progress_passes_through() {
        let mut d = debt(InterestType::Simple, dec!(93.33), dec!(0));
        d.payment_progress = Some(42.5);
        assert_eq!(payment_progress(&d), 42.5);
    }

    #[test]
    fn months_use_thirty_day_approximation() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(months_elapsed(start, NaiveDate::from_ymd_opt(2026, 1, 30).unwrap()), 0);
        assert_eq!(months_elapsed(start, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()), 1);
        assert_eq!(months_elapsed(start, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()), 12);
        assert_eq!(months_elapsed(start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()), 0);

        let d = debt(InterestType::Simple, dec!(93.33), dec!(0));
        assert_eq!(months_remaining(&d, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()), 0);
    }

    #[test]
    fn payments_remaining_rounds_up() {
        assert_eq!(payments_remaining(dec!(560), dec!(93.33)), 7);
        assert_eq!(payments_remaining(dec!(186.66), dec!(93.33)), 2);
        assert_eq!(payments_remaining(dec!(0), dec!(93.33)), 0);
        assert_eq!(payments_remaining(dec!(10), dec!(0)), 0);
    }

    #[test]
    fn progress_view_for_paid_debt() {
        let d = debt(InterestType::Simple, dec!(93.33), dec!(1120));
        let p = debt_progress(&d, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert!(p.is_paid());
        assert_eq!(p.tier, ProgressTier::Complete);
        assert_eq!(p.payments_remaining, 0);
        assert_eq!(p.months_elapsed, 1);
        assert_eq!(p.months_remaining, 11);
    }

    #[test]
    fn extreme_server_values_saturate() {
        let mut d = debt(InterestType::Amortized, Decimal::MAX, dec!(0));
        d.term_months = 360;
        assert_eq!(total_interest(&d), Decimal::MAX);
        assert_eq!(total_amount(&d), Decimal::MAX);
        d.interest_type = InterestType::Simple;
        d.principal_amount = Decimal::MAX;
        d.interest_rate = dec!(900);
        assert_eq!(total_interest(&d), Decimal::MAX);
        let p = debt_progress(&d, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(p.remaining, Decimal::MAX);
        assert_eq!(payments_remaining(Decimal::MAX, dec!(0.0000000001)), u32::MAX);
    }

    #[test]
    fn tiers() {
        assert_eq!(ProgressTier::from_percentage(49.9), ProgressTier::Low);
        assert_eq!(ProgressTier::from_percentage(50.0), ProgressTier::Medium);
        assert_eq!(ProgressTier::from_percentage(75.0), ProgressTier::High);
        assert_eq!(ProgressTier::from_percentage(130.0), ProgressTier::Complete);
    }

    #[test]
    fn upcoming_payments_within_horizon() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let mut soon = debt(InterestType::Simple, dec!(50), dec!(0));
        soon.start_date = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let mut due_today = debt(InterestType::Simple, dec!(70), dec!(0));
        due_today.id = 2;
        due_today.start_date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut far = debt(InterestType::Simple, dec!(90), dec!(0));
        far.id = 3;
        far.start_date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut paid = soon.clone();
        paid.id = 4;
        paid.status = DebtStatus::Paid;

        let up = upcoming_payments(&[soon, due_today, far, paid], today, UPCOMING_HORIZON_DAYS);
        assert_eq!(up.len(), 2);
        assert_eq!(up[0].debt_id, 2);
        assert_eq!(up[0].days_until_due, 1);
        assert_eq!(up[1].debt_id, 1);
        assert_eq!(up[1].days_until_due, 6);
        assert_eq!(up[1].next_payment_date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }
}
