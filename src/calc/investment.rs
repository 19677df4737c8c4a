// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals and investment policies held on the `/investments/`
//! resource. Policy returns are straight-line over the maturity term:
//! `initial × rate/100 × years`, with one year assumed when no term is set.

use crate::calc::debt::ProgressTier;
use crate::calc::goal::{goal_percentage, GoalProgress, GoalSource};
use crate::models::{Investment, InvestmentKind, InvestmentStatus};
use crate::money::round_currency;
use crate::utils::add_months;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// `current / target × 100` for savings goals; policies have no target.
pub fn progress_percentage(inv: &Investment) -> f64 {
    match (inv.investment_type, inv.target_amount) {
        (InvestmentKind::Goal, Some(target)) => goal_percentage(inv.current_amount, target),
        _ => 0.0,
    }
}

pub fn projected_return(inv: &Investment) -> Decimal {
    let Some(rate) = inv.expected_return_rate else {
        return Decimal::ZERO;
    };
    if rate.is_zero() || inv.initial_amount.is_zero() {
        return Decimal::ZERO;
    }
    let months = Decimal::from(inv.maturity_term_months.unwrap_or(12));
    inv.initial_amount
        .checked_mul(rate / Decimal::ONE_HUNDRED)
        .and_then(|x| x.checked_mul(months))
        .map(|x| round_currency(x / Decimal::from(12)))
        .unwrap_or(Decimal::MAX)
}

pub fn projected_final_value(inv: &Investment) -> Decimal {
    inv.initial_amount
        .checked_add(projected_return(inv))
        .unwrap_or(Decimal::MAX)
}

/// Explicit maturity date, else start date plus the term.
pub fn maturity(inv: &Investment) -> Option<NaiveDate> {
    inv.maturity_date.or_else(|| {
        let term = i32::try_from(inv.maturity_term_months?).ok()?;
        add_months(inv.start_date, term)
    })
}

/// An investment as a row on the goals board: savings goals count against
/// their target, policies against the amount first invested.
pub fn investment_goal_progress(inv: &Investment) -> GoalProgress {
    let target = match inv.investment_type {
        InvestmentKind::Goal => inv.target_amount.unwrap_or(Decimal::ZERO),
        InvestmentKind::Insurance => inv.initial_amount,
    };
    GoalProgress::towards(
        inv.id,
        GoalSource::Investment,
        &inv.name,
        inv.current_amount,
        target,
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentView {
    pub id: i64,
    pub name: String,
    pub kind: InvestmentKind,
    pub status: InvestmentStatus,
    pub institution: Option<String>,
    pub initial_amount: Decimal,
    pub current_amount: Decimal,
    pub target_amount: Option<Decimal>,
    pub percentage: f64,
    pub display_percentage: f64,
    pub tier: ProgressTier,
    /// Growth over the amount first invested.
    pub gain: Decimal,
    pub projected_return: Decimal,
    pub projected_final_value: Decimal,
    pub maturity_date: Option<NaiveDate>,
    /// Negative once matured.
    pub days_to_maturity: Option<i64>,
}

pub fn investment_view(inv: &Investment, today: NaiveDate) -> InvestmentView {
    let percentage = progress_percentage(inv);
    let maturity_date = maturity(inv);
    InvestmentView {
        id: inv.id,
        name: inv.name.clone(),
        kind: inv.investment_type,
        status: inv.status,
        institution: inv.institution_name.clone(),
        initial_amount: inv.initial_amount,
        current_amount: inv.current_amount,
        target_amount: inv.target_amount,
        percentage,
        display_percentage: percentage.min(100.0),
        tier: ProgressTier::from_percentage(percentage),
        gain: inv
            .current_amount
            .checked_sub(inv.initial_amount)
            .unwrap_or(Decimal::MIN),
        projected_return: projected_return(inv),
        projected_final_value: projected_final_value(inv),
        maturity_date,
        days_to_maturity: maturity_date.map(|d| (d - today).num_days()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvestmentSummary {
    pub active: usize,
    pub invested: Decimal,
    pub current: Decimal,
    pub projected_final: Decimal,
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Totals over active investments only.
pub fn investment_summary(items: &[Investment]) -> InvestmentSummary {
    items
        .iter()
        .filter(|i| i.status == InvestmentStatus::Active)
        .fold(InvestmentSummary::default(), |mut acc, i| {
            acc.active += 1;
            acc.invested = saturating_add(acc.invested, i.initial_amount);
            acc.current = saturating_add(acc.current, i.current_amount);
            acc.projected_final = saturating_add(acc.projected_final, projected_final_value(i));
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn policy(initial: Decimal, rate: Option<Decimal>, term: Option<u32>) -> Investment {
        Investment {
            id: 1,
            investment_type: InvestmentKind::Insurance,
            name: "Policy".into(),
            account_id: None,
            initial_amount: initial,
            current_amount: initial,
            target_amount: None,
            institution_name: Some("Insurer".into()),
            expected_return_rate: rate,
            maturity_term_months: term,
            maturity_date: None,
            start_date: d(2026, 1, 15),
            deadline: None,
            status: InvestmentStatus::Active,
        }
    }

    fn saving(current: Decimal, target: Option<Decimal>) -> Investment {
        Investment {
            investment_type: InvestmentKind::Goal,
            name: "Fund".into(),
            current_amount: current,
            initial_amount: Decimal::ZERO,
            target_amount: target,
            institution_name: None,
            expected_return_rate: None,
            maturity_term_months: None,
            ..policy(Decimal::ZERO, None, None)
        }
    }

    #[test]
    fn policy_return_is_straight_line_over_term() {
        let p = policy(dec!(10000), Some(dec!(8)), Some(18));
        assert_eq!(projected_return(&p), dec!(1200.00));
        assert_eq!(projected_final_value(&p), dec!(11200.00));
        assert_eq!(maturity(&p), Some(d(2027, 7, 15)));
    }

    #[test]
    fn policy_without_term_assumes_one_year() {
        let p = policy(dec!(5000), Some(dec!(6.5)), None);
        assert_eq!(projected_return(&p), dec!(325.00));
        assert_eq!(maturity(&p), None);
        assert_eq!(projected_return(&policy(dec!(5000), None, Some(12))), Decimal::ZERO);
        assert_eq!(projected_return(&policy(dec!(0), Some(dec!(9)), Some(12))), Decimal::ZERO);
    }

    #[test]
    fn savings_goal_progress() {
        let g = saving(dec!(300), Some(dec!(1200)));
        assert_eq!(progress_percentage(&g), 25.0);
        assert_eq!(progress_percentage(&saving(dec!(300), None)), 0.0);
        // policies never report goal progress
        assert_eq!(progress_percentage(&policy(dec!(100), None, None)), 0.0);
    }

    #[test]
    fn board_rows_measure_policies_against_initial_amount() {
        let mut p = policy(dec!(1000), Some(dec!(5)), Some(12));
        p.current_amount = dec!(1050);
        let row = investment_goal_progress(&p);
        assert_eq!(row.source, GoalSource::Investment);
        assert!((row.percentage - 105.0).abs() < 1e-9);
        assert_eq!(row.remaining, None);

        let row = investment_goal_progress(&saving(dec!(250), Some(dec!(1000))));
        assert_eq!(row.remaining, Some(dec!(750)));
    }

    #[test]
    fn view_and_summary() {
        let mut p = policy(dec!(1000), Some(dec!(12)), Some(6));
        p.current_amount = dec!(1030);
        let v = investment_view(&p, d(2026, 7, 5));
        assert_eq!(v.gain, dec!(30));
        assert_eq!(v.projected_return, dec!(60.00));
        assert_eq!(v.maturity_date, Some(d(2026, 7, 15)));
        assert_eq!(v.days_to_maturity, Some(10));

        let mut closed = saving(dec!(90), Some(dec!(100)));
        closed.status = InvestmentStatus::Cancelled;
        let s = investment_summary(&[p, saving(dec!(40), Some(dec!(100))), closed]);
        assert_eq!(s.active, 2);
        assert_eq!(s.invested, dec!(1000));
        assert_eq!(s.current, dec!(1070));
        assert_eq!(s.projected_final, dec!(1060.00));
    }
}
