// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Goal, GoalStatus, Transfer};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sum of in-progress goal funds earmarked on `account_id`.
pub fn committed_from_goals(account_id: i64, goals: &[Goal]) -> Decimal {
    goals
        .iter()
        .filter(|g| g.account_id == Some(account_id) && g.status == GoalStatus::InProgress)
        .map(|g| g.current_amount)
        .sum()
}

pub fn committed(account: &Account, goals: &[Goal]) -> Decimal {
    account
        .committed_to_goals
        .unwrap_or_else(|| committed_from_goals(account.id, goals))
}

pub fn available_balance(account: &Account, goals: &[Goal]) -> Decimal {
    account.balance - committed(account, goals)
}

pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub account_id: i64,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
    pub committed_to_goals: Decimal,
    pub available_balance: Decimal,
}

pub fn account_balances(accounts: &[Account], goals: &[Goal]) -> Vec<AccountBalance> {
    accounts
        .iter()
        .map(|a| {
            let c = committed(a, goals);
            AccountBalance {
                account_id: a.id,
                name: a.name.clone(),
                currency: a.currency.clone(),
                balance: a.balance,
                committed_to_goals: c,
                available_balance: a.balance - c,
            }
        })
        .collect()
}

/// Transfers touching `account_id` (all of them when `None`), newest first.
pub fn transfers_for(transfers: &[Transfer], account_id: Option<i64>) -> Vec<Transfer> {
    let mut out: Vec<Transfer> = transfers
        .iter()
        .filter(|t| {
            account_id.is_none_or(|id| t.from_account_id == id || t.to_account_id == id)
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        b.transfer_date
            .cmp(&a.transfer_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferFlow {
    pub incoming: Decimal,
    pub outgoing: Decimal,
    pub net: Decimal,
}

/// Money moved into and out of one account. A transfer to itself nets to zero.
pub fn transfer_flow(transfers: &[Transfer], account_id: i64) -> TransferFlow {
    let mut flow = TransferFlow::default();
    for t in transfers {
        if t.to_account_id == account_id {
            flow.incoming += t.amount;
        }
        if t.from_account_id == account_id {
            flow.outgoing += t.amount;
        }
    }
    flow.net = flow.incoming - flow.outgoing;
    flow
}
