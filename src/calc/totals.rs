// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceError;
use crate::models::{Category, Transaction, TransactionKind};
use std::collections::HashMap;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

pub const DASHBOARD_PERIOD_DAYS: i64 = 30;

pub fn sum_where<F>(transactions: &[Transaction], pred: F) -> Decimal
where
    F: Fn(&Transaction) -> bool,
{
    transactions.iter().filter(|t| pred(t)).map(|t| t.amount).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionStats {
    pub count: usize,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl TransactionStats {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

pub fn stats(transactions: &[Transaction]) -> TransactionStats {
    TransactionStats {
        count: transactions.len(),
        income: sum_where(transactions, |t| t.r#type == TransactionKind::Income),
        expenses: sum_where(transactions, |t| t.r#type == TransactionKind::Expense),
    }
}

/// Income and expenses dated on or after `today - days`.
pub fn period_totals(transactions: &[Transaction], today: NaiveDate, days: i64) -> TransactionStats {
    let threshold = today - Duration::days(days);
    let in_window: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.transaction_date >= threshold)
        .cloned()
        .collect();
    stats(&in_window)
}

/// Fills in `category_name` from the category list where the server left it blank.
pub fn label_categories(transactions: &mut [Transaction], categories: &[Category]) {
    let names: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();
    for t in transactions.iter_mut().filter(|t| t.category_name.is_empty()) {
        if let Some(name) = t.category_id.and_then(|id| names.get(&id)) {
            t.category_name = (*name).to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub categories: Vec<i64>,
    pub accounts: Vec<i64>,
    pub search: String,
}

impl TransactionFilter {
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
            || !self.categories.is_empty()
            || !self.accounts.is_empty()
            || !self.search.is_empty()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if tx.r#type != kind {
                return false;
            }
        }
        // uncategorized rows filter as category 0
        if !self.categories.is_empty() && !self.categories.contains(&tx.category_id.unwrap_or(0)) {
            return false;
        }
        if !self.accounts.is_empty() && !self.accounts.contains(&tx.account_id) {
            return false;
        }
        if !self.search.is_empty() {
            let q = self.search.to_lowercase();
            let hit = tx
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q))
                || tx.category_name.to_lowercase().contains(&q)
                || tx.account_name.to_lowercase().contains(&q);
            return hit;
        }
        true
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl FromStr for SortOrder {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date-desc" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "amount-desc" => Ok(SortOrder::AmountDesc),
            "amount-asc" => Ok(SortOrder::AmountAsc),
            _ => Err(FinanceError::UnknownChoice {
                field: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

pub fn sorted(transactions: &[Transaction], order: SortOrder) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    match order {
        SortOrder::DateDesc => out.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date)),
        SortOrder::DateAsc => out.sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date)),
        SortOrder::AmountDesc => out.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortOrder::AmountAsc => out.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(id: i64, kind: TransactionKind, amount: Decimal, day: u32) -> Transaction {
        Transaction {
            id,
            account_id: if id % 2 == 0 { 2 } else { 1 },
            account_name: if id % 2 == 0 { "Wallet".into() } else { "Checking".into() },
            category_id: if id == 3 { None } else { Some(10) },
            category_name: if id == 3 { String::new() } else { "Groceries".into() },
            r#type: kind,
            amount,
            description: Some(format!("Item {}", id)),
            transaction_date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, TransactionKind::Income, dec!(1500), 1),
            tx(2, TransactionKind::Expense, dec!(42.10), 5),
            tx(3, TransactionKind::Expense, dec!(7.90), 12),
            tx(4, TransactionKind::Income, dec!(60), 13),
        ]
    }

    #[test]
    fn stats_split_by_kind() {
        let s = stats(&sample());
        assert_eq!(s.count, 4);
        assert_eq!(s.income, dec!(1560));
        assert_eq!(s.expenses, dec!(50.00));
        assert_eq!(s.net(), dec!(1510));
        assert_eq!(stats(&[]), TransactionStats::default());
    }

    #[test]
    fn period_window_is_inclusive_of_threshold() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let s = period_totals(&sample(), today, 10);
        // threshold is 2026-10-05
        assert_eq!(s.count, 3);
        assert_eq!(s.income, dec!(60));
        assert_eq!(s.expenses, dec!(50.00));
    }

    #[test]
    fn filter_by_kind_account_and_category() {
        let txs = sample();
        let f = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        };
        assert_eq!(f.apply(&txs).len(), 2);

        let f = TransactionFilter {
            accounts: vec![2],
            ..Default::default()
        };
        assert_eq!(f.apply(&txs).iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4]);

        let f = TransactionFilter {
            categories: vec![0],
            ..Default::default()
        };
        assert_eq!(f.apply(&txs).iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
        assert!(f.is_active());
        assert!(!TransactionFilter::default().is_active());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let txs = sample();
        let by_account = TransactionFilter {
            search: "WALL".into(),
            ..Default::default()
        };
        assert_eq!(by_account.apply(&txs).len(), 2);
        let by_desc = TransactionFilter {
            search: "item 3".into(),
            ..Default::default()
        };
        assert_eq!(by_desc.apply(&txs).len(), 1);
    }

    #[test]
    fn blank_category_names_come_from_categories() {
        let mut txs = sample();
        txs[0].category_name.clear();
        let cats = vec![Category {
            id: 10,
            name: "Food".into(),
            r#type: TransactionKind::Expense,
            icon: None,
        }];
        label_categories(&mut txs, &cats);
        assert_eq!(txs[0].category_name, "Food");
        // server-provided names are kept; uncategorized rows stay blank
        assert_eq!(txs[1].category_name, "Groceries");
        assert_eq!(txs[2].category_name, "");
    }

    #[test]
    fn sorting_leaves_input_untouched() {
        let txs = sample();
        let by_amount = sorted(&txs, SortOrder::AmountDesc);
        assert_eq!(by_amount.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 4, 2, 3]);
        let newest = sorted(&txs, SortOrder::DateDesc);
        assert_eq!(newest[0].id, 4);
        assert_eq!(txs[0].id, 1);
        assert_eq!("amount-asc".parse::<SortOrder>().unwrap(), SortOrder::AmountAsc);
        assert!("random".parse::<SortOrder>().is_err());
    }
}
