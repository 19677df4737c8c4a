// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Buckets for the transaction timeline: today, yesterday, the trailing
//! seven days, then one bucket per calendar month (`YYYY-MM`).

use crate::models::Transaction;
use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub const WEEK_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Today,
    Yesterday,
    ThisWeek,
    Month(String),
}

impl GroupKey {
    pub fn as_str(&self) -> &str {
        match self {
            GroupKey::Today => "today",
            GroupKey::Yesterday => "yesterday",
            GroupKey::ThisWeek => "this-week",
            GroupKey::Month(m) => m,
        }
    }

    fn rank(&self) -> Option<usize> {
        match self {
            GroupKey::Today => Some(0),
            GroupKey::Yesterday => Some(1),
            GroupKey::ThisWeek => Some(2),
            GroupKey::Month(_) => None,
        }
    }

    pub fn label(&self, today: NaiveDate) -> String {
        match self {
            GroupKey::Today => format!("Today - {}", today.format("%A, %-d %B %Y")),
            GroupKey::Yesterday => {
                let y = today - Duration::days(1);
                format!("Yesterday - {}", y.format("%A, %-d %B %Y"))
            }
            GroupKey::ThisWeek => "This week".to_string(),
            GroupKey::Month(m) => NaiveDate::parse_from_str(&format!("{}-01", m), "%Y-%m-%d")
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_else(|_| m.clone()),
        }
    }
}

impl Ord for GroupKey {
    /// Fixed buckets first in their own order, then months newest first.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => other.as_str().cmp(self.as_str()),
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub fn group_key(date: NaiveDate, today: NaiveDate) -> GroupKey {
    if date == today {
        return GroupKey::Today;
    }
    if date == today - Duration::days(1) {
        return GroupKey::Yesterday;
    }
    if date >= today - Duration::days(WEEK_WINDOW_DAYS) {
        return GroupKey::ThisWeek;
    }
    GroupKey::Month(date.format("%Y-%m").to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionGroup {
    pub key: GroupKey,
    pub label: String,
    pub count: usize,
    pub transactions: Vec<Transaction>,
}

pub fn group_transactions(transactions: &[Transaction], today: NaiveDate) -> Vec<TransactionGroup> {
    let mut buckets: BTreeMap<GroupKey, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        buckets
            .entry(group_key(tx.transaction_date, today))
            .or_default()
            .push(tx.clone());
    }
    buckets
        .into_iter()
        .map(|(key, mut items)| {
            items.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
            TransactionGroup {
                label: key.label(today),
                count: items.len(),
                key,
                transactions: items,
            }
        })
        .collect()
}
