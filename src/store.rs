// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceError;
use crate::models::{
    Account, Budget, Category, Debt, Goal, Investment, RecurringTransaction, Transaction, Transfer,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Accounts,
    Categories,
    Transactions,
    Budgets,
    Goals,
    Debts,
    RecurringTransactions,
    Investments,
    Transfers,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Accounts,
        Resource::Categories,
        Resource::Transactions,
        Resource::Budgets,
        Resource::Goals,
        Resource::Debts,
        Resource::RecurringTransactions,
        Resource::Investments,
        Resource::Transfers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Accounts => "accounts",
            Resource::Categories => "categories",
            Resource::Transactions => "transactions",
            Resource::Budgets => "budgets",
            Resource::Goals => "goals",
            Resource::Debts => "debts",
            Resource::RecurringTransactions => "recurring-transactions",
            Resource::Investments => "investments",
            Resource::Transfers => "transfers",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}/", self.name())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().trim_matches('/').to_ascii_lowercase();
        Resource::ALL
            .iter()
            .copied()
            .find(|r| r.name() == t || (t == "recurring" && *r == Resource::RecurringTransactions))
            .ok_or_else(|| FinanceError::UnknownChoice {
                field: "resource",
                value: s.to_string(),
            })
    }
}

pub fn stored_request_id(conn: &Connection, resource: Resource) -> Result<Option<u64>> {
    let v: Option<i64> = conn
        .query_row(
            "SELECT request_id FROM snapshots WHERE resource=?1",
            params![resource.name()],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.map(|x| x as u64))
}

/// Highest request id ever accepted, used to seed the sequencer.
pub fn latest_request_id(conn: &Connection) -> Result<u64> {
    let v: Option<i64> = conn.query_row("SELECT MAX(request_id) FROM snapshots", [], |r| r.get(0))?;
    Ok(v.unwrap_or(0) as u64)
}

/// Stores `body` as the current mirror of `resource` unless a response from a
/// newer request is already stored, in which case the call fails with
/// [`FinanceError::StaleResponse`] and nothing is written.
pub fn accept(conn: &Connection, resource: Resource, request_id: u64, body: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(body)
        .with_context(|| format!("Response for {} is not valid JSON", resource))?;

    if let Some(latest) = stored_request_id(conn, resource)? {
        if request_id <= latest {
            warn!(%resource, request_id, latest, "discarding superseded response");
            return Err(FinanceError::StaleResponse {
                resource: resource.name().to_string(),
                request_id,
                latest,
            }
            .into());
        }
    }
    conn.execute(
        "INSERT INTO snapshots(resource, request_id, fetched_at, body) VALUES (?1, ?2, datetime('now'), ?3)
         ON CONFLICT(resource) DO UPDATE SET request_id=excluded.request_id, fetched_at=excluded.fetched_at, body=excluded.body",
        params![resource.name(), request_id as i64, body],
    )?;
    debug!(%resource, request_id, bytes = body.len(), "snapshot stored");
    Ok(())
}

/// Records of `resource` from the last accepted body; empty if never fetched.
/// Accepts either a bare JSON array or a paginated `{"results": [...]}` page.
pub fn load<T: DeserializeOwned>(conn: &Connection, resource: Resource) -> Result<Vec<T>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM snapshots WHERE resource=?1",
            params![resource.name()],
            |r| r.get(0),
        )
        .optional()?;
    let Some(body) = body else {
        return Ok(Vec::new());
    };
    let mut value: serde_json::Value = serde_json::from_str(&body)
        .with_context(|| format!("Stored {} snapshot is not valid JSON", resource))?;
    if let Some(results) = value.get_mut("results") {
        value = results.take();
    }
    serde_json::from_value(value).with_context(|| format!("Decode stored {} snapshot", resource))
}

pub fn fetched_at(conn: &Connection, resource: Resource) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT fetched_at FROM snapshots WHERE resource=?1",
            params![resource.name()],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Every mirrored collection, read once per command.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub debts: Vec<Debt>,
    pub recurring: Vec<RecurringTransaction>,
    pub investments: Vec<Investment>,
    pub transfers: Vec<Transfer>,
}

impl Snapshot {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Snapshot {
            accounts: load(conn, Resource::Accounts)?,
            categories: load(conn, Resource::Categories)?,
            transactions: load(conn, Resource::Transactions)?,
            budgets: load(conn, Resource::Budgets)?,
            goals: load(conn, Resource::Goals)?,
            debts: load(conn, Resource::Debts)?,
            recurring: load(conn, Resource::RecurringTransactions)?,
            investments: load(conn, Resource::Investments)?,
            transfers: load(conn, Resource::Transfers)?,
        })
    }
}
