// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::api::{accept_response, RequestSequencer, SyncOutcome};
use finboard::error::FinanceError;
use finboard::models::Account;
use finboard::store::{self, Resource, Snapshot};
use finboard::db::init_schema;
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

const OLD: &str = r#"[{"id":1,"name":"Checking","type":"bank","balance":"100.00"}]"#;
const NEW: &str = r#"[{"id":1,"name":"Checking","type":"bank","balance":"250.00"}]"#;

#[test]
fn never_fetched_loads_empty() {
    let conn = setup();
    let accounts: Vec<Account> = store::load(&conn, Resource::Accounts).unwrap();
    assert!(accounts.is_empty());
    assert_eq!(store::latest_request_id(&conn).unwrap(), 0);
    let snap = Snapshot::load(&conn).unwrap();
    assert!(snap.transactions.is_empty() && snap.debts.is_empty());
}

#[test]
fn newer_response_replaces_older() {
    let conn = setup();
    store::accept(&conn, Resource::Accounts, 1, OLD).unwrap();
    store::accept(&conn, Resource::Accounts, 2, NEW).unwrap();
    let accounts: Vec<Account> = store::load(&conn, Resource::Accounts).unwrap();
    assert_eq!(accounts[0].balance, dec!(250.00));
    assert_eq!(accounts[0].currency, "USD");
}

#[test]
fn late_response_never_overwrites_newer_state() {
    let conn = setup();
    // request 2 answered first, request 1 arrives late
    store::accept(&conn, Resource::Accounts, 2, NEW).unwrap();
    let err = store::accept(&conn, Resource::Accounts, 1, OLD).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::StaleResponse {
            resource: "accounts".into(),
            request_id: 1,
            latest: 2,
        })
    );
    let accounts: Vec<Account> = store::load(&conn, Resource::Accounts).unwrap();
    assert_eq!(accounts[0].balance, dec!(250.00));

    // same id twice is also stale
    assert!(store::accept(&conn, Resource::Accounts, 2, OLD).is_err());
}

#[test]
fn sequencing_is_per_resource() {
    let conn = setup();
    store::accept(&conn, Resource::Accounts, 5, NEW).unwrap();
    store::accept(&conn, Resource::Goals, 3, "[]").unwrap();
    assert_eq!(store::stored_request_id(&conn, Resource::Goals).unwrap(), Some(3));
    assert_eq!(store::latest_request_id(&conn).unwrap(), 5);
}

#[test]
fn stale_rejection_during_sync_is_not_fatal() {
    let conn = setup();
    store::accept(&conn, Resource::Accounts, 9, NEW).unwrap();
    let outcome = accept_response(&conn, Resource::Accounts, 4, OLD).unwrap();
    assert_eq!(outcome, SyncOutcome::Stale);
    assert!(accept_response(&conn, Resource::Accounts, 10, "not json").is_err());
}

#[test]
fn sequencer_resumes_after_stored_ids() {
    let conn = setup();
    store::accept(&conn, Resource::Debts, 7, "[]").unwrap();
    let seq = RequestSequencer::from_store(&conn).unwrap();
    assert_eq!(seq.next_id(), 8);
    assert_eq!(
        accept_response(&conn, Resource::Debts, seq.next_id(), "[]").unwrap(),
        SyncOutcome::Stored
    );
}

#[test]
fn paginated_bodies_are_unwrapped() {
    let conn = setup();
    let page = format!(r#"{{"count":1,"next":null,"results":{}}}"#, NEW);
    store::accept(&conn, Resource::Accounts, 1, &page).unwrap();
    let accounts: Vec<Account> = store::load(&conn, Resource::Accounts).unwrap();
    assert_eq!(accounts.len(), 1);
}

#[test]
fn resource_names_and_paths() {
    assert_eq!(Resource::RecurringTransactions.path(), "/recurring-transactions/");
    assert_eq!("/debts/".parse::<Resource>().unwrap(), Resource::Debts);
    assert_eq!("recurring".parse::<Resource>().unwrap(), Resource::RecurringTransactions);
    assert!("payees".parse::<Resource>().is_err());
}
