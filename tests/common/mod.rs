// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use finboard::db::init_schema;
use finboard::store::{self, Resource};
use rusqlite::Connection;

pub const TODAY: &str = "2026-10-14";

pub const ACCOUNTS: &str = r#"[
  {"id":1,"name":"Checking","type":"bank","balance":"5000.00","currency":"USD"},
  {"id":2,"name":"Card","type":"card","balance":"-300.00","currency":"USD","committed_to_goals":"0.00"}
]"#;

pub const TRANSACTIONS: &str = r#"[
  {"id":1,"account_id":1,"account_name":"Checking","category_id":1,"category_name":"Salary","type":"Income","amount":"3000.00","description":"October salary","transaction_date":"2026-10-14"},
  {"id":2,"account_id":1,"account_name":"Checking","category_id":2,"category_name":"Food","type":"Expense","amount":"45.50","description":"Lunch","transaction_date":"2026-10-13T12:30:00Z"},
  {"id":3,"account_id":1,"account_name":"Checking","category_id":2,"category_name":"Food","type":"Expense","amount":"120.00","description":"Groceries","transaction_date":"2026-10-11"},
  {"id":4,"account_id":2,"account_name":"Card","category_id":3,"category_name":"","type":"Expense","amount":"60.00","description":"Taxi","transaction_date":"2026-10-06"},
  {"id":5,"account_id":1,"account_name":"Checking","category_id":null,"category_name":"","type":"Expense","amount":"200.00","description":"Rent share","transaction_date":"2026-09-20"},
  {"id":6,"account_id":1,"account_name":"Checking","category_id":2,"category_name":"Food","type":"Expense","amount":"80.00","description":null,"transaction_date":"2026-07-01"}
]"#;

pub const BUDGETS: &str = r#"[
  {"id":1,"category_id":2,"category_name":"Food","amount":"200.00","period_start":"2026-10-01","period_end":"2026-10-31","is_recurring":true,"status":"Active"},
  {"id":2,"user":1,"category":3,"category_name":"Transport","category_icon":"car","amount":"50.00","period_start":"2026-10-01","period_end":"2026-10-31","is_recurring":true,"status":"Active","created_at":"2026-10-01T09:00:00Z","updated_at":"2026-10-01T09:00:00Z","spent":75.0,"remaining":-25.0,"percentage":150.0,"days_left":17,"history_count":0,"is_indefinite":false},
  {"id":3,"category_id":1,"category_name":"Salary","amount":"10.00","period_start":"2026-10-01","period_end":null,"is_recurring":false,"status":"Paused","spent":"999.00"}
]"#;

pub const CATEGORIES: &str = r#"[
  {"id":1,"name":"Salary","type":"Income","icon":"wallet"},
  {"id":2,"name":"Food","type":"Expense","icon":"utensils"},
  {"id":3,"name":"Transport","type":"Expense","icon":"car"},
  {"id":4,"name":"Health","type":"Expense","icon":null}
]"#;

pub const GOALS: &str = r#"[
  {"id":1,"account_id":1,"name":"Vacation","target_amount":"2000.00","current_amount":"800.00","deadline":"2027-06-01","status":"In Progress"},
  {"id":2,"account_id":1,"name":"Laptop","target_amount":"1500.00","current_amount":"1500.00","deadline":null,"status":"Completed"}
]"#;

pub const DEBTS: &str = r#"[
  {"id":1,"creditor_name":"Bank","principal_amount":"12000.00","interest_rate":"12.00","interest_type":"amortized","term_months":12,"start_date":"2026-01-20","monthly_payment":"1066.19","amount_paid":"3198.57","status":"Active","notes":null},
  {"id":2,"creditor_name":"Friend","principal_amount":"500.00","interest_rate":"0.00","interest_type":"simple","term_months":5,"start_date":"2025-05-02","monthly_payment":"100.00","amount_paid":"500.00","status":"Paid"}
]"#;

pub const RECURRING: &str = r#"[
  {"id":1,"name":"Salary","transaction_type":"Income","amount":"3000.00","frequency":"monthly","day_of_period":1,"account":1,"category":1,"start_date":"2026-01-01","end_date":null,"is_active":true},
  {"id":2,"name":"Gym","transaction_type":"Expense","amount":"10.00","frequency":"weekly","day_of_period":1,"account":1,"category":null,"start_date":"2026-01-01","end_date":null,"is_active":true},
  {"id":3,"name":"Streaming","transaction_type":"Expense","amount":"15.00","frequency":"biweekly","day_of_period":1,"account":1,"category":null,"start_date":"2026-01-01","end_date":null,"is_active":false}
]"#;

pub const INVESTMENTS: &str = r#"[
  {"id":1,"user":1,"investment_type":"goal","name":"Emergency fund","account":1,"account_name":"Checking","initial_amount":"0.00","current_amount":"300.00","target_amount":"1000.00","policy_number":null,"institution_name":null,"expected_return_rate":null,"maturity_term_months":null,"maturity_date":null,"start_date":"2026-03-01","deadline":"2027-03-01","status":"active","progress_percentage":30.0,"projected_return":0.0,"projected_final_value":0.0,"movements_count":3},
  {"id":2,"user":1,"investment_type":"insurance","name":"Life policy","account":null,"account_name":null,"initial_amount":"10000.00","current_amount":"10250.00","target_amount":null,"policy_number":"LP-77","institution_name":"Mutual","expected_return_rate":"8.00","maturity_term_months":24,"maturity_date":null,"start_date":"2025-10-14","deadline":null,"status":"active","progress_percentage":0.0,"projected_return":1600.0,"projected_final_value":11600.0,"movements_count":1},
  {"id":3,"user":1,"investment_type":"insurance","name":"Old bond","account":1,"account_name":"Checking","initial_amount":"2000.00","current_amount":"2100.00","target_amount":null,"policy_number":null,"institution_name":"Bank","expected_return_rate":"5.00","maturity_term_months":null,"maturity_date":"2026-01-01","start_date":"2025-01-01","deadline":null,"status":"matured","progress_percentage":0.0,"projected_return":100.0,"projected_final_value":2100.0,"movements_count":2}
]"#;

pub const TRANSFERS: &str = r#"[
  {"id":1,"user":1,"user_id":1,"from_account":1,"from_account_id":1,"from_account_name":"Checking","to_account":2,"to_account_id":2,"to_account_name":"Card","amount":"200.00","transfer_date":"2026-10-10","created_at":"2026-10-10T10:00:00Z"},
  {"id":2,"user":1,"user_id":1,"from_account":2,"from_account_id":2,"from_account_name":"Card","to_account":1,"to_account_id":1,"to_account_name":"Checking","amount":"50.00","transfer_date":"2026-09-15","created_at":"2026-09-15T10:00:00Z"}
]"#;

pub fn empty() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

pub fn seeded() -> Connection {
    let conn = empty();
    let bodies = [
        (Resource::Accounts, ACCOUNTS),
        (Resource::Transactions, TRANSACTIONS),
        (Resource::Budgets, BUDGETS),
        (Resource::Goals, GOALS),
        (Resource::Debts, DEBTS),
        (Resource::RecurringTransactions, RECURRING),
        (Resource::Categories, CATEGORIES),
        (Resource::Investments, INVESTMENTS),
        (Resource::Transfers, TRANSFERS),
    ];
    for (i, (resource, body)) in bodies.into_iter().enumerate() {
        store::accept(&conn, resource, i as u64 + 1, body).unwrap();
    }
    conn
}

/// Walks `finboard <path...> <args...>` down to the innermost subcommand's matches.
pub fn sub_matches(args: &[&str], depth: usize) -> clap::ArgMatches {
    let mut argv = vec!["finboard"];
    argv.extend_from_slice(args);
    let mut m = finboard::cli::build_cli().get_matches_from(argv);
    for _ in 0..depth {
        m = match m.remove_subcommand() {
            Some((_, sub)) => sub,
            None => panic!("missing subcommand in {:?}", args),
        };
    }
    m
}
