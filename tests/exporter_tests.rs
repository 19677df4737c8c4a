// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{seeded, sub_matches};
use finboard::commands::exporter;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn export_transactions_as_pretty_json() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let m = sub_matches(
        &["export", "transactions", "--format", "json", "--out", &out_str, "--category", "3"],
        1,
    );
    exporter::handle(&conn, &m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2026-10-06",
                "account": "Card",
                "description": "Taxi",
                "type": "Expense",
                "amount": "60.00",
                "category": "Transport"
            }
        ])
    );
}

#[test]
fn export_transactions_as_csv() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let m = sub_matches(&["export", "transactions", "--format", "CSV", "--out", &out_str], 1);
    exporter::handle(&conn, &m).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[4], "amount");
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 6);
    // newest first
    assert_eq!(&records[0][0], "2026-10-14");
    assert_eq!(&records[1][4], "45.50");
    assert_eq!(&records[5][2], "");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let m = sub_matches(&["export", "transactions", "--format", "xml", "--out", &out_str], 1);
    assert!(exporter::handle(&conn, &m).is_err());
    assert!(!out_path.exists());
}
