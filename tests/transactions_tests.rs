// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{empty, seeded, sub_matches, TODAY};
use finboard::calc::grouping::GroupKey;
use finboard::commands::transactions;
use rust_decimal_macros::dec;

#[test]
fn list_groups_by_date_bucket() {
    let conn = seeded();
    let m = sub_matches(&["tx", "list", "--today", TODAY], 2);
    let groups = transactions::query_groups(&conn, &m).unwrap();
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["today", "yesterday", "this-week", "2026-10", "2026-09", "2026-07"]
    );
    assert_eq!(groups[0].label, "Today - Wednesday, 14 October 2026");
    assert_eq!(groups[2].label, "This week");
    assert_eq!(groups[3].label, "October 2026");
    // 3 days ago is this week, 8 days ago is not
    assert_eq!(groups[2].transactions[0].id, 3);
    assert_eq!(groups[3].transactions[0].id, 4);
}

#[test]
fn type_and_search_filters_combine() {
    let conn = seeded();
    let m = sub_matches(
        &["tx", "list", "--today", TODAY, "--type", "expense", "--search", "FOOD"],
        2,
    );
    let rows = transactions::query_rows(&conn, &m).unwrap();
    let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 6]);

    let m = sub_matches(&["tx", "list", "--search", "card"], 2);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 4);
}

#[test]
fn category_zero_selects_uncategorized() {
    let conn = seeded();
    let m = sub_matches(&["tx", "list", "--category", "0"], 2);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].category_id.is_none());

    let m = sub_matches(&["tx", "list", "--category", "0", "--category", "3"], 2);
    assert_eq!(transactions::query_rows(&conn, &m).unwrap().len(), 2);
}

#[test]
fn sort_orders() {
    let conn = seeded();
    let m = sub_matches(&["tx", "list", "--sort", "amount-desc"], 2);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows[0].amount, dec!(3000.00));
    assert_eq!(rows[5].amount, dec!(45.50));

    let m = sub_matches(&["tx", "list", "--sort", "date-asc"], 2);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows[0].id, 6);

    let m = sub_matches(&["tx", "list", "--sort", "newest"], 2);
    assert!(transactions::query_rows(&conn, &m).is_err());
}

#[test]
fn stats_follow_the_filter() {
    let conn = seeded();
    let m = sub_matches(&["tx", "stats"], 2);
    let s = transactions::query_stats(&conn, &m).unwrap();
    assert_eq!(s.count, 6);
    assert_eq!(s.income, dec!(3000.00));
    assert_eq!(s.expenses, dec!(505.50));
    assert_eq!(s.net(), dec!(2494.50));

    let m = sub_matches(&["tx", "stats", "--account", "2"], 2);
    let s = transactions::query_stats(&conn, &m).unwrap();
    assert_eq!((s.count, s.expenses, s.income), (1, dec!(60.00), dec!(0)));
}

#[test]
fn empty_store_gives_no_groups() {
    let conn = empty();
    let m = sub_matches(&["tx", "list", "--today", TODAY], 2);
    assert!(transactions::query_groups(&conn, &m).unwrap().is_empty());
    let m = sub_matches(&["tx", "stats"], 2);
    assert_eq!(transactions::query_stats(&conn, &m).unwrap().count, 0);
}

#[test]
fn month_keys_sort_newest_first() {
    let mut keys = vec![
        GroupKey::Month("2025-12".into()),
        GroupKey::ThisWeek,
        GroupKey::Month("2026-03".into()),
        GroupKey::Today,
    ];
    keys.sort();
    assert_eq!(keys[0], GroupKey::Today);
    assert_eq!(keys[2], GroupKey::Month("2026-03".into()));
}
