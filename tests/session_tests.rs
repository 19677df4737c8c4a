// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::db::init_schema;
use finboard::session::{Session, Theme, DEFAULT_API_URL};
use finboard::utils::{get_setting, set_setting};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_without_settings() {
    let conn = setup();
    let s = Session::load(&conn).unwrap();
    if std::env::var("FINBOARD_API_URL").is_err() {
        assert_eq!(s.api_url, DEFAULT_API_URL);
    }
    assert_eq!(s.theme, Theme::Light);
    assert_eq!(s.currency, "USD");
    assert!(!s.is_authenticated());
}

#[test]
fn saved_session_round_trips() {
    let conn = setup();
    let mut s = Session::load(&conn).unwrap();
    s.set_api_url("https://money.example.com/api/");
    s.access_token = Some("abc".into());
    s.refresh_token = Some("def".into());
    s.theme = s.theme.toggled();
    s.save(&conn).unwrap();

    assert_eq!(
        get_setting(&conn, "api_url").unwrap().as_deref(),
        Some("https://money.example.com/api")
    );
    let again = Session::load(&conn).unwrap();
    assert_eq!(again.theme, Theme::Dark);
    assert_eq!(again.access_token.as_deref(), Some("abc"));
}

#[test]
fn logout_removes_tokens() {
    let conn = setup();
    let mut s = Session::load(&conn).unwrap();
    s.access_token = Some("abc".into());
    s.save(&conn).unwrap();
    s.clear_tokens();
    s.save(&conn).unwrap();
    assert_eq!(get_setting(&conn, "access_token").unwrap(), None);
    assert!(!Session::load(&conn).unwrap().is_authenticated());
}

#[test]
fn unknown_theme_is_an_error() {
    let conn = setup();
    set_setting(&conn, "theme", "sepia").unwrap();
    assert!(Session::load(&conn).is_err());
    assert!("Dark".parse::<Theme>().is_ok());
}

#[test]
fn tokens_never_appear_in_json() {
    let mut s = Session::default();
    s.access_token = Some("secret".into());
    let v = serde_json::to_string(&s).unwrap();
    assert!(!v.contains("secret"));
    assert!(v.contains("\"theme\":\"light\""));
}
