// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceError;
use crate::utils::{delete_setting, get_setting, set_setting};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "FINBOARD_API_URL";
pub const DEFAULT_CURRENCY: &str = "USD";

const KEY_API_URL: &str = "api_url";
const KEY_ACCESS: &str = "access_token";
const KEY_REFRESH: &str = "refresh_token";
const KEY_THEME: &str = "theme";
const KEY_CURRENCY: &str = "currency";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FinanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(FinanceError::UnknownChoice {
                field: "theme",
                value: s.to_string(),
            }),
        }
    }
}

/// Connection and display preferences, read once at startup and written back
/// explicitly by the commands that change them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub api_url: String,
    #[serde(skip)]
    pub access_token: Option<String>,
    #[serde(skip)]
    pub refresh_token: Option<String>,
    pub theme: Theme,
    pub currency: String,
    #[serde(skip)]
    url_from_env: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            refresh_token: None,
            theme: Theme::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            url_from_env: false,
        }
    }
}

impl Session {
    /// The environment override wins over the stored URL.
    pub fn load(conn: &Connection) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let url_from_env = env_url.is_some();
        let api_url = match env_url {
            Some(u) => u,
            None => get_setting(conn, KEY_API_URL)?.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };
        let theme = match get_setting(conn, KEY_THEME)? {
            Some(t) => t.parse()?,
            None => Theme::default(),
        };
        let session = Session {
            api_url: normalize_url(&api_url),
            access_token: get_setting(conn, KEY_ACCESS)?,
            refresh_token: get_setting(conn, KEY_REFRESH)?,
            theme,
            currency: get_setting(conn, KEY_CURRENCY)?
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            url_from_env,
        };
        debug!(api_url = %session.api_url, authenticated = session.is_authenticated(), "session loaded");
        Ok(session)
    }

    /// An API URL that came from the environment is not persisted.
    pub fn save(&self, conn: &Connection) -> Result<()> {
        if !self.url_from_env {
            set_setting(conn, KEY_API_URL, &self.api_url)?;
        }
        set_setting(conn, KEY_THEME, self.theme.as_str())?;
        set_setting(conn, KEY_CURRENCY, &self.currency)?;
        match &self.access_token {
            Some(t) => set_setting(conn, KEY_ACCESS, t)?,
            None => delete_setting(conn, KEY_ACCESS)?,
        }
        match &self.refresh_token {
            Some(t) => set_setting(conn, KEY_REFRESH, t)?,
            None => delete_setting(conn, KEY_REFRESH)?,
        }
        debug!(api_url = %self.api_url, "session saved");
        Ok(())
    }

    pub fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = normalize_url(url);
        self.url_from_env = false;
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
