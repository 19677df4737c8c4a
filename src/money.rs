// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Every monetary value coming from the backend passes through here. The API
//! sends amounts as decimal strings (occasionally bare numbers); they become
//! `Decimal` once and stay that way.

use crate::error::FinanceError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

pub fn parse_amount(s: &str) -> Result<Decimal, FinanceError> {
    let t = s.trim();
    if t.is_empty() {
        return Err(FinanceError::InvalidAmount(s.to_string()));
    }
    t.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(t))
        .map_err(|_| FinanceError::InvalidAmount(s.to_string()))
}

/// Two decimal places, half away from zero.
pub fn round_currency(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn to_money(v: f64) -> Result<Decimal, FinanceError> {
    if !v.is_finite() {
        return Err(FinanceError::InvalidAmount(v.to_string()));
    }
    let d = Decimal::from_f64(v).ok_or_else(|| FinanceError::InvalidAmount(v.to_string()))?;
    Ok(round_currency(d))
}

pub fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, round_currency(*d))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl RawAmount {
    fn into_decimal(self) -> Result<Decimal, FinanceError> {
        match self {
            RawAmount::Text(s) => parse_amount(&s),
            RawAmount::Number(n) => parse_amount(&n.to_string()),
        }
    }
}

pub fn de_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    RawAmount::deserialize(deserializer)?
        .into_decimal()
        .map_err(serde::de::Error::custom)
}

pub fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        Some(raw) => raw.into_decimal().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
