// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::loan::monthly_payment_for_storage;
use crate::error::FinanceError;
use crate::models::{Debt, DebtDraft};
use crate::money::to_f64;
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::http_client;
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Issues strictly increasing request ids. Seed it with
/// [`store::latest_request_id`] so ids keep growing across runs.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    last: AtomicU64,
}

impl RequestSequencer {
    pub fn starting_after(last: u64) -> Self {
        RequestSequencer {
            last: AtomicU64::new(last),
        }
    }

    pub fn from_store(conn: &Connection) -> Result<Self> {
        Ok(Self::starting_after(store::latest_request_id(conn)?))
    }

    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Maps a failed HTTP status (and the server's JSON body, if any) to the text
/// shown to the user.
pub fn user_message(status: u16, body: &str) -> String {
    let detail = server_detail(body);
    match status {
        400 => detail.unwrap_or_else(|| {
            "The submitted data is not valid. Check it and try again.".to_string()
        }),
        401 => "You are not authorized. Check your credentials or set a new token.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested resource does not exist.".to_string(),
        409 => "A record with this data already exists.".to_string(),
        422 => "The provided data is not valid. Check it and try again.".to_string(),
        429 => "Too many requests. Wait a few minutes before trying again.".to_string(),
        500 => "Server error. Try again later.".to_string(),
        502..=504 => "The server is unavailable right now. Try again later.".to_string(),
        _ => detail.unwrap_or_else(|| "An unexpected error occurred. Try again.".to_string()),
    }
}

fn server_detail(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message", "error"] {
        if let Some(s) = v.get(key).and_then(|x| x.as_str()) {
            return Some(s.to_string());
        }
    }
    // DRF field errors: {"field": ["msg", ...]}
    v.as_object()?
        .values()
        .find_map(|x| x.as_array()?.first()?.as_str().map(str::to_string))
}

fn transport_error(e: reqwest::Error) -> FinanceError {
    if e.is_timeout() {
        FinanceError::Transport("The request took too long. Try again.".to_string())
    } else {
        FinanceError::Transport(
            "Could not connect to the server. Check the API URL and your connection.".to_string(),
        )
    }
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct DebtPayload<'a> {
    #[serde(flatten)]
    draft: &'a DebtDraft,
    monthly_payment: Decimal,
}

/// Body for `POST /debts/`. The stored monthly payment is computed here,
/// rounded to cents, so the server never receives an unrounded value.
pub fn debt_payload(draft: &DebtDraft) -> Result<serde_json::Value> {
    let monthly_payment = monthly_payment_for_storage(
        to_f64(draft.principal_amount),
        to_f64(draft.interest_rate),
        draft.term_months,
        draft.interest_type,
    )?;
    let payload = DebtPayload {
        draft,
        monthly_payment,
    };
    Ok(serde_json::to_value(&payload)?)
}

impl ApiClient {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(ApiClient {
            base_url: session.api_url.trim_end_matches('/').to_string(),
            http: http_client(session.access_token.as_deref())?,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(resp: reqwest::blocking::Response) -> Result<String> {
        let status = resp.status();
        let body = resp.text().map_err(transport_error)?;
        if !status.is_success() {
            let code = status.as_u16();
            return Err(FinanceError::Api {
                status: code,
                message: user_message(code, &body),
            }
            .into());
        }
        Ok(body)
    }

    /// Raw JSON body of a collection GET.
    pub fn fetch_raw(&self, resource: Resource, request_id: u64) -> Result<String> {
        let url = self.url(&resource.path());
        debug!(%url, request_id, "GET");
        let resp = self.http.get(&url).send().map_err(transport_error)?;
        Self::check(resp).with_context(|| format!("Fetch {}", resource))
    }

    pub fn create_debt(&self, draft: &DebtDraft) -> Result<Debt> {
        let payload = debt_payload(draft)?;
        let url = self.url(&Resource::Debts.path());
        debug!(%url, creditor = %draft.creditor_name, "POST");
        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .map_err(transport_error)?;
        let body = Self::check(resp).context("Create debt")?;
        let debt: Debt = serde_json::from_str(&body).context("Decode created debt")?;
        info!(id = debt.id, "debt created");
        Ok(debt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    Stored,
    Stale,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncEntry {
    pub resource: String,
    pub request_id: u64,
    pub outcome: SyncOutcome,
}

/// Offers one response to the store. A superseded response comes back as
/// [`SyncOutcome::Stale`]; any other failure is an error.
pub fn accept_response(
    conn: &Connection,
    resource: Resource,
    request_id: u64,
    body: &str,
) -> Result<SyncOutcome> {
    match store::accept(conn, resource, request_id, body) {
        Ok(()) => Ok(SyncOutcome::Stored),
        Err(e) => match e.downcast_ref::<FinanceError>() {
            Some(FinanceError::StaleResponse { .. }) => {
                warn!(%resource, request_id, "stale response ignored");
                Ok(SyncOutcome::Stale)
            }
            _ => Err(e),
        },
    }
}

pub fn sync(
    conn: &Connection,
    client: &ApiClient,
    sequencer: &RequestSequencer,
    resources: &[Resource],
) -> Result<Vec<SyncEntry>> {
    let mut out = Vec::with_capacity(resources.len());
    for &resource in resources {
        let request_id = sequencer.next_id();
        let body = client.fetch_raw(resource, request_id)?;
        let outcome = accept_response(conn, resource, request_id, &body)?;
        out.push(SyncEntry {
            resource: resource.name().to_string(),
            request_id,
            outcome,
        });
    }
    info!(count = out.len(), "sync finished");
    Ok(out)
}
