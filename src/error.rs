// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("Invalid loan parameters: {reason}")]
    InvalidLoanParameters { reason: String },

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown {field} '{value}'")]
    UnknownChoice { field: &'static str, value: String },

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Stale response for {resource}: request {request_id} is not newer than {latest}")]
    StaleResponse {
        resource: String,
        request_id: u64,
        latest: u64,
    },
}

impl FinanceError {
    pub fn loan(reason: impl Into<String>) -> Self {
        FinanceError::InvalidLoanParameters {
            reason: reason.into(),
        }
    }
}
