// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{sync, ApiClient, RequestSequencer, SyncOutcome};
use crate::session::Session;
use crate::store::{self, Resource};
use crate::utils::{maybe_print_json, output_flags, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// `--only` values, or every resource when none were given.
pub fn requested_resources(m: &clap::ArgMatches) -> Result<Vec<Resource>> {
    match m.get_many::<String>("only") {
        Some(vals) => {
            let mut out = Vec::new();
            for v in vals {
                let r: Resource = v.parse()?;
                if !out.contains(&r) {
                    out.push(r);
                }
            }
            Ok(out)
        }
        None => Ok(Resource::ALL.to_vec()),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(m);
    let resources = requested_resources(m)?;
    let session = Session::load(conn)?;
    let client = ApiClient::new(&session)?;
    let sequencer = RequestSequencer::from_store(conn)?;
    let report = sync(conn, &client, &sequencer, &resources)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for e in &report {
        let resource: Resource = e.resource.parse()?;
        rows.push(vec![
            e.resource.clone(),
            match e.outcome {
                SyncOutcome::Stored => "updated".to_string(),
                SyncOutcome::Stale => "skipped (stale)".to_string(),
            },
            store::fetched_at(conn, resource)?.unwrap_or_default(),
        ]);
    }
    println!("{}", pretty_table(&["Resource", "Result", "Fetched at"], rows));
    Ok(())
}
