// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod calc;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod log;
pub mod models;
pub mod money;
pub mod session;
pub mod store;
pub mod utils;
