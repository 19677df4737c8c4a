// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod budgets;
pub mod dashboard;
pub mod debts;
pub mod exporter;
pub mod goals;
pub mod investments;
pub mod loan;
pub mod recurring;
pub mod session;
pub mod sync;
pub mod transactions;
pub mod transfers;
pub mod trends;
