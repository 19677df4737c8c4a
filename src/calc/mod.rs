// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod budget;
pub mod debt;
pub mod goal;
pub mod grouping;
pub mod investment;
pub mod loan;
pub mod recurring;
pub mod totals;
pub mod trends;
