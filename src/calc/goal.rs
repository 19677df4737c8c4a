// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::debt::ProgressTier;
use crate::calc::investment::investment_goal_progress;
use crate::models::{Goal, GoalStatus, Investment, InvestmentStatus};
use crate::money::to_f64;
use rust_decimal::Decimal;
use serde::Serialize;

/// `current / target × 100`, not clamped; a goal can be over-funded.
pub fn goal_percentage(current: Decimal, target: Decimal) -> f64 {
    if target <= Decimal::ZERO {
        return 0.0;
    }
    to_f64(current) / to_f64(target) * 100.0
}

/// Where a progress row on the goals board comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalSource {
    Goal,
    Investment,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub source: GoalSource,
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub percentage: f64,
    pub display_percentage: f64,
    /// `None` once the goal is reached.
    pub remaining: Option<Decimal>,
    pub tier: ProgressTier,
}

impl GoalProgress {
    pub fn towards(
        id: i64,
        source: GoalSource,
        name: &str,
        current: Decimal,
        target: Decimal,
    ) -> Self {
        let percentage = goal_percentage(current, target);
        GoalProgress {
            goal_id: id,
            source,
            name: name.to_string(),
            current,
            target,
            percentage,
            display_percentage: percentage.min(100.0),
            remaining: (percentage < 100.0).then(|| target - current),
            tier: ProgressTier::from_percentage(percentage),
        }
    }
}

pub fn goal_progress(goal: &Goal) -> GoalProgress {
    GoalProgress::towards(
        goal.id,
        GoalSource::Goal,
        &goal.name,
        goal.current_amount,
        goal.target_amount,
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalsSummary {
    pub in_progress: usize,
    pub completed: usize,
}

pub fn goals_summary(goals: &[Goal]) -> GoalsSummary {
    goals.iter().fold(GoalsSummary::default(), |mut acc, g| {
        match g.status {
            GoalStatus::InProgress => acc.in_progress += 1,
            GoalStatus::Completed => acc.completed += 1,
            GoalStatus::Cancelled => {}
        }
        acc
    })
}

/// The five best-funded open goals, savings goals and active investments
/// ranked together.
pub fn top_goals(goals: &[Goal], investments: &[Investment]) -> Vec<GoalProgress> {
    let mut out: Vec<GoalProgress> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::InProgress)
        .map(goal_progress)
        .chain(
            investments
                .iter()
                .filter(|i| i.status == InvestmentStatus::Active)
                .map(investment_goal_progress),
        )
        .collect();
    out.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    out.truncate(5);
    out
}
