//! Full-squad selection as a 0/1 integer program.
//!
//! One binary variable per eligible player. Maximise projected points
//! subject to:
//!
//! ```text
//! sum(x)                 == size
//! sum(cost * x)          <= budget
//! min_p <= sum_p(x)      <= max_p      for each position p
//! sum_c(x)               <= club cap   for each club c
//! ```
//!
//! When several squads share the optimal total, which one comes back depends
//! on the solver's branching. Only the optimal value is stable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{sort_by_position, OptimizerContext, PickedPlayer, SquadRules};
use crate::domain::error::DomainError;
use crate::domain::solver::{Constraint, IlpProblem, SolutionStatus};
use crate::domain::{PerPosition, Player, PlayerId, Position, Universe};
use crate::error::Result;

/// Settings for squad selection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SquadConfig {
    /// Budget in tenths of a currency unit.
    #[serde(default = "default_budget")]
    pub budget: i64,

    /// Periods to project over.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
}

fn default_budget() -> i64 {
    1000
}

fn default_horizon() -> u32 {
    5
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            horizon: default_horizon(),
        }
    }
}

/// Result of a squad selection.
#[derive(Debug, Clone, Serialize)]
pub struct SquadSelection {
    pub status: SolutionStatus,
    /// Position order, then descending points. Empty unless `status` is optimal.
    pub players: Vec<PickedPlayer>,
    pub total_cost: i64,
    pub budget: i64,
    pub remaining_budget: i64,
    pub total_points: f64,
    pub horizon: u32,
}

impl SquadSelection {
    fn unsolved(status: SolutionStatus, budget: i64, horizon: u32) -> Self {
        Self {
            status,
            players: Vec::new(),
            total_cost: 0,
            budget,
            remaining_budget: budget,
            total_points: 0.0,
            horizon,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Players split by position, each group keeping its point order.
    pub fn grouped(&self) -> PerPosition<Vec<&PickedPlayer>> {
        let mut groups: PerPosition<Vec<&PickedPlayer>> = PerPosition::default();
        for player in &self.players {
            groups[player.position].push(player);
        }
        groups
    }
}

/// Picks the highest-projected squad that fits the rules and budget.
#[derive(Debug, Clone, Default)]
pub struct SquadSelector {
    rules: SquadRules,
}

impl SquadSelector {
    pub fn new(rules: SquadRules) -> Self {
        Self { rules }
    }

    /// Select a squad for `budget` tenths projected over `horizon` periods.
    ///
    /// An unsatisfiable budget is not an error: the selection comes back
    /// with an infeasible status and no players.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBudget`] for a non-positive budget and
    /// [`DomainError::InvalidHorizon`] for a zero horizon.
    pub fn select(
        &self,
        ctx: &OptimizerContext<'_>,
        budget: i64,
        horizon: u32,
    ) -> Result<SquadSelection> {
        if budget <= 0 {
            return Err(DomainError::InvalidBudget(budget).into());
        }
        if horizon == 0 {
            return Err(DomainError::InvalidHorizon(horizon).into());
        }

        let eligible: Vec<&Player> = ctx
            .universe
            .players()
            .iter()
            .filter(|p| p.is_selectable())
            .collect();
        let points: Vec<f64> = eligible.iter().map(|p| ctx.points(p, horizon)).collect();

        let problem = self.build_problem(ctx.universe, &eligible, &points, budget);
        debug!(
            eligible = eligible.len(),
            constraints = problem.constraints.len(),
            budget,
            horizon,
            "Built squad model"
        );

        let solution = ctx.solver.solve_ilp(&problem)?;
        if !solution.is_optimal() {
            warn!(status = %solution.status, budget, "Squad selection not solved");
            return Ok(SquadSelection::unsolved(solution.status, budget, horizon));
        }

        let mut players: Vec<PickedPlayer> = solution
            .selected()
            .into_iter()
            .map(|i| ctx.pick(eligible[i], points[i]))
            .collect();
        sort_by_position(&mut players);

        let total_cost: i64 = players.iter().map(|p| i64::from(p.cost)).sum();
        let total_points: f64 = players.iter().map(|p| p.points).sum();

        info!(
            players = players.len(),
            total_cost,
            total_points,
            solver = ctx.solver.name(),
            "Squad selected"
        );

        Ok(SquadSelection {
            status: SolutionStatus::Optimal,
            players,
            total_cost,
            budget,
            remaining_budget: budget - total_cost,
            total_points,
            horizon,
        })
    }

    fn build_problem(
        &self,
        universe: &Universe,
        eligible: &[&Player],
        points: &[f64],
        budget: i64,
    ) -> IlpProblem {
        let n = eligible.len();
        let column: HashMap<PlayerId, usize> =
            eligible.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

        let mut problem = IlpProblem::binary(n);
        problem.objective = points.iter().map(|p| -p).collect();

        problem.push(Constraint::eq(vec![1.0; n], f64::from(self.rules.size)));
        problem.push(Constraint::leq(
            eligible.iter().map(|p| f64::from(p.cost)).collect(),
            budget as f64,
        ));

        for position in Position::ALL {
            let quota = self.rules.quotas[position];
            let members = membership(n, &column, universe.by_position(position));
            problem.push(Constraint::geq(members.clone(), f64::from(quota.min)));
            problem.push(Constraint::leq(members, f64::from(quota.max)));
        }

        for club in universe.clubs() {
            let members = membership(n, &column, universe.by_club(club.id));
            if members.iter().any(|&x| x > 0.0) {
                problem.push(Constraint::leq(members, f64::from(self.rules.max_per_club)));
            }
        }

        problem
    }
}

/// A constraint row with a 1 in the column of every eligible member.
fn membership<'a>(
    n: usize,
    column: &HashMap<PlayerId, usize>,
    members: impl Iterator<Item = &'a Player>,
) -> Vec<f64> {
    let mut row = vec![0.0; n];
    for player in members {
        if let Some(&i) = column.get(&player.id) {
            row[i] = 1.0;
        }
    }
    row
}
