//! Starting-eleven selection from a fixed squad.
//!
//! Same 0/1 formulation as the squad selector, scoped to the squad's
//! players and projected over a single period.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{sort_by_position, FormationRules, OptimizerContext, PickedPlayer, SquadRules};
use crate::domain::error::DomainError;
use crate::domain::solver::{Constraint, IlpProblem, SolutionStatus};
use crate::domain::{PlayerId, Position, PositionCounts};
use crate::error::Result;

/// Lineups are picked for the next period only.
pub const LINEUP_HORIZON: u32 = 1;

/// Result of a lineup selection.
#[derive(Debug, Clone, Serialize)]
pub struct LineupSelection {
    pub status: SolutionStatus,
    /// Position order, then descending points.
    pub starting: Vec<PickedPlayer>,
    /// Keeper first, then descending points.
    pub bench: Vec<PickedPlayer>,
    /// Defenders-midfielders-forwards, e.g. `3-4-3`.
    pub formation: String,
    pub total_points: f64,
}

impl LineupSelection {
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Combined projection of the bench.
    pub fn bench_points(&self) -> f64 {
        self.bench.iter().map(|p| p.points).sum()
    }
}

/// Picks the starting eleven that maximises next-period points.
#[derive(Debug, Clone)]
pub struct LineupSelector {
    rules: FormationRules,
    squad_size: usize,
}

impl Default for LineupSelector {
    fn default() -> Self {
        Self::new(FormationRules::default(), &SquadRules::default())
    }
}

impl LineupSelector {
    pub fn new(rules: FormationRules, squad: &SquadRules) -> Self {
        Self {
            rules,
            squad_size: squad.size as usize,
        }
    }

    /// Split `squad` into starters and bench.
    ///
    /// # Errors
    ///
    /// Fails when the squad has the wrong size or names an unknown or
    /// repeated player.
    pub fn select(&self, ctx: &OptimizerContext<'_>, squad: &[PlayerId]) -> Result<LineupSelection> {
        if squad.len() != self.squad_size {
            return Err(DomainError::InvalidSquadSize {
                expected: self.squad_size,
                actual: squad.len(),
            }
            .into());
        }
        let players = ctx.universe.resolve(squad)?;
        let picks: Vec<PickedPlayer> = players
            .iter()
            .map(|p| ctx.pick(p, ctx.points(p, LINEUP_HORIZON)))
            .collect();

        let n = picks.len();
        let mut problem = IlpProblem::binary(n);
        problem.objective = picks.iter().map(|p| -p.points).collect();
        problem.push(Constraint::eq(vec![1.0; n], f64::from(self.rules.size)));
        for position in Position::ALL {
            let quota = self.rules.quotas[position];
            let row = Constraint::indicator(n, |i| picks[i].position == position);
            problem.push(Constraint::geq(row.clone(), f64::from(quota.min)));
            problem.push(Constraint::leq(row, f64::from(quota.max)));
        }
        debug!(players = n, "Built lineup model");

        let solution = ctx.solver.solve_ilp(&problem)?;
        if !solution.is_optimal() {
            warn!(status = %solution.status, "Lineup selection not solved");
            return Ok(LineupSelection {
                status: solution.status,
                starting: Vec::new(),
                bench: Vec::new(),
                formation: String::new(),
                total_points: 0.0,
            });
        }

        let chosen = solution.selected();
        let mut starting = Vec::with_capacity(chosen.len());
        let mut bench = Vec::with_capacity(n - chosen.len());
        for (i, pick) in picks.into_iter().enumerate() {
            if chosen.contains(&i) {
                starting.push(pick);
            } else {
                bench.push(pick);
            }
        }

        sort_by_position(&mut starting);
        bench.sort_by(|a, b| {
            (a.position != Position::Keeper)
                .cmp(&(b.position != Position::Keeper))
                .then(b.points.total_cmp(&a.points))
                .then(a.id.cmp(&b.id))
        });

        let formation = PositionCounts::tally(starting.iter().map(|p| p.position)).formation();
        let total_points = starting.iter().map(|p| p.points).sum();

        info!(%formation, total_points, "Lineup selected");

        Ok(LineupSelection {
            status: SolutionStatus::Optimal,
            starting,
            bench,
            formation,
            total_points,
        })
    }
}
