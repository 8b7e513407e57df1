//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic Rust usage.

use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution,
    SolutionStatus as HighsStatus, SolverModel, WithTimeLimit,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ConstraintSense, IlpProblem, LpSolution, SolutionStatus, Solver};
use crate::error::Result;

/// Tolerance used when checking a returned solution against the model.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock cap per solve, in seconds.
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: f64,
}

fn default_time_limit_secs() -> f64 {
    30.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit_secs(),
        }
    }
}

/// HiGHS-based ILP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver {
    config: SolverConfig,
}

impl HighsSolver {
    /// Create a new HiGHS solver instance.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution> {
        solve_with_good_lp(problem, self.config.time_limit_secs.max(0.0))
    }
}

/// Internal solver implementation using good_lp.
fn solve_with_good_lp(problem: &IlpProblem, time_limit_secs: f64) -> Result<LpSolution> {
    let n = problem.num_vars();

    // An empty model is decided by its constraints alone
    if n == 0 {
        let status = if problem.is_feasible(&[], FEASIBILITY_TOLERANCE) {
            SolutionStatus::Optimal
        } else {
            SolutionStatus::Infeasible
        };
        return Ok(LpSolution::without_values(0, status));
    }

    // Create variables
    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for (i, bounds) in problem.bounds.iter().enumerate() {
        let mut v = variable();

        if let Some(lb) = bounds.lower {
            v = v.min(lb);
        }
        if let Some(ub) = bounds.upper {
            v = v.max(ub);
        }
        if problem.integer_vars.contains(&i) {
            v = v.integer();
        }

        var_list.push(vars.add(v));
    }

    let objective: Expression = var_list
        .iter()
        .zip(problem.objective.iter())
        .filter(|(_, c)| **c != 0.0)
        .map(|(v, c)| *c * *v)
        .sum();

    let mut model = vars
        .minimise(&objective)
        .using(highs)
        .with_time_limit(time_limit_secs);
    model.set_verbose(false);

    for constr in &problem.constraints {
        let lhs: Expression = var_list
            .iter()
            .zip(constr.coefficients.iter())
            .filter(|(_, c)| **c != 0.0)
            .map(|(v, c)| *c * *v)
            .sum();

        let rhs = constr.rhs;

        match constr.sense {
            ConstraintSense::GreaterEqual => {
                model = model.with(constraint!(lhs >= rhs));
            }
            ConstraintSense::LessEqual => {
                model = model.with(constraint!(lhs <= rhs));
            }
            ConstraintSense::Equal => {
                model = model.with(constraint!(lhs == rhs));
            }
        }
    }

    debug!(
        variables = n,
        constraints = problem.constraints.len(),
        "Solving ILP with HiGHS"
    );

    let started = Instant::now();
    let outcome = model.solve();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(solution) => {
            // An incumbent handed back at the clock is not a proven optimum
            if matches!(solution.status(), HighsStatus::TimeLimit) {
                warn!(elapsed_ms, "Solver hit its time limit");
                return Ok(LpSolution::without_values(n, SolutionStatus::TimedOut));
            }

            let values: Vec<f64> = var_list.iter().map(|v| solution.value(*v)).collect();
            if !problem.is_feasible(&values, FEASIBILITY_TOLERANCE) {
                warn!("Solver returned values that violate the model");
                return Ok(LpSolution::without_values(n, SolutionStatus::Error));
            }

            let objective = values
                .iter()
                .zip(problem.objective.iter())
                .map(|(v, c)| v * c)
                .sum();

            debug!(elapsed_ms, objective, "Solved ILP");
            Ok(LpSolution {
                values,
                objective,
                status: SolutionStatus::Optimal,
            })
        }
        Err(ResolutionError::Infeasible) => {
            Ok(LpSolution::without_values(n, SolutionStatus::Infeasible))
        }
        Err(ResolutionError::Unbounded) => {
            Ok(LpSolution::without_values(n, SolutionStatus::Unbounded))
        }
        // HiGHS stopped without any feasible incumbent
        Err(ResolutionError::Other("NoSolutionFound")) => {
            warn!(elapsed_ms, "Solver stopped before finding a solution");
            Ok(LpSolution::without_values(n, SolutionStatus::TimedOut))
        }
        Err(err) => {
            warn!(error = %err, "Solver failed");
            Ok(LpSolution::without_values(n, SolutionStatus::Error))
        }
    }
}
