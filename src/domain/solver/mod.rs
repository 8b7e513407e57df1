//! Solver port for integer linear programming.
//!
//! Squad and lineup selection are both 0/1 programs. They are written against
//! the [`Solver`] trait so the backend can change without touching the model
//! builders.
//!
//! # Overview
//!
//! - [`Solver`]: ILP solver interface
//! - [`IlpProblem`]: problem definition (minimisation)
//! - [`LpSolution`] / [`SolutionStatus`]: solution and termination status
//! - [`HighsSolver`]: HiGHS backend via `good_lp`

mod constraint;
mod highs;

pub use constraint::{Constraint, ConstraintSense, VariableBounds};
pub use highs::{HighsSolver, SolverConfig};

use serde::Serialize;

use crate::error::Result;

/// Integer linear programming solver.
///
/// Implementations must never block indefinitely: a solver that stops on a
/// time limit reports [`SolutionStatus::TimedOut`].
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve an integer linear programming problem.
    ///
    /// Minimizes the objective with integer constraints on the listed
    /// variables. Infeasibility is reported through the solution status, not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the problem is malformed.
    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution>;
}

/// Integer linear programming problem definition.
///
/// Represents a minimization problem of the form:
///
/// ```text
/// minimize    c^T * x
/// subject to  constraints
///             bounds on x
///             x[i] integer for i in integer_vars
/// ```
///
/// Maximization callers negate `c`.
#[derive(Debug, Clone)]
pub struct IlpProblem {
    /// Objective function coefficients.
    pub objective: Vec<f64>,

    /// Linear constraints on the variables.
    pub constraints: Vec<Constraint>,

    /// Lower and upper bounds for each variable.
    pub bounds: Vec<VariableBounds>,

    /// Indices of variables constrained to integer values.
    pub integer_vars: Vec<usize>,
}

impl IlpProblem {
    /// Create a problem with `num_vars` binary variables and a zero objective.
    #[must_use]
    pub fn binary(num_vars: usize) -> Self {
        Self {
            objective: vec![0.0; num_vars],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::binary(); num_vars],
            integer_vars: (0..num_vars).collect(),
        }
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Append a constraint.
    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Whether `values` satisfy every constraint and bound.
    #[must_use]
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.num_vars()
            && self.bounds.iter().zip(values).all(|(b, v)| {
                b.lower.map_or(true, |lo| *v >= lo - tolerance)
                    && b.upper.map_or(true, |hi| *v <= hi + tolerance)
            })
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }
}

/// Solution to an integer programming problem.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Optimal values for each decision variable.
    pub values: Vec<f64>,

    /// Objective function value at `values`.
    pub objective: f64,

    /// Termination status of the solver.
    pub status: SolutionStatus,
}

impl LpSolution {
    /// A solution carrying only a non-optimal status.
    #[must_use]
    pub fn without_values(num_vars: usize, status: SolutionStatus) -> Self {
        Self {
            values: vec![0.0; num_vars],
            objective: 0.0,
            status,
        }
    }

    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Indices whose binary value rounds to one.
    #[must_use]
    pub fn selected(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.5)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver hit its wall-clock limit before proving optimality.
    TimedOut,

    /// Solver encountered an internal error.
    Error,
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::TimedOut => "timed out",
            SolutionStatus::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_problem_defaults() {
        let problem = IlpProblem::binary(3);
        assert_eq!(problem.num_vars(), 3);
        assert_eq!(problem.integer_vars, vec![0, 1, 2]);
        assert!(problem.bounds.iter().all(|b| *b == VariableBounds::binary()));
    }

    #[test]
    fn feasibility_checks_bounds_and_constraints() {
        let mut problem = IlpProblem::binary(2);
        problem.push(Constraint::leq(vec![1.0, 1.0], 1.0));
        assert!(problem.is_feasible(&[1.0, 0.0], 1e-6));
        assert!(!problem.is_feasible(&[1.0, 1.0], 1e-6));
        assert!(!problem.is_feasible(&[2.0, 0.0], 1e-6));
        assert!(!problem.is_feasible(&[1.0], 1e-6));
    }

    #[test]
    fn selected_rounds_binaries() {
        let solution = LpSolution {
            values: vec![0.9999, 0.0001, 1.0],
            objective: 0.0,
            status: SolutionStatus::Optimal,
        };
        assert_eq!(solution.selected(), vec![0, 2]);
    }

    #[test]
    fn status_display() {
        assert_eq!(SolutionStatus::Infeasible.to_string(), "infeasible");
        assert_eq!(SolutionStatus::TimedOut.to_string(), "timed out");
    }
}
