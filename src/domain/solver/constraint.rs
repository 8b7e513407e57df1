//! Linear constraint types for optimization problems.

use serde::{Deserialize, Serialize};

/// A single linear constraint: `sum(coeffs[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each variable.
    pub coefficients: Vec<f64>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: f64,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Indicator row: 1.0 for every variable where `member` is true.
    #[must_use]
    pub fn indicator(num_vars: usize, member: impl Fn(usize) -> bool) -> Vec<f64> {
        (0..num_vars)
            .map(|i| if member(i) { 1.0 } else { 0.0 })
            .collect()
    }

    /// Whether `values` satisfy this constraint within `tolerance`.
    #[must_use]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs: f64 = self
            .coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum();
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<f64>,
    /// Upper bound (None = +infinity).
    pub upper: Option<f64>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_marks_members() {
        let row = Constraint::indicator(4, |i| i % 2 == 0);
        assert_eq!(row, vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn satisfaction_by_sense() {
        let values = [1.0, 0.0, 1.0];
        let coeffs = vec![1.0, 1.0, 1.0];
        assert!(Constraint::eq(coeffs.clone(), 2.0).is_satisfied(&values, 1e-6));
        assert!(Constraint::leq(coeffs.clone(), 2.0).is_satisfied(&values, 1e-6));
        assert!(!Constraint::leq(coeffs.clone(), 1.0).is_satisfied(&values, 1e-6));
        assert!(Constraint::geq(coeffs, 2.0).is_satisfied(&values, 1e-6));
    }
}
