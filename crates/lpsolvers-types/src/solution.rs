use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend termination status, normalized across solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionStatus {
    Optimal,
    PrimalInfeasible,
    /// Dual infeasible, i.e. the primal is unbounded
    DualInfeasible,
    MaxIterations,
    TimeLimit,
    NumericalError,
    Unsolved,
}

impl SolutionStatus {
    /// Infeasible or unbounded: no solution exists
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SolutionStatus::PrimalInfeasible | SolutionStatus::DualInfeasible
        )
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::PrimalInfeasible => "primal infeasible",
            SolutionStatus::DualInfeasible => "dual infeasible",
            SolutionStatus::MaxIterations => "iteration limit reached",
            SolutionStatus::TimeLimit => "time limit reached",
            SolutionStatus::NumericalError => "numerical error",
            SolutionStatus::Unsolved => "unsolved",
        };
        write!(f, "{}", s)
    }
}

/// Solution returned by a backend adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub x: Vec<f64>,
    pub status: SolutionStatus,
    pub objective: f64,
    pub iterations: usize,
}

impl Solution {
    pub fn optimal(x: Vec<f64>, objective: f64, iterations: usize) -> Self {
        Solution {
            x,
            status: SolutionStatus::Optimal,
            objective,
            iterations,
        }
    }

    /// Solution carrying no primal point
    pub fn without_point(status: SolutionStatus, iterations: usize) -> Self {
        Solution {
            x: Vec::new(),
            status,
            objective: f64::NAN,
            iterations,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}
