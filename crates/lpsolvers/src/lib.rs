//! Solve linear and quadratic programs with whichever solver backend is
//! compiled in, through one call.
//!
//! ```no_run
//! use lpsolvers::{solve_lp, LinearProgram, SolverOptions};
//! use nalgebra::{DMatrix, DVector};
//!
//! let problem = LinearProgram::new(DVector::from_vec(vec![-1.0, -2.0]))
//!     .with_inequalities(DMatrix::from_row_slice(1, 2, &[1.0, 1.0]), DVector::from_vec(vec![3.0]))
//!     .with_lower_bounds(DVector::zeros(2));
//! let x = solve_lp(&problem, None, &SolverOptions::new())?;
//! # Ok::<(), lpsolvers::LpSolverError>(())
//! ```

mod config;
mod dispatch;
mod registry;

pub use config::{DispatchConfig, SOLVER_ENV_VAR};
pub use dispatch::{Dispatcher, Outcome};
pub use registry::{available_solvers, is_available, qp_solvers, Registry};

pub use lpsolvers_backends::SolverBackend;
pub use lpsolvers_types::{
    LinearProgram, LpSolverError, OptionValue, ProblemKind, QuadraticProgram, Result, Solution,
    SolutionStatus, SolverOptions, StandardForm,
};

use nalgebra::DVector;

/// Solve `min c^T x` subject to `G x <= h`, `A x = b`, `lb <= x <= ub`.
///
/// `solver` picks a backend by name; `None` uses `LPSOLVERS_SOLVER` or the
/// first available backend. Returns `Ok(None)` when the problem is
/// infeasible or unbounded.
pub fn solve_lp(
    problem: &LinearProgram,
    solver: Option<&str>,
    options: &SolverOptions,
) -> Result<Option<DVector<f64>>> {
    Dispatcher::new(DispatchConfig::from_env()).solve_lp(problem, solver, options)
}

/// Solve `min 1/2 x^T P x + q^T x` under the same constraints as [`solve_lp`]
pub fn solve_qp(
    problem: &QuadraticProgram,
    solver: Option<&str>,
    options: &SolverOptions,
) -> Result<Option<DVector<f64>>> {
    Dispatcher::new(DispatchConfig::from_env()).solve_qp(problem, solver, options)
}

#[cfg(test)]
mod tests;
