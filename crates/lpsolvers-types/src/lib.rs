//! Shared types for the lpsolvers workspace: problem descriptions in
//! standard form, untyped solver options, normalized solutions and errors.

mod error;
mod options;
mod problem;
mod solution;

pub use error::{LpSolverError, Result};
pub use options::{OptionValue, SolverOptions};
pub use problem::{LinearProgram, ProblemKind, QuadraticProgram, StandardForm};
pub use solution::{Solution, SolutionStatus};

#[cfg(test)]
mod tests;
