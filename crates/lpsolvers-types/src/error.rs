use thiserror::Error;

use crate::problem::ProblemKind;

#[derive(Debug, Error)]
pub enum LpSolverError {
    #[error("Solver not found: {0}")]
    SolverNotFound(String),

    #[error("No solver selected and no solver is available")]
    NoSolverSelected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid option for {solver}: {option} ({reason})")]
    InvalidOption {
        solver: String,
        option: String,
        reason: String,
    },

    #[error("Solver {solver} does not handle {kind} problems")]
    UnsupportedProblem { solver: String, kind: ProblemKind },

    #[error("Solver {solver} failed: {message}")]
    Backend { solver: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LpSolverError {
    pub fn invalid_option(
        solver: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LpSolverError::InvalidOption {
            solver: solver.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn backend(solver: impl Into<String>, message: impl Into<String>) -> Self {
        LpSolverError::Backend {
            solver: solver.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LpSolverError>;
