use std::collections::BTreeMap;
use std::path::Path;

use lpsolvers_types::{LpSolverError, Result, SolverOptions};
use serde::{Deserialize, Serialize};

/// Environment variable naming the solver used when a call names none
pub const SOLVER_ENV_VAR: &str = "LPSOLVERS_SOLVER";

/// Configuration for the dispatcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Solver used when a call does not name one. When unset, the first
    /// available solver able to handle the problem is used.
    pub default_solver: Option<String>,

    /// Ask every backend for verbose output
    pub verbose: bool,

    /// Default options per solver name, overridden by per-call options
    pub solver_options: BTreeMap<String, SolverOptions>,
}

impl DispatchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LpSolverError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `LPSOLVERS_SOLVER` if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = std::env::var(SOLVER_ENV_VAR) {
            let name = name.trim();
            if !name.is_empty() {
                tracing::debug!(solver = name, "default solver taken from {}", SOLVER_ENV_VAR);
                self.default_solver = Some(name.to_string());
            }
        }
        self
    }

    pub fn with_default_solver(mut self, name: impl Into<String>) -> Self {
        self.default_solver = Some(name.into());
        self
    }

    pub fn with_solver_options(mut self, solver: impl Into<String>, options: SolverOptions) -> Self {
        self.solver_options.insert(solver.into(), options);
        self
    }

    /// Options a call to `solver` will see: configured defaults for that
    /// solver, then `verbose`, then the call's own options.
    pub fn options_for(&self, solver: &str, call: &SolverOptions) -> SolverOptions {
        let mut defaults = self.solver_options.get(solver).cloned().unwrap_or_default();
        if self.verbose {
            defaults.set("verbose", true);
        }
        call.merged_over(&defaults)
    }
}
