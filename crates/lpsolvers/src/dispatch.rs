use std::sync::Arc;

use lpsolvers_backends::SolverBackend;
use lpsolvers_types::{
    LinearProgram, LpSolverError, ProblemKind, QuadraticProgram, Result, Solution, SolverOptions,
};
use nalgebra::DVector;

use crate::config::DispatchConfig;
use crate::registry::Registry;

/// What a backend returned for a dispatched call
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Backend that handled the call
    pub solver: &'static str,
    pub solution: Solution,
}

impl Outcome {
    /// Reduce to the uniform result shape: the optimal point, `None` when
    /// the problem is infeasible or unbounded, or the backend's failure.
    pub fn into_point(self) -> Result<Option<DVector<f64>>> {
        let Outcome { solver, solution } = self;
        if solution.is_optimal() {
            Ok(Some(DVector::from_vec(solution.x)))
        } else if solution.status.is_infeasible() {
            Ok(None)
        } else {
            Err(LpSolverError::backend(solver, solution.status.to_string()))
        }
    }
}

/// Resolves a solver by name and forwards problems to it.
///
/// Stateless apart from its configuration; calls are independent.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Dispatcher { config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Solve an LP, returning `None` when it has no solution
    pub fn solve_lp(
        &self,
        problem: &LinearProgram,
        solver: Option<&str>,
        options: &SolverOptions,
    ) -> Result<Option<DVector<f64>>> {
        self.run_lp(problem, solver, options)?.into_point()
    }

    /// Solve a QP, returning `None` when it has no solution
    pub fn solve_qp(
        &self,
        problem: &QuadraticProgram,
        solver: Option<&str>,
        options: &SolverOptions,
    ) -> Result<Option<DVector<f64>>> {
        self.run_qp(problem, solver, options)?.into_point()
    }

    /// Forward an LP and return the backend's full solution
    pub fn run_lp(
        &self,
        problem: &LinearProgram,
        solver: Option<&str>,
        options: &SolverOptions,
    ) -> Result<Outcome> {
        problem.validate()?;
        let backend = self.resolve(solver, ProblemKind::Linear)?;
        let options = self.config.options_for(backend.name(), options);
        tracing::debug!(
            solver = backend.name(),
            n = problem.num_vars(),
            m = problem.num_inequalities(),
            meq = problem.num_equalities(),
            "dispatching LP"
        );
        let solution = backend.solve_lp(problem, &options)?;
        Ok(self.finish(backend.name(), solution))
    }

    /// Forward a QP and return the backend's full solution
    pub fn run_qp(
        &self,
        problem: &QuadraticProgram,
        solver: Option<&str>,
        options: &SolverOptions,
    ) -> Result<Outcome> {
        problem.validate()?;
        let backend = self.resolve(solver, ProblemKind::Quadratic)?;
        let options = self.config.options_for(backend.name(), options);
        tracing::debug!(
            solver = backend.name(),
            n = problem.num_vars(),
            m = problem.num_inequalities(),
            meq = problem.num_equalities(),
            "dispatching QP"
        );
        let solution = backend.solve_qp(problem, &options)?;
        Ok(self.finish(backend.name(), solution))
    }

    /// Explicit name, then the configured default, then the first
    /// available backend able to handle `kind`. Unknown names never fall
    /// back to another solver.
    fn resolve(&self, requested: Option<&str>, kind: ProblemKind) -> Result<Arc<dyn SolverBackend>> {
        let registry = Registry::global();
        let name = requested.or(self.config.default_solver.as_deref());
        let backend = match name {
            Some(name) => registry
                .get(name)
                .ok_or_else(|| LpSolverError::SolverNotFound(name.to_string()))?,
            None => registry
                .first(kind == ProblemKind::Quadratic)
                .ok_or(LpSolverError::NoSolverSelected)?,
        };
        if kind == ProblemKind::Quadratic && !backend.supports_qp() {
            return Err(LpSolverError::UnsupportedProblem {
                solver: backend.name().to_string(),
                kind,
            });
        }
        Ok(backend)
    }

    fn finish(&self, solver: &'static str, solution: Solution) -> Outcome {
        tracing::trace!(
            solver,
            status = %solution.status,
            objective = solution.objective,
            iterations = solution.iterations,
            "backend returned"
        );
        Outcome { solver, solution }
    }
}
