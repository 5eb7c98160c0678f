use lpsolvers_types::{
    LinearProgram, LpSolverError, ProblemKind, QuadraticProgram, Result, Solution, SolverOptions,
};

/// Trait for solver backends.
///
/// An adapter only translates the standard form into the backend's native
/// call and maps the outcome back; options it does not recognize are
/// rejected rather than ignored.
pub trait SolverBackend: Send + Sync {
    /// Name the backend is registered under
    fn name(&self) -> &'static str;

    /// Whether `solve_qp` is implemented
    fn supports_qp(&self) -> bool {
        false
    }

    /// Solve: minimize c^T x subject to G x <= h, A x = b, lb <= x <= ub
    fn solve_lp(&self, problem: &LinearProgram, options: &SolverOptions) -> Result<Solution>;

    /// Solve: minimize 0.5 * x^T P x + q^T x subject to the LP constraints
    fn solve_qp(&self, problem: &QuadraticProgram, options: &SolverOptions) -> Result<Solution> {
        let _ = (problem, options);
        Err(LpSolverError::UnsupportedProblem {
            solver: self.name().to_string(),
            kind: ProblemKind::Quadratic,
        })
    }
}
