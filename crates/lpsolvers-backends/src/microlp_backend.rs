use lpsolvers_types::{
    LinearProgram, LpSolverError, Result, Solution, SolutionStatus, SolverOptions,
};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use nalgebra::DMatrix;

use crate::settings::{bool_option, unknown_option};
use crate::SolverBackend;

const NAME: &str = "microlp";

/// Dense simplex backend in pure Rust. Linear programs only.
#[derive(Debug, Clone, Default)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        MicrolpSolver
    }
}

impl SolverBackend for MicrolpSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    #[allow(unreachable_patterns)]
    fn solve_lp(&self, lp: &LinearProgram, options: &SolverOptions) -> Result<Solution> {
        // microlp has no tunable settings; verbosity only affects our logging
        let mut verbose = false;
        for (key, value) in options.iter() {
            match key {
                "verbose" => verbose = bool_option(NAME, key, value)?,
                _ => return Err(unknown_option(NAME, key)),
            }
        }

        lp.validate()?;
        let form = lp.standard_form();
        if form.has_crossed_bounds() {
            return Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0));
        }

        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<Variable> = (0..form.num_vars())
            .map(|i| problem.add_var(form.q[i], (form.lower_bound(i), form.upper_bound(i))))
            .collect();
        if let Some((g, h)) = form.inequalities() {
            for (r, &hr) in h.iter().enumerate() {
                problem.add_constraint(row_expr(&vars, g, r), ComparisonOp::Le, hr);
            }
        }
        if let Some((a, b)) = form.equalities() {
            for (r, &br) in b.iter().enumerate() {
                problem.add_constraint(row_expr(&vars, a, r), ComparisonOp::Eq, br);
            }
        }

        if verbose {
            tracing::info!(
                n = vars.len(),
                m = form.num_inequalities(),
                meq = form.num_equalities(),
                "solving with microlp"
            );
        }

        match problem.solve() {
            Ok(solution) => {
                let x: Vec<f64> = vars.iter().map(|&v| solution[v]).collect();
                Ok(Solution::optimal(x, solution.objective(), 0))
            }
            Err(microlp::Error::Infeasible) => {
                Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0))
            }
            Err(microlp::Error::Unbounded) => {
                Ok(Solution::without_point(SolutionStatus::DualInfeasible, 0))
            }
            Err(e) => Err(LpSolverError::backend(NAME, e.to_string())),
        }
    }
}

fn row_expr(vars: &[Variable], mat: &DMatrix<f64>, row: usize) -> LinearExpr {
    let mut expr = LinearExpr::empty();
    for (j, &coeff) in mat.row(row).iter().enumerate() {
        if coeff != 0.0 {
            expr.add(vars[j], coeff);
        }
    }
    expr
}
