use std::borrow::Cow;
use std::time::Duration;

use lpsolvers_types::{
    LinearProgram, LpSolverError, QuadraticProgram, Result, Solution, SolutionStatus,
    SolverOptions, StandardForm,
};
use osqp::{CscMatrix, Problem, Settings, Status};

use crate::csc::{dense_to_csc, dense_to_csc_upper, stack_constraints, CscParts};
use crate::settings::{
    bool_option, f64_option, seconds_option, u32_option, unknown_option, vector_option,
};
use crate::SolverBackend;

const NAME: &str = "osqp";

/// OSQP represents infinite bounds by this sentinel
const OSQP_INFTY: f64 = 1e30;

/// OSQP operator-splitting backend (links the OSQP C library)
#[derive(Debug, Clone, Default)]
pub struct OsqpSolver;

impl OsqpSolver {
    pub fn new() -> Self {
        OsqpSolver
    }

    fn solve_form(&self, form: &StandardForm<'_>, options: &SolverOptions) -> Result<Solution> {
        form.validate()?;
        let n = form.num_vars();
        let (settings, warm_start) = build_settings(options)?;
        if let Some(x0) = &warm_start {
            if x0.len() != n {
                return Err(LpSolverError::invalid_option(
                    NAME,
                    "initvals",
                    format!("warm-start vector has length {}, expected {}", x0.len(), n),
                ));
            }
        }
        // OSQP rejects l > u at setup
        if form.has_crossed_bounds() {
            return Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0));
        }

        // Constraints: l <= [G; A; I_bounded] x <= u
        let mut rows = stack_constraints(form);
        for i in 0..n {
            let (lb, ub) = (form.lower_bound(i), form.upper_bound(i));
            if lb.is_finite() || ub.is_finite() {
                rows.push_unit(i, 1.0, lb, ub);
            }
        }
        let l: Vec<f64> = rows.lower.iter().map(|v| v.max(-OSQP_INFTY)).collect();
        let u: Vec<f64> = rows.upper.iter().map(|v| v.min(OSQP_INFTY)).collect();

        let p = to_osqp(dense_to_csc_upper(&form.symmetric_p()));
        let a = to_osqp(dense_to_csc(&rows.to_matrix()));

        tracing::debug!(n, rows = l.len(), "calling osqp");
        let mut problem = Problem::new(p, form.q.as_slice(), a, &l, &u, &settings)
            .map_err(|e| LpSolverError::backend(NAME, format!("setup failed: {:?}", e)))?;
        if let Some(x0) = &warm_start {
            problem.warm_start_x(x0);
        }

        let status = problem.solve();
        let iterations = status.iter() as usize;
        let solution = match status {
            Status::Solved(sol) => {
                let x = sol.x().to_vec();
                let objective = form.objective(&x);
                Solution::optimal(x, objective, iterations)
            }
            Status::SolvedInaccurate(sol) => {
                tracing::warn!("osqp solved to reduced accuracy");
                let x = sol.x().to_vec();
                let objective = form.objective(&x);
                Solution::optimal(x, objective, iterations)
            }
            Status::PrimalInfeasible(_) | Status::PrimalInfeasibleInaccurate(_) => {
                Solution::without_point(SolutionStatus::PrimalInfeasible, iterations)
            }
            Status::DualInfeasible(_) | Status::DualInfeasibleInaccurate(_) => {
                Solution::without_point(SolutionStatus::DualInfeasible, iterations)
            }
            Status::MaxIterationsReached(_) => {
                Solution::without_point(SolutionStatus::MaxIterations, iterations)
            }
            Status::TimeLimitReached(_) => {
                Solution::without_point(SolutionStatus::TimeLimit, iterations)
            }
            _ => Solution::without_point(SolutionStatus::NumericalError, iterations),
        };
        Ok(solution)
    }
}

impl SolverBackend for OsqpSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports_qp(&self) -> bool {
        true
    }

    fn solve_lp(&self, problem: &LinearProgram, options: &SolverOptions) -> Result<Solution> {
        self.solve_form(&problem.standard_form(), options)
    }

    fn solve_qp(&self, problem: &QuadraticProgram, options: &SolverOptions) -> Result<Solution> {
        self.solve_form(&problem.standard_form(), options)
    }
}

/// Map options onto OSQP settings; `initvals` (or `x`) is a warm start
fn build_settings(options: &SolverOptions) -> Result<(Settings, Option<Vec<f64>>)> {
    if options.contains("initvals") && options.contains("x") {
        return Err(LpSolverError::invalid_option(
            NAME,
            "initvals",
            "warm-start value specified in both `initvals` and `x`",
        ));
    }

    let mut settings = Settings::default().verbose(false);
    let mut warm_start = None;
    for (key, value) in options.iter() {
        settings = match key {
            "verbose" => settings.verbose(bool_option(NAME, key, value)?),
            "max_iter" => settings.max_iter(u32_option(NAME, key, value)?),
            "eps_abs" => settings.eps_abs(f64_option(NAME, key, value)?),
            "eps_rel" => settings.eps_rel(f64_option(NAME, key, value)?),
            "eps_prim_inf" => settings.eps_prim_inf(f64_option(NAME, key, value)?),
            "eps_dual_inf" => settings.eps_dual_inf(f64_option(NAME, key, value)?),
            "rho" => settings.rho(f64_option(NAME, key, value)?),
            "sigma" => settings.sigma(f64_option(NAME, key, value)?),
            "alpha" => settings.alpha(f64_option(NAME, key, value)?),
            "polish" => settings.polish(bool_option(NAME, key, value)?),
            "adaptive_rho" => settings.adaptive_rho(bool_option(NAME, key, value)?),
            "scaling" => settings.scaling(u32_option(NAME, key, value)?),
            "time_limit" => {
                let secs = seconds_option(NAME, key, value)?;
                settings.time_limit(Some(Duration::from_secs_f64(secs)))
            }
            "initvals" | "x" => {
                warm_start = Some(vector_option(NAME, key, value)?.to_vec());
                settings.warm_start(true)
            }
            _ => return Err(unknown_option(NAME, key)),
        };
    }

    Ok((settings, warm_start))
}

fn to_osqp(parts: CscParts) -> CscMatrix<'static> {
    CscMatrix {
        nrows: parts.nrows,
        ncols: parts.ncols,
        indptr: Cow::Owned(parts.colptr),
        indices: Cow::Owned(parts.rowval),
        data: Cow::Owned(parts.nzval),
    }
}
