use clarabel::algebra::CscMatrix;
use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};
use lpsolvers_types::{
    LinearProgram, QuadraticProgram, Result, Solution, SolutionStatus, SolverOptions, StandardForm,
};

use crate::csc::{dense_to_csc, dense_to_csc_upper, stack_constraints, CscParts};
use crate::settings::{bool_option, f64_option, seconds_option, str_option, u32_option, unknown_option};
use crate::SolverBackend;

const NAME: &str = "clarabel";

/// Clarabel interior-point backend (pure Rust, handles LPs and QPs)
#[derive(Debug, Clone, Default)]
pub struct ClarabelSolver;

impl ClarabelSolver {
    pub fn new() -> Self {
        ClarabelSolver
    }

    fn solve_form(&self, form: &StandardForm<'_>, options: &SolverOptions) -> Result<Solution> {
        form.validate()?;
        let settings = build_settings(options)?;
        let n = form.num_vars();

        // Clarabel format: A x + s = b with s in a product of cones.
        // G x <= h maps to the nonnegative cone, A x = b to the zero cone,
        // and each finite bound to one more nonnegative row.
        let mut rows = stack_constraints(form);
        let mut cones = Vec::new();
        if form.num_inequalities() > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(form.num_inequalities()));
        }
        if form.num_equalities() > 0 {
            cones.push(SupportedConeT::ZeroConeT(form.num_equalities()));
        }
        let before_bounds = rows.len();
        for i in 0..n {
            let lb = form.lower_bound(i);
            if lb.is_finite() {
                // x_i >= lb  ->  -x_i + s = -lb
                rows.push_unit(i, -1.0, -lb, -lb);
            }
            let ub = form.upper_bound(i);
            if ub.is_finite() {
                rows.push_unit(i, 1.0, ub, ub);
            }
        }
        let bound_rows = rows.len() - before_bounds;
        if bound_rows > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(bound_rows));
        }

        let p = to_clarabel(dense_to_csc_upper(&form.symmetric_p()));
        let a = to_clarabel(dense_to_csc(&rows.to_matrix()));
        // Upper row bounds are the cone offsets: h, b, then the bound rows
        let b = rows.upper.clone();

        tracing::debug!(n, rows = b.len(), cones = cones.len(), "calling clarabel");
        let mut solver = DefaultSolver::new(&p, form.q.as_slice(), &a, &b, &cones, settings);
        solver.solve();

        let status = map_status(solver.solution.status);
        let iterations = solver.info.iterations as usize;
        if status == SolutionStatus::Optimal {
            if matches!(solver.solution.status, SolverStatus::AlmostSolved) {
                tracing::warn!("clarabel solved to reduced accuracy");
            }
            Ok(Solution::optimal(
                solver.solution.x.clone(),
                solver.solution.obj_val,
                iterations,
            ))
        } else {
            tracing::debug!(?status, "clarabel terminated without an optimum");
            Ok(Solution::without_point(status, iterations))
        }
    }
}

impl SolverBackend for ClarabelSolver {
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

/// Map options onto `DefaultSettings` fields of the same name
fn build_settings(options: &SolverOptions) -> Result<DefaultSettings<f64>> {
    let mut settings = DefaultSettings::default();
    settings.verbose = false;

    for (key, value) in options.iter() {
        match key {
            "verbose" => settings.verbose = bool_option(NAME, key, value)?,
            "max_iter" => settings.max_iter = u32_option(NAME, key, value)?,
            "time_limit" => settings.time_limit = seconds_option(NAME, key, value)?,
            "tol_gap_abs" => settings.tol_gap_abs = f64_option(NAME, key, value)?,
            "tol_gap_rel" => settings.tol_gap_rel = f64_option(NAME, key, value)?,
            "tol_feas" => settings.tol_feas = f64_option(NAME, key, value)?,
            "tol_infeas_abs" => settings.tol_infeas_abs = f64_option(NAME, key, value)?,
            "tol_infeas_rel" => settings.tol_infeas_rel = f64_option(NAME, key, value)?,
            "tol_ktratio" => settings.tol_ktratio = f64_option(NAME, key, value)?,
            "max_step_fraction" => settings.max_step_fraction = f64_option(NAME, key, value)?,
            "equilibrate_enable" => settings.equilibrate_enable = bool_option(NAME, key, value)?,
            "equilibrate_max_iter" => {
                settings.equilibrate_max_iter = u32_option(NAME, key, value)?
            }
            "presolve_enable" => settings.presolve_enable = bool_option(NAME, key, value)?,
            "direct_solve_method" => {
                settings.direct_solve_method = str_option(NAME, key, value)?.to_string()
            }
            _ => return Err(unknown_option(NAME, key)),
        }
    }

    Ok(settings)
}

fn to_clarabel(parts: CscParts) -> CscMatrix<f64> {
    CscMatrix {
        m: parts.nrows,
        n: parts.ncols,
        colptr: parts.colptr,
        rowval: parts.rowval,
        nzval: parts.nzval,
    }
}

#[allow(unreachable_patterns)]
fn map_status(status: SolverStatus) -> SolutionStatus {
    match status {
        SolverStatus::Solved | SolverStatus::AlmostSolved => SolutionStatus::Optimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            SolutionStatus::PrimalInfeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            SolutionStatus::DualInfeasible
        }
        SolverStatus::MaxIterations => SolutionStatus::MaxIterations,
        SolverStatus::MaxTime => SolutionStatus::TimeLimit,
        SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
            SolutionStatus::NumericalError
        }
        SolverStatus::Unsolved => SolutionStatus::Unsolved,
        _ => SolutionStatus::NumericalError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpsolvers_types::LpSolverError;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_bounded_lp() {
        // minimize -x - 2y subject to x + y <= 3, x, y >= 0
        let lp = LinearProgram::new(DVector::from_vec(vec![-1.0, -2.0]))
            .with_inequalities(DMatrix::from_row_slice(1, 2, &[1.0, 1.0]), DVector::from_vec(vec![3.0]))
            .with_lower_bounds(DVector::zeros(2));
        let solution = ClarabelSolver::new().solve_lp(&lp, &SolverOptions::new()).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!(solution.x[0].abs() < 1e-5, "x[0] = {}", solution.x[0]);
        assert!((solution.x[1] - 3.0).abs() < 1e-5, "x[1] = {}", solution.x[1]);
        assert!((solution.objective + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_constrained_qp() {
        // minimize 0.5 * x^T x + [-2, -1]^T x subject to x0 + x1 <= 1, x >= 0
        let qp = QuadraticProgram::new(DMatrix::identity(2, 2), DVector::from_vec(vec![-2.0, -1.0]))
            .with_inequalities(DMatrix::from_row_slice(1, 2, &[1.0, 1.0]), DVector::from_vec(vec![1.0]))
            .with_lower_bounds(DVector::zeros(2));
        let solution = ClarabelSolver::new().solve_qp(&qp, &SolverOptions::new()).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.x[0] - 1.0).abs() < 1e-4, "x[0] = {}", solution.x[0]);
        assert!(solution.x[1].abs() < 1e-4, "x[1] = {}", solution.x[1]);
    }

    #[test]
    fn test_infeasible_bounds() {
        // x >= 1 and x <= 0
        let lp = LinearProgram::new(DVector::from_vec(vec![1.0]))
            .with_bounds(DVector::from_vec(vec![1.0]), DVector::from_vec(vec![0.0]));
        let solution = ClarabelSolver::new().solve_lp(&lp, &SolverOptions::new()).unwrap();

        assert_eq!(solution.status, SolutionStatus::PrimalInfeasible);
        assert!(solution.x.is_empty());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let options = SolverOptions::new().with("eps_abs", 1e-6);
        let err = build_settings(&options).unwrap_err();
        assert!(err.to_string().contains("eps_abs"));
    }

    #[test]
    fn test_settings_forwarded() {
        let options = SolverOptions::new()
            .with("max_iter", 7)
            .with("tol_feas", 1e-9)
            .with("verbose", true)
            .with("direct_solve_method", "qdldl");
        let settings = build_settings(&options).unwrap();
        assert_eq!(settings.max_iter, 7);
        assert_eq!(settings.tol_feas, 1e-9);
        assert!(settings.verbose);
        assert_eq!(settings.direct_solve_method, "qdldl");

        let mistyped = SolverOptions::new().with("max_iter", "many");
        assert!(build_settings(&mistyped).is_err());
    }

    #[test]
    fn test_nan_tolerance_rejected() {
        let options = SolverOptions::new().with("tol_feas", f64::NAN);
        assert!(matches!(
            build_settings(&options),
            Err(LpSolverError::InvalidOption { .. })
        ));
    }
}
