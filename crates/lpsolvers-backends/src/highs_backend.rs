use highs::{HighsModelStatus, Model, RowProblem, Sense};
use lpsolvers_types::{
    LinearProgram, LpSolverError, OptionValue, Result, Solution, SolutionStatus, SolverOptions,
};

use crate::settings::{bool_option, f64_option, seconds_option};
use crate::SolverBackend;

/// Algorithm HiGHS is asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HighsMethod {
    /// HiGHS picks simplex or interior point itself
    Automatic,
    /// First-order primal-dual hybrid gradient (PDLP)
    Pdlp,
}

/// HiGHS backend (links the HiGHS C++ library). Linear programs only.
///
/// Options other than the few translated here are forwarded to HiGHS by
/// name, and HiGHS decides whether they are valid.
#[derive(Debug, Clone)]
pub struct HighsSolver {
    method: HighsMethod,
}

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver {
            method: HighsMethod::Automatic,
        }
    }

    /// HiGHS running its PDLP implementation, registered as `pdlp`
    pub fn pdlp() -> Self {
        HighsSolver {
            method: HighsMethod::Pdlp,
        }
    }

    fn configure(&self, model: &mut Model, options: &SolverOptions) -> Result<()> {
        let name = self.name();
        model.make_quiet();
        if self.method == HighsMethod::Pdlp {
            set_option(model, name, "solver", &OptionValue::from("pdlp"))?;
        }

        for (key, value) in options.iter() {
            match (self.method, key) {
                (_, "verbose") => {
                    let verbose = bool_option(name, key, value)?;
                    set_option(model, name, "output_flag", &OptionValue::Bool(verbose))?;
                    set_option(model, name, "log_to_console", &OptionValue::Bool(verbose))?;
                }
                (HighsMethod::Pdlp, "eps_optimal_absolute") => {
                    let eps = OptionValue::Float(f64_option(name, key, value)?);
                    set_option(model, name, "primal_feasibility_tolerance", &eps)?;
                    set_option(model, name, "dual_feasibility_tolerance", &eps)?;
                }
                (HighsMethod::Pdlp, "eps_optimal_relative") => {
                    let eps = OptionValue::Float(f64_option(name, key, value)?);
                    set_option(model, name, "pdlp_d_gap_tol", &eps)?;
                }
                (HighsMethod::Pdlp, "time_sec_limits") => {
                    let secs = OptionValue::Float(seconds_option(name, key, value)?);
                    set_option(model, name, "time_limit", &secs)?;
                }
                _ => set_option(model, name, key, value)?,
            }
        }
        Ok(())
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for HighsSolver {
    fn name(&self) -> &'static str {
        match self.method {
            HighsMethod::Automatic => "highs",
            HighsMethod::Pdlp => "pdlp",
        }
    }

    fn solve_lp(&self, lp: &LinearProgram, options: &SolverOptions) -> Result<Solution> {
        lp.validate()?;
        let form = lp.standard_form();
        if form.has_crossed_bounds() {
            return Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0));
        }

        let mut pb = RowProblem::default();
        let cols: Vec<_> = (0..form.num_vars())
            .map(|i| pb.add_column(form.q[i], form.lower_bound(i)..=form.upper_bound(i)))
            .collect();
        if let Some((g, h)) = form.inequalities() {
            for (r, &hr) in h.iter().enumerate() {
                let factors: Vec<_> = g
                    .row(r)
                    .iter()
                    .enumerate()
                    .filter(|(_, &v)| v != 0.0)
                    .map(|(j, &v)| (cols[j], v))
                    .collect();
                pb.add_row(..=hr, factors);
            }
        }
        if let Some((a, b)) = form.equalities() {
            for (r, &br) in b.iter().enumerate() {
                let factors: Vec<_> = a
                    .row(r)
                    .iter()
                    .enumerate()
                    .filter(|(_, &v)| v != 0.0)
                    .map(|(j, &v)| (cols[j], v))
                    .collect();
                pb.add_row(br..=br, factors);
            }
        }

        let mut model = pb.optimise(Sense::Minimise);
        self.configure(&mut model, options)?;

        tracing::debug!(solver = self.name(), n = cols.len(), "calling highs");
        let solved = model.solve();
        let status = solved.status();
        match status {
            HighsModelStatus::Optimal => {
                let x = solved.get_solution().columns().to_vec();
                let objective = form.objective(&x);
                Ok(Solution::optimal(x, objective, 0))
            }
            HighsModelStatus::Infeasible => {
                Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0))
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(Solution::without_point(SolutionStatus::DualInfeasible, 0))
            }
            HighsModelStatus::ReachedTimeLimit => {
                Ok(Solution::without_point(SolutionStatus::TimeLimit, 0))
            }
            HighsModelStatus::ReachedIterationLimit => {
                Ok(Solution::without_point(SolutionStatus::MaxIterations, 0))
            }
            other => Err(LpSolverError::backend(
                self.name(),
                format!("HiGHS model status {:?}", other),
            )),
        }
    }
}

/// Forward one option to HiGHS. Integers are retried as doubles since
/// HiGHS types its options strictly.
fn set_option(model: &mut Model, solver: &str, key: &str, value: &OptionValue) -> Result<()> {
    let outcome = match value {
        OptionValue::Bool(b) => model.try_set_option(key, *b),
        OptionValue::Int(i) => match i32::try_from(*i) {
            Ok(small) => model
                .try_set_option(key, small)
                .or_else(|_| model.try_set_option(key, *i as f64)),
            Err(_) => model.try_set_option(key, *i as f64),
        },
        OptionValue::Float(f) => model.try_set_option(key, *f),
        OptionValue::Str(s) => model.try_set_option(key, s.as_str()),
        OptionValue::Vector(_) => {
            return Err(LpSolverError::invalid_option(
                solver,
                key,
                "HiGHS options are scalars",
            ))
        }
    };
    outcome.map_err(|status| {
        LpSolverError::invalid_option(solver, key, format!("rejected by HiGHS: {:?}", status))
    })
}
