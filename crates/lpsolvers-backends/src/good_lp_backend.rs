use good_lp::solvers::clarabel::{clarabel, ClarabelSolution};
use good_lp::solvers::microlp::microlp;
use good_lp_clarabel::solver::SolverStatus;
use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolverModel, Variable,
};
use lpsolvers_types::{
    LinearProgram, LpSolverError, Result, Solution, SolutionStatus, SolverOptions, StandardForm,
};
use nalgebra::DMatrix;

use crate::settings::{bool_option, str_option, unknown_option};
use crate::SolverBackend;

const NAME: &str = "good_lp";

/// Solver good_lp hands the model to, picked with the `solver` option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoodLpInner {
    Microlp,
    Clarabel,
}

impl GoodLpInner {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "microlp" => Some(GoodLpInner::Microlp),
            "clarabel" => Some(GoodLpInner::Clarabel),
            _ => None,
        }
    }
}

/// Modeling-layer backend: builds a `good_lp` model and solves it with one
/// of good_lp's own solvers (microlp unless the `solver` option says
/// otherwise). Linear programs only.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        GoodLpSolver
    }
}

impl SolverBackend for GoodLpSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve_lp(&self, lp: &LinearProgram, options: &SolverOptions) -> Result<Solution> {
        let mut inner = GoodLpInner::Microlp;
        for (key, value) in options.iter() {
            match key {
                "solver" => {
                    let name = str_option(NAME, key, value)?;
                    inner = GoodLpInner::parse(name).ok_or_else(|| {
                        LpSolverError::invalid_option(
                            NAME,
                            key,
                            format!("unknown inner solver `{}`, expected microlp or clarabel", name),
                        )
                    })?;
                }
                "verbose" => {
                    // accepted, but good_lp solvers do not log
                    bool_option(NAME, key, value)?;
                }
                _ => return Err(unknown_option(NAME, key)),
            }
        }

        lp.validate()?;
        let form = lp.standard_form();
        if form.has_crossed_bounds() {
            return Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0));
        }

        let mut vars = ProblemVariables::new();
        let xs: Vec<Variable> = (0..form.num_vars())
            .map(|i| {
                let mut def = variable();
                let (lb, ub) = (form.lower_bound(i), form.upper_bound(i));
                if lb.is_finite() {
                    def = def.min(lb);
                }
                if ub.is_finite() {
                    def = def.max(ub);
                }
                vars.add(def)
            })
            .collect();
        let objective: Expression = xs.iter().zip(form.q.iter()).map(|(&x, &c)| c * x).sum();
        let constraints = build_constraints(&form, &xs);

        tracing::debug!(?inner, n = xs.len(), rows = constraints.len(), "calling good_lp");
        let problem = vars.minimise(objective);
        let outcome = match inner {
            GoodLpInner::Microlp => run(problem.using(microlp), constraints, &xs),
            GoodLpInner::Clarabel => run_clarabel(problem.using(clarabel), constraints, &xs),
        };

        match outcome {
            Ok(Some(x)) => {
                let objective = form.objective(&x);
                Ok(Solution::optimal(x, objective, 0))
            }
            Ok(None) | Err(ResolutionError::Unbounded) => {
                Ok(Solution::without_point(SolutionStatus::DualInfeasible, 0))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(Solution::without_point(SolutionStatus::PrimalInfeasible, 0))
            }
            Err(e) => Err(LpSolverError::backend(NAME, e.to_string())),
        }
    }
}

fn build_constraints(form: &StandardForm<'_>, xs: &[Variable]) -> Vec<Constraint> {
    let mut constraints = Vec::with_capacity(form.num_inequalities() + form.num_equalities());
    if let Some((g, h)) = form.inequalities() {
        for (r, &hr) in h.iter().enumerate() {
            constraints.push(constraint::leq(row_expression(g, r, xs), hr));
        }
    }
    if let Some((a, b)) = form.equalities() {
        for (r, &br) in b.iter().enumerate() {
            constraints.push(constraint::eq(row_expression(a, r, xs), br));
        }
    }
    constraints
}

fn row_expression(mat: &DMatrix<f64>, row: usize, xs: &[Variable]) -> Expression {
    mat.row(row)
        .iter()
        .zip(xs.iter())
        .filter(|(&coeff, _)| coeff != 0.0)
        .map(|(&coeff, &x)| coeff * x)
        .sum()
}

/// Solve and read the point back; `None` means the model is unbounded
type Outcome = std::result::Result<Option<Vec<f64>>, ResolutionError>;

fn run<M: SolverModel<Error = ResolutionError>>(
    mut model: M,
    constraints: Vec<Constraint>,
    xs: &[Variable],
) -> Outcome {
    for c in constraints {
        model = model.with(c);
    }
    let solution = model.solve()?;
    Ok(Some(xs.iter().map(|&x| solution.value(x)).collect()))
}

/// good_lp's Clarabel model reports a dual infeasibility certificate as a
/// successful solve, so the raw status has to be checked before reading x.
fn run_clarabel<M: SolverModel<Solution = ClarabelSolution, Error = ResolutionError>>(
    mut model: M,
    constraints: Vec<Constraint>,
    xs: &[Variable],
) -> Outcome {
    for c in constraints {
        model = model.with(c);
    }
    let solution = model.solve()?;
    match solution.inner().status {
        SolverStatus::Solved => {}
        SolverStatus::AlmostSolved => tracing::warn!("clarabel solved to reduced accuracy"),
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => return Ok(None),
        status => {
            return Err(ResolutionError::Str(format!("unexpected clarabel status {:?}", status)))
        }
    }
    Ok(Some(xs.iter().map(|&x| solution.value(x)).collect()))
}
