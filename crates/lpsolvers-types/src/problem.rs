use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LpSolverError, Result};

/// Kind of problem handed to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    Linear,
    Quadratic,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Linear => write!(f, "linear"),
            ProblemKind::Quadratic => write!(f, "quadratic"),
        }
    }
}

/// Linear program in standard form:
/// minimize c^T x
/// subject to G x <= h, A x = b, lb <= x <= ub
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    /// Linear cost vector c
    pub c: DVector<f64>,
    /// Inequality matrix G
    pub g: Option<DMatrix<f64>>,
    /// Inequality vector h
    pub h: Option<DVector<f64>>,
    /// Equality matrix A
    pub a: Option<DMatrix<f64>>,
    /// Equality vector b
    pub b: Option<DVector<f64>>,
    /// Variable lower bounds, -inf when absent
    pub lb: Option<DVector<f64>>,
    /// Variable upper bounds, +inf when absent
    pub ub: Option<DVector<f64>>,
}

impl LinearProgram {
    /// Create an unconstrained LP with cost vector c
    pub fn new(c: DVector<f64>) -> Self {
        LinearProgram {
            c,
            g: None,
            h: None,
            a: None,
            b: None,
            lb: None,
            ub: None,
        }
    }

    pub fn with_inequalities(mut self, g: DMatrix<f64>, h: DVector<f64>) -> Self {
        self.g = Some(g);
        self.h = Some(h);
        self
    }

    pub fn with_equalities(mut self, a: DMatrix<f64>, b: DVector<f64>) -> Self {
        self.a = Some(a);
        self.b = Some(b);
        self
    }

    pub fn with_lower_bounds(mut self, lb: DVector<f64>) -> Self {
        self.lb = Some(lb);
        self
    }

    pub fn with_upper_bounds(mut self, ub: DVector<f64>) -> Self {
        self.ub = Some(ub);
        self
    }

    pub fn with_bounds(self, lb: DVector<f64>, ub: DVector<f64>) -> Self {
        self.with_lower_bounds(lb).with_upper_bounds(ub)
    }

    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    pub fn num_inequalities(&self) -> usize {
        self.h.as_ref().map_or(0, |h| h.len())
    }

    pub fn num_equalities(&self) -> usize {
        self.b.as_ref().map_or(0, |b| b.len())
    }

    /// Borrow the problem as a standard form with a zero quadratic cost
    pub fn standard_form(&self) -> StandardForm<'_> {
        StandardForm {
            p: None,
            q: &self.c,
            g: self.g.as_ref(),
            h: self.h.as_ref(),
            a: self.a.as_ref(),
            b: self.b.as_ref(),
            lb: self.lb.as_ref(),
            ub: self.ub.as_ref(),
        }
    }

    /// Validate problem dimensions and entries
    pub fn validate(&self) -> Result<()> {
        self.standard_form().validate()
    }

    /// Objective value c^T x
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.standard_form().objective(x)
    }
}

/// Quadratic program in standard form:
/// minimize 0.5 * x^T P x + q^T x
/// subject to G x <= h, A x = b, lb <= x <= ub
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticProgram {
    /// Quadratic cost matrix P (must be PSD)
    pub p: DMatrix<f64>,
    /// Linear cost vector q
    pub q: DVector<f64>,
    pub g: Option<DMatrix<f64>>,
    pub h: Option<DVector<f64>>,
    pub a: Option<DMatrix<f64>>,
    pub b: Option<DVector<f64>>,
    pub lb: Option<DVector<f64>>,
    pub ub: Option<DVector<f64>>,
}

impl QuadraticProgram {
    /// Create an unconstrained QP
    pub fn new(p: DMatrix<f64>, q: DVector<f64>) -> Self {
        QuadraticProgram {
            p,
            q,
            g: None,
            h: None,
            a: None,
            b: None,
            lb: None,
            ub: None,
        }
    }

    pub fn with_inequalities(mut self, g: DMatrix<f64>, h: DVector<f64>) -> Self {
        self.g = Some(g);
        self.h = Some(h);
        self
    }

    pub fn with_equalities(mut self, a: DMatrix<f64>, b: DVector<f64>) -> Self {
        self.a = Some(a);
        self.b = Some(b);
        self
    }

    pub fn with_lower_bounds(mut self, lb: DVector<f64>) -> Self {
        self.lb = Some(lb);
        self
    }

    pub fn with_upper_bounds(mut self, ub: DVector<f64>) -> Self {
        self.ub = Some(ub);
        self
    }

    pub fn with_bounds(self, lb: DVector<f64>, ub: DVector<f64>) -> Self {
        self.with_lower_bounds(lb).with_upper_bounds(ub)
    }

    pub fn num_vars(&self) -> usize {
        self.q.len()
    }

    pub fn num_inequalities(&self) -> usize {
        self.h.as_ref().map_or(0, |h| h.len())
    }

    pub fn num_equalities(&self) -> usize {
        self.b.as_ref().map_or(0, |b| b.len())
    }

    pub fn standard_form(&self) -> StandardForm<'_> {
        StandardForm {
            p: Some(&self.p),
            q: &self.q,
            g: self.g.as_ref(),
            h: self.h.as_ref(),
            a: self.a.as_ref(),
            b: self.b.as_ref(),
            lb: self.lb.as_ref(),
            ub: self.ub.as_ref(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.standard_form().validate()
    }

    /// Objective value 0.5 * x^T P x + q^T x
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.standard_form().objective(x)
    }
}

impl From<LinearProgram> for QuadraticProgram {
    fn from(lp: LinearProgram) -> Self {
        let n = lp.c.len();
        QuadraticProgram {
            p: DMatrix::zeros(n, n),
            q: lp.c,
            g: lp.g,
            h: lp.h,
            a: lp.a,
            b: lp.b,
            lb: lp.lb,
            ub: lp.ub,
        }
    }
}

/// Borrowed view shared by LPs and QPs, consumed by the backend adapters.
#[derive(Debug, Clone, Copy)]
pub struct StandardForm<'a> {
    pub p: Option<&'a DMatrix<f64>>,
    pub q: &'a DVector<f64>,
    pub g: Option<&'a DMatrix<f64>>,
    pub h: Option<&'a DVector<f64>>,
    pub a: Option<&'a DMatrix<f64>>,
    pub b: Option<&'a DVector<f64>>,
    pub lb: Option<&'a DVector<f64>>,
    pub ub: Option<&'a DVector<f64>>,
}

impl<'a> StandardForm<'a> {
    pub fn kind(&self) -> ProblemKind {
        if self.p.is_some() {
            ProblemKind::Quadratic
        } else {
            ProblemKind::Linear
        }
    }

    pub fn num_vars(&self) -> usize {
        self.q.len()
    }

    pub fn num_inequalities(&self) -> usize {
        self.h.map_or(0, |h| h.len())
    }

    pub fn num_equalities(&self) -> usize {
        self.b.map_or(0, |b| b.len())
    }

    /// Inequality pair, present only when both halves are
    pub fn inequalities(&self) -> Option<(&'a DMatrix<f64>, &'a DVector<f64>)> {
        self.g.zip(self.h)
    }

    /// Equality pair, present only when both halves are
    pub fn equalities(&self) -> Option<(&'a DMatrix<f64>, &'a DVector<f64>)> {
        self.a.zip(self.b)
    }

    pub fn lower_bound(&self, i: usize) -> f64 {
        self.lb.map_or(f64::NEG_INFINITY, |lb| lb[i])
    }

    pub fn upper_bound(&self, i: usize) -> f64 {
        self.ub.map_or(f64::INFINITY, |ub| ub[i])
    }

    /// Some variable has lb > ub, so the problem is trivially infeasible
    pub fn has_crossed_bounds(&self) -> bool {
        (0..self.num_vars()).any(|i| self.lower_bound(i) > self.upper_bound(i))
    }

    /// Symmetrized quadratic cost (P + P^T) / 2, or zeros for an LP
    pub fn symmetric_p(&self) -> DMatrix<f64> {
        match self.p {
            Some(p) => (p + p.transpose()) * 0.5,
            None => DMatrix::zeros(self.num_vars(), self.num_vars()),
        }
    }

    /// Validate model dimensions
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vars();
        if n == 0 {
            return Err(LpSolverError::InvalidInput(
                "problem has no variables".to_string(),
            ));
        }
        check_finite("c", self.q.iter())?;

        if let Some(p) = self.p {
            if p.nrows() != n || p.ncols() != n {
                return Err(LpSolverError::InvalidInput(format!(
                    "P must be {}x{}, got {}x{}",
                    n,
                    n,
                    p.nrows(),
                    p.ncols()
                )));
            }
            check_finite("P", p.iter())?;
        }

        check_pair("G", self.g, "h", self.h, n)?;
        check_pair("A", self.a, "b", self.b, n)?;

        for (name, bound) in [("lb", self.lb), ("ub", self.ub)] {
            if let Some(v) = bound {
                if v.len() != n {
                    return Err(LpSolverError::InvalidInput(format!(
                        "{} must have length {}, got {}",
                        name,
                        n,
                        v.len()
                    )));
                }
                if v.iter().any(|x| x.is_nan()) {
                    return Err(LpSolverError::InvalidInput(format!(
                        "{} contains NaN",
                        name
                    )));
                }
            }
        }
        if self.lb.map_or(false, |lb| lb.iter().any(|&x| x == f64::INFINITY)) {
            return Err(LpSolverError::InvalidInput(
                "lb cannot contain +inf".to_string(),
            ));
        }
        if self.ub.map_or(false, |ub| ub.iter().any(|&x| x == f64::NEG_INFINITY)) {
            return Err(LpSolverError::InvalidInput(
                "ub cannot contain -inf".to_string(),
            ));
        }

        Ok(())
    }

    /// Objective value 0.5 * x^T P x + q^T x
    pub fn objective(&self, x: &[f64]) -> f64 {
        let x = DVector::from_column_slice(x);
        let linear = self.q.dot(&x);
        match self.p {
            Some(p) => 0.5 * x.dot(&(p * &x)) + linear,
            None => linear,
        }
    }

    /// Largest violation of any constraint or bound at x, zero when feasible
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        let xv = DVector::from_column_slice(x);
        let mut worst: f64 = 0.0;
        if let Some((g, h)) = self.inequalities() {
            for (gx, hi) in (g * &xv).iter().zip(h.iter()) {
                worst = worst.max(gx - hi);
            }
        }
        if let Some((a, b)) = self.equalities() {
            for (ax, bi) in (a * &xv).iter().zip(b.iter()) {
                worst = worst.max((ax - bi).abs());
            }
        }
        for (i, xi) in x.iter().enumerate() {
            worst = worst.max(self.lower_bound(i) - xi);
            worst = worst.max(xi - self.upper_bound(i));
        }
        worst
    }
}

fn check_finite<'v>(name: &str, mut values: impl Iterator<Item = &'v f64>) -> Result<()> {
    if values.any(|v| !v.is_finite()) {
        return Err(LpSolverError::InvalidInput(format!(
            "{} contains non-finite entries",
            name
        )));
    }
    Ok(())
}

fn check_pair(
    mat_name: &str,
    mat: Option<&DMatrix<f64>>,
    vec_name: &str,
    vec: Option<&DVector<f64>>,
    n: usize,
) -> Result<()> {
    match (mat, vec) {
        (None, None) => Ok(()),
        (Some(_), None) => Err(LpSolverError::InvalidInput(format!(
            "{} given without {}",
            mat_name, vec_name
        ))),
        (None, Some(_)) => Err(LpSolverError::InvalidInput(format!(
            "{} given without {}",
            vec_name, mat_name
        ))),
        (Some(m), Some(v)) => {
            if m.ncols() != n {
                return Err(LpSolverError::InvalidInput(format!(
                    "{} must have {} columns, got {}",
                    mat_name,
                    n,
                    m.ncols()
                )));
            }
            if m.nrows() != v.len() {
                return Err(LpSolverError::InvalidInput(format!(
                    "{} has {} rows but {} has length {}",
                    mat_name,
                    m.nrows(),
                    vec_name,
                    v.len()
                )));
            }
            check_finite(mat_name, m.iter())?;
            check_finite(vec_name, v.iter())
        }
    }
}
