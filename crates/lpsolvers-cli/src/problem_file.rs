use std::path::Path;

use lpsolvers::{LinearProgram, LpSolverError, QuadraticProgram, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Problem as written in a JSON file. Matrices are lists of rows.
///
/// A file with `P` describes a QP (objective `q`), otherwise an LP
/// (objective `c`). `null` entries in `lb`/`ub` mean unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<Vec<f64>>,
    #[serde(rename = "P", alias = "p", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<Vec<f64>>,
    #[serde(rename = "G", alias = "g", default, skip_serializing_if = "Option::is_none")]
    pub g: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<Vec<f64>>,
    #[serde(rename = "A", alias = "a", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ub: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    Linear(LinearProgram),
    Quadratic(QuadraticProgram),
}

impl ProblemFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LpSolverError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Build the problem; dimensions are checked later by validation
    pub fn into_problem(self) -> Result<Problem> {
        match (self.p, self.q, self.c) {
            (Some(p), Some(q), None) => {
                let n = q.len();
                let mut qp = QuadraticProgram::new(to_matrix("P", &p, n)?, DVector::from_vec(q));
                if let Some((g, h)) = pair("G", self.g, "h", self.h, n)? {
                    qp = qp.with_inequalities(g, h);
                }
                if let Some((a, b)) = pair("A", self.a, "b", self.b, n)? {
                    qp = qp.with_equalities(a, b);
                }
                if let Some(lb) = self.lb {
                    qp = qp.with_lower_bounds(to_bounds(&lb, f64::NEG_INFINITY));
                }
                if let Some(ub) = self.ub {
                    qp = qp.with_upper_bounds(to_bounds(&ub, f64::INFINITY));
                }
                Ok(Problem::Quadratic(qp))
            }
            (None, None, Some(c)) => {
                let n = c.len();
                let mut lp = LinearProgram::new(DVector::from_vec(c));
                if let Some((g, h)) = pair("G", self.g, "h", self.h, n)? {
                    lp = lp.with_inequalities(g, h);
                }
                if let Some((a, b)) = pair("A", self.a, "b", self.b, n)? {
                    lp = lp.with_equalities(a, b);
                }
                if let Some(lb) = self.lb {
                    lp = lp.with_lower_bounds(to_bounds(&lb, f64::NEG_INFINITY));
                }
                if let Some(ub) = self.ub {
                    lp = lp.with_upper_bounds(to_bounds(&ub, f64::INFINITY));
                }
                Ok(Problem::Linear(lp))
            }
            (Some(_), None, _) => Err(LpSolverError::Config(
                "a problem with P needs its linear term in q".to_string(),
            )),
            (None, Some(_), _) => Err(LpSolverError::Config(
                "q given without P; use c for a linear program".to_string(),
            )),
            (Some(_), Some(_), Some(_)) => Err(LpSolverError::Config(
                "give either c or P and q, not both".to_string(),
            )),
            (None, None, None) => Err(LpSolverError::Config(
                "problem file has no objective (c, or P and q)".to_string(),
            )),
        }
    }
}

/// Rows to a dense matrix. An empty row list gives a 0 x n matrix.
fn to_matrix(name: &str, rows: &[Vec<f64>], n: usize) -> Result<DMatrix<f64>> {
    let ncols = rows.first().map_or(n, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(LpSolverError::Config(format!(
            "{} row {} has {} entries, expected {}",
            name,
            i,
            row.len(),
            ncols
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}

/// Matrix and right-hand side, which must be given together
fn pair(
    mat_name: &str,
    mat: Option<Vec<Vec<f64>>>,
    vec_name: &str,
    vec: Option<Vec<f64>>,
    n: usize,
) -> Result<Option<(DMatrix<f64>, DVector<f64>)>> {
    match (mat, vec) {
        (Some(m), Some(v)) => Ok(Some((to_matrix(mat_name, &m, n)?, DVector::from_vec(v)))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(LpSolverError::InvalidInput(format!(
            "{} given without {}",
            mat_name, vec_name
        ))),
        (None, Some(_)) => Err(LpSolverError::InvalidInput(format!(
            "{} given without {}",
            vec_name, mat_name
        ))),
    }
}

fn to_bounds(entries: &[Option<f64>], missing: f64) -> DVector<f64> {
    DVector::from_iterator(entries.len(), entries.iter().map(|e| e.unwrap_or(missing)))
}
