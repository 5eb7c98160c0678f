//! Problem fixtures and tolerances shared by the cross-backend test suite.

use lpsolvers::{LinearProgram, QuadraticProgram};
use nalgebra::{DMatrix, DVector};

/// `min c^T x` over four inequalities; optimum at [`REFERENCE_SOLUTION`]
pub fn reference_lp() -> LinearProgram {
    LinearProgram::new(DVector::from_vec(vec![1.0, 2.0, 3.0]))
        .with_inequalities(reference_g(), DVector::from_vec(vec![4.0, 1.0, 3.0, 2.0]))
}

pub const REFERENCE_SOLUTION: [f64; 3] = [2.2, -0.8, -3.4];

fn reference_g() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        4,
        3,
        &[
            1.0, 2.0, -1.0,
            2.0, 0.0, 1.0,
            1.0, 2.0, 1.0,
            -1.0, -1.0, -1.0,
        ],
    )
}

/// Only the second inequality of [`reference_lp`]: unbounded below
pub fn one_inequality_lp() -> LinearProgram {
    LinearProgram::new(DVector::from_vec(vec![1.0, 2.0, 3.0])).with_inequalities(
        DMatrix::from_row_slice(1, 3, &[2.0, 0.0, 1.0]),
        DVector::from_vec(vec![1.0]),
    )
}

/// [`reference_lp`] with its second inequality negated: no finite optimum
pub fn negated_row_lp() -> LinearProgram {
    let mut g = reference_g();
    g.row_mut(1).neg_mut();
    LinearProgram::new(DVector::from_vec(vec![1.0, 2.0, 3.0]))
        .with_inequalities(g, DVector::from_vec(vec![4.0, 1.0, 3.0, 2.0]))
}

/// [`reference_lp`] plus `2 x0 = 1`, `x2 = 0`; optimum at [`EQUALITY_SOLUTION`]
pub fn equality_lp() -> LinearProgram {
    reference_lp().with_equalities(
        DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        DVector::from_vec(vec![1.0, 0.0]),
    )
}

pub const EQUALITY_SOLUTION: [f64; 3] = [0.5, -2.5, 0.0];

/// `min -sum(x)` with `x <= 0`, optimum at the origin
pub fn identity_lp(n: usize) -> LinearProgram {
    LinearProgram::new(DVector::from_element(n, -1.0))
        .with_inequalities(DMatrix::identity(n, n), DVector::zeros(n))
}

/// `c=[-1,-2]`, `x0 + x1 <= 3`, `x >= 0`; optimum `[0, 3]` with objective -6
pub fn two_variable_lp() -> LinearProgram {
    LinearProgram::new(DVector::from_vec(vec![-1.0, -2.0]))
        .with_inequalities(
            DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            DVector::from_vec(vec![3.0]),
        )
        .with_lower_bounds(DVector::zeros(2))
}

/// Projection of `(1, 2, 3)` onto `{x >= 0, sum(x) = 1, x2 <= 0.5}`
pub fn projection_qp() -> QuadraticProgram {
    QuadraticProgram::new(
        DMatrix::identity(3, 3),
        DVector::from_vec(vec![-1.0, -2.0, -3.0]),
    )
    .with_inequalities(
        DMatrix::from_row_slice(1, 3, &[0.0, 0.0, 1.0]),
        DVector::from_vec(vec![0.5]),
    )
    .with_equalities(DMatrix::from_row_slice(1, 3, &[1.0, 1.0, 1.0]), DVector::from_vec(vec![1.0]))
    .with_lower_bounds(DVector::zeros(3))
}

pub const PROJECTION_SOLUTION: [f64; 3] = [0.0, 0.5, 0.5];

/// Accuracy to expect from a backend at its default settings
pub fn tolerance(solver: &str) -> f64 {
    match solver {
        // first-order methods
        "osqp" | "pdlp" => 1e-2,
        _ => 1e-5,
    }
}

/// Whether a backend reliably reports infeasible or unbounded problems
pub fn detects_infeasibility(solver: &str) -> bool {
    solver != "pdlp"
}

pub fn assert_close(solver: &str, x: &DVector<f64>, expected: &[f64]) {
    assert_eq!(x.len(), expected.len(), "{}: wrong dimension", solver);
    let tol = tolerance(solver);
    for (i, (xi, ei)) in x.iter().zip(expected).enumerate() {
        assert!(
            (xi - ei).abs() < tol,
            "{}: x[{}] = {} but expected {} (x = {:?})",
            solver,
            i,
            xi,
            ei,
            x.as_slice()
        );
    }
}
