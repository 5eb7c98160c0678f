//! Helpers shared by the demo programs.

use lpsolvers::{LinearProgram, Result};
use nalgebra::{DMatrix, DVector};

/// Three variables, four inequalities; optimum at [2.2, -0.8, -3.4]
pub fn reference_problem() -> LinearProgram {
    LinearProgram::new(DVector::from_vec(vec![1.0, 2.0, 3.0])).with_inequalities(
        DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 2.0, -1.0,
                2.0, 0.0, 1.0,
                1.0, 2.0, 1.0,
                -1.0, -1.0, -1.0,
            ],
        ),
        DVector::from_vec(vec![4.0, 1.0, 3.0, 2.0]),
    )
}

/// One line per solver result
pub fn print_result(label: &str, problem: &LinearProgram, result: Result<Option<DVector<f64>>>) {
    match result {
        Ok(Some(x)) => println!(
            "{:>16}: x = {:?}, objective = {:.4}",
            label,
            x.as_slice(),
            problem.objective(x.as_slice())
        ),
        Ok(None) => println!("{:>16}: infeasible", label),
        Err(e) => println!("{:>16}: error: {}", label, e),
    }
}
