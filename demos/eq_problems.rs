use lpsolvers::{available_solvers, solve_lp, SolverOptions};
use lpsolvers_demos::{print_result, reference_problem};
use nalgebra::{DMatrix, DVector};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Linear programs with equality constraints ===\n");

    // 2 x0 = 1 and x2 = 0 on top of the reference inequalities
    let problem = reference_problem().with_equalities(
        DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        DVector::from_vec(vec![1.0, 0.0]),
    );

    let options = SolverOptions::new();
    for solver in available_solvers() {
        print_result(solver, &problem, solve_lp(&problem, Some(solver), &options));
    }
}
