use lpsolvers::{available_solvers, solve_lp, LinearProgram, SolverOptions};
use lpsolvers_demos::{print_result, reference_problem};
use nalgebra::{DMatrix, DVector};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Small linear programs ===\n");

    let problems = vec![
        // min -sum(x) with x <= 0
        LinearProgram::new(DVector::from_element(10, -1.0))
            .with_inequalities(DMatrix::identity(10, 10), DVector::zeros(10)),
        reference_problem(),
    ];

    let options = SolverOptions::new();
    for (i, problem) in problems.iter().enumerate() {
        println!("LP {}:", i);
        for solver in available_solvers() {
            print_result(solver, problem, solve_lp(problem, Some(solver), &options));
        }
        println!();
    }
}
