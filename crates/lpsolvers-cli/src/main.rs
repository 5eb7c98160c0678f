//! lpsolve: solve an LP or QP stored as JSON with any available backend.
//!
//! ```text
//! lpsolve solve problem.json --solver clarabel --option max_iter=200
//! lpsolve solvers
//! ```

mod problem_file;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use lpsolvers::{available_solvers, qp_solvers, DispatchConfig, Dispatcher, Outcome, SolverOptions};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::problem_file::{Problem, ProblemFile};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Solve {
            problem,
            solver,
            options,
            config,
            verbose,
        } => {
            let mut dispatch_config = match config {
                Some(path) => DispatchConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => DispatchConfig::default(),
            }
            .with_env_overrides();
            dispatch_config.verbose |= verbose;

            let options = parse_options(&options)?;
            let problem = ProblemFile::from_path(&problem)
                .and_then(ProblemFile::into_problem)
                .with_context(|| format!("reading problem {}", problem.display()))?;

            let dispatcher = Dispatcher::new(dispatch_config);
            tracing::debug!(
                ?solver,
                default_solver = ?dispatcher.config().default_solver,
                options = options.len(),
                "problem loaded"
            );
            let outcome = match &problem {
                Problem::Linear(lp) => dispatcher.run_lp(lp, solver.as_deref(), &options)?,
                Problem::Quadratic(qp) => dispatcher.run_qp(qp, solver.as_deref(), &options)?,
            };
            println!("{}", render(outcome)?);
        }

        Command::Solvers => {
            let qp = qp_solvers();
            for name in available_solvers() {
                if qp.contains(&name) {
                    println!("{name} (LP, QP)");
                } else {
                    println!("{name} (LP)");
                }
            }
        }
    }
    Ok(())
}

fn parse_options(raw: &[String]) -> anyhow::Result<SolverOptions> {
    let mut options = SolverOptions::new();
    for assignment in raw {
        match SolverOptions::parse_assignment(assignment) {
            Some((key, value)) => options.set(key, value),
            None => bail!("option `{}` is not of the form key=value", assignment),
        }
    }
    Ok(options)
}

#[derive(Debug, Serialize)]
struct Report {
    solver: &'static str,
    objective: f64,
    iterations: usize,
    x: Vec<f64>,
}

/// JSON report of the optimum, or `infeasible`
fn render(outcome: Outcome) -> anyhow::Result<String> {
    let solver = outcome.solver;
    let objective = outcome.solution.objective;
    let iterations = outcome.solution.iterations;
    match outcome.into_point()? {
        Some(x) => Ok(serde_json::to_string_pretty(&Report {
            solver,
            objective,
            iterations,
            x: x.iter().copied().collect(),
        })?),
        None => Ok("infeasible".to_string()),
    }
}

#[derive(Parser)]
#[command(name = "lpsolve", version, about = "Solve linear and quadratic programs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the problem stored in a JSON file
    Solve {
        problem: PathBuf,

        /// Backend to use (see `lpsolve solvers`)
        #[arg(long)]
        solver: Option<String>,

        /// Backend option, repeatable
        #[arg(long = "option", short = 'o', value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// JSON dispatcher configuration
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, short)]
        verbose: bool,
    },

    /// List available backends
    Solvers,
}
