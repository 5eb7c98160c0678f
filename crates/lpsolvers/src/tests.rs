// Unit tests for the registry, configuration and dispatcher

#[cfg(test)]
mod tests {
    use crate::*;
    use nalgebra::{DMatrix, DVector};

    fn small_lp() -> LinearProgram {
        LinearProgram::new(DVector::from_vec(vec![-1.0, -2.0]))
            .with_inequalities(
                DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
                DVector::from_vec(vec![3.0]),
            )
            .with_lower_bounds(DVector::zeros(2))
    }

    fn small_qp() -> QuadraticProgram {
        // min 1/2 |x|^2 - x0 - x1  s.t.  x0 + x1 <= 1
        QuadraticProgram::new(
            DMatrix::identity(2, 2),
            DVector::from_vec(vec![-1.0, -1.0]),
        )
        .with_inequalities(
            DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            DVector::from_vec(vec![1.0]),
        )
    }

    #[cfg(any(feature = "clarabel", feature = "microlp", feature = "good_lp", feature = "osqp", feature = "highs"))]
    #[test]
    fn test_registry_lists_default_backends() {
        let names = available_solvers();
        assert!(!names.is_empty());
        #[cfg(feature = "clarabel")]
        assert_eq!(names[0], "clarabel");
        #[cfg(feature = "microlp")]
        assert!(is_available("microlp"));
        assert!(!is_available("cplex"));
    }

    #[test]
    fn test_qp_solvers_are_a_subset() {
        let all = available_solvers();
        for name in qp_solvers() {
            assert!(all.contains(&name), "{} missing from available solvers", name);
        }
        #[cfg(feature = "microlp")]
        assert!(!qp_solvers().contains(&"microlp"));
    }

    #[test]
    fn test_unknown_solver_is_not_found() {
        let result = Dispatcher::default().solve_lp(&small_lp(), Some("cplex"), &SolverOptions::new());
        match result {
            Err(LpSolverError::SolverNotFound(name)) => assert_eq!(name, "cplex"),
            other => panic!("expected SolverNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_checked_before_solver_lookup() {
        let problem = LinearProgram::new(DVector::from_vec(vec![1.0, 1.0])).with_inequalities(
            DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            DVector::from_vec(vec![1.0, 2.0]),
        );
        let result = Dispatcher::default().solve_lp(&problem, Some("cplex"), &SolverOptions::new());
        assert!(matches!(result, Err(LpSolverError::InvalidInput(_))));
    }

    #[cfg(any(feature = "clarabel", feature = "microlp", feature = "good_lp", feature = "osqp", feature = "highs"))]
    #[test]
    fn test_default_dispatch_solves_small_lp() {
        let x = Dispatcher::default()
            .solve_lp(&small_lp(), None, &SolverOptions::new())
            .unwrap()
            .expect("problem is feasible");
        assert!((x[0] - 0.0).abs() < 1e-4);
        assert!((x[1] - 3.0).abs() < 1e-4);
    }

    #[cfg(not(any(
        feature = "clarabel",
        feature = "microlp",
        feature = "good_lp",
        feature = "osqp",
        feature = "highs"
    )))]
    #[test]
    fn test_no_backend_compiled_in() {
        assert!(available_solvers().is_empty());
        let result = Dispatcher::default().solve_lp(&small_lp(), None, &SolverOptions::new());
        assert!(matches!(result, Err(LpSolverError::NoSolverSelected)));
        let result = Dispatcher::default().solve_qp(&small_qp(), None, &SolverOptions::new());
        assert!(matches!(result, Err(LpSolverError::NoSolverSelected)));
    }

    #[cfg(any(feature = "clarabel", feature = "osqp"))]
    #[test]
    fn test_default_dispatch_solves_small_qp() {
        let x = Dispatcher::default()
            .solve_qp(&small_qp(), None, &SolverOptions::new())
            .unwrap()
            .expect("problem is feasible");
        assert!((x[0] - 0.5).abs() < 1e-4);
        assert!((x[1] - 0.5).abs() < 1e-4);
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_qp_to_lp_only_solver_is_unsupported() {
        let result = Dispatcher::default().solve_qp(&small_qp(), Some("microlp"), &SolverOptions::new());
        match result {
            Err(LpSolverError::UnsupportedProblem { solver, kind }) => {
                assert_eq!(solver, "microlp");
                assert_eq!(kind, ProblemKind::Quadratic);
            }
            other => panic!("expected UnsupportedProblem, got {:?}", other),
        }
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_unbounded_lp_returns_none() {
        // min -x0 with x0 only bounded below
        let problem = LinearProgram::new(DVector::from_vec(vec![-1.0]))
            .with_lower_bounds(DVector::zeros(1));
        let x = Dispatcher::default()
            .solve_lp(&problem, Some("microlp"), &SolverOptions::new())
            .unwrap();
        assert!(x.is_none());
    }

    #[cfg(feature = "clarabel")]
    #[test]
    fn test_infeasible_lp_returns_none() {
        // x0 >= 2 and x0 <= 1
        let problem = LinearProgram::new(DVector::from_vec(vec![1.0])).with_inequalities(
            DMatrix::from_row_slice(2, 1, &[-1.0, 1.0]),
            DVector::from_vec(vec![-2.0, 1.0]),
        );
        let x = Dispatcher::default()
            .solve_lp(&problem, Some("clarabel"), &SolverOptions::new())
            .unwrap();
        assert!(x.is_none());
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_configured_default_solver_is_used() {
        let dispatcher = Dispatcher::new(DispatchConfig::default().with_default_solver("microlp"));
        let outcome = dispatcher.run_lp(&small_lp(), None, &SolverOptions::new()).unwrap();
        assert_eq!(outcome.solver, "microlp");
        assert!((outcome.solution.objective + 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_configured_default_solver_must_exist() {
        let dispatcher = Dispatcher::new(DispatchConfig::default().with_default_solver("cplex"));
        let result = dispatcher.solve_lp(&small_lp(), None, &SolverOptions::new());
        assert!(matches!(result, Err(LpSolverError::SolverNotFound(_))));
    }

    // The only test in this crate touching the process environment
    #[test]
    fn test_solver_env_var() {
        std::env::set_var(SOLVER_ENV_VAR, " microlp ");
        assert_eq!(DispatchConfig::from_env().default_solver.as_deref(), Some("microlp"));

        std::env::set_var(SOLVER_ENV_VAR, "   ");
        assert_eq!(DispatchConfig::from_env().default_solver, None);
        let configured = DispatchConfig::default().with_default_solver("clarabel");
        assert_eq!(
            configured.with_env_overrides().default_solver.as_deref(),
            Some("clarabel")
        );

        std::env::set_var(SOLVER_ENV_VAR, "cplex");
        let result = solve_lp(&small_lp(), None, &SolverOptions::new());
        std::env::remove_var(SOLVER_ENV_VAR);
        match result {
            Err(LpSolverError::SolverNotFound(name)) => assert_eq!(name, "cplex"),
            other => panic!("expected SolverNotFound, got {:?}", other),
        }
    }

    #[cfg(feature = "clarabel")]
    #[test]
    fn test_configured_options_reach_backend() {
        let config = DispatchConfig::default().with_solver_options(
            "clarabel",
            SolverOptions::new().with("no_such_setting", 1.0),
        );
        let result = Dispatcher::new(config).solve_lp(&small_lp(), Some("clarabel"), &SolverOptions::new());
        match result {
            Err(LpSolverError::InvalidOption { solver, option, .. }) => {
                assert_eq!(solver, "clarabel");
                assert_eq!(option, "no_such_setting");
            }
            other => panic!("expected InvalidOption, got {:?}", other),
        }
    }

    #[test]
    fn test_call_options_override_configured_ones() {
        let config = DispatchConfig::default()
            .with_solver_options("clarabel", SolverOptions::new().with("max_iter", 10u32));
        let merged = config.options_for(
            "clarabel",
            &SolverOptions::new().with("max_iter", 200u32),
        );
        assert_eq!(merged.get("max_iter").and_then(OptionValue::as_u32), Some(200));

        let other = config.options_for("microlp", &SolverOptions::new());
        assert!(other.is_empty());
    }

    #[test]
    fn test_verbose_config_sets_option() {
        let config = DispatchConfig {
            verbose: true,
            ..Default::default()
        };
        let merged = config.options_for("clarabel", &SolverOptions::new());
        assert_eq!(merged.get("verbose").and_then(OptionValue::as_bool), Some(true));

        let quiet = config.options_for("clarabel", &SolverOptions::new().with("verbose", false));
        assert_eq!(quiet.get("verbose").and_then(OptionValue::as_bool), Some(false));
    }

    #[test]
    fn test_config_from_json() {
        let config = DispatchConfig::from_json_str(
            r#"{
                "default_solver": "clarabel",
                "solver_options": { "clarabel": { "max_iter": 50, "tol_feas": 1e-9 } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_solver.as_deref(), Some("clarabel"));
        assert!(!config.verbose);
        let opts = &config.solver_options["clarabel"];
        assert_eq!(opts.get("max_iter").and_then(OptionValue::as_u32), Some(50));
        assert_eq!(opts.get("tol_feas").and_then(OptionValue::as_f64), Some(1e-9));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lpsolvers.json");
        std::fs::write(&path, r#"{ "verbose": true }"#).unwrap();

        let config = DispatchConfig::from_file(&path).unwrap();
        assert!(config.verbose);
        assert!(config.default_solver.is_none());

        let missing = DispatchConfig::from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LpSolverError::Config(_))));
    }

    #[test]
    fn test_malformed_config_is_serialization_error() {
        let result = DispatchConfig::from_json_str(r#"{ "verbose": "sometimes" }"#);
        assert!(matches!(result, Err(LpSolverError::Serialization(_))));
    }

    #[test]
    fn test_outcome_reduction() {
        let optimal = Outcome {
            solver: "clarabel",
            solution: Solution::optimal(vec![1.0, 2.0], 3.0, 5),
        };
        assert_eq!(
            optimal.into_point().unwrap(),
            Some(DVector::from_vec(vec![1.0, 2.0]))
        );

        for status in [SolutionStatus::PrimalInfeasible, SolutionStatus::DualInfeasible] {
            let outcome = Outcome {
                solver: "clarabel",
                solution: Solution::without_point(status, 7),
            };
            assert_eq!(outcome.into_point().unwrap(), None);
        }

        let stalled = Outcome {
            solver: "clarabel",
            solution: Solution::without_point(SolutionStatus::MaxIterations, 200),
        };
        match stalled.into_point() {
            Err(LpSolverError::Backend { solver, message }) => {
                assert_eq!(solver, "clarabel");
                assert_eq!(message, "iteration limit reached");
            }
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[cfg(feature = "clarabel")]
    mod properties {
        use crate::*;
        use nalgebra::DVector;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            // A box-constrained LP is minimized at the bound picked by the sign of c
            #[test]
            fn box_lp_lands_on_bounds(
                entries in prop::collection::vec((-5.0f64..5.0, -3.0f64..0.0, 0.5f64..3.0), 1..6)
            ) {
                let c: Vec<f64> = entries.iter().map(|e| if e.0.abs() < 0.1 { 1.0 } else { e.0 }).collect();
                let lb: Vec<f64> = entries.iter().map(|e| e.1).collect();
                let ub: Vec<f64> = entries.iter().map(|e| e.1 + e.2).collect();
                let problem = LinearProgram::new(DVector::from_vec(c.clone()))
                    .with_bounds(DVector::from_vec(lb.clone()), DVector::from_vec(ub.clone()));

                let x = Dispatcher::default()
                    .solve_lp(&problem, Some("clarabel"), &SolverOptions::new())
                    .unwrap()
                    .unwrap();
                for i in 0..c.len() {
                    let expected = if c[i] > 0.0 { lb[i] } else { ub[i] };
                    prop_assert!((x[i] - expected).abs() < 1e-4);
                }
            }
        }
    }
}
