// Unit tests for problem descriptions and options

#[cfg(test)]
mod tests {
    use crate::*;
    use nalgebra::{DMatrix, DVector};
    use proptest::prelude::*;

    fn small_lp() -> LinearProgram {
        let c = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let g = DMatrix::from_row_slice(4, 3, &[
            1.0, 2.0, -1.0,
            2.0, 0.0, 1.0,
            1.0, 2.0, 1.0,
            -1.0, -1.0, -1.0,
        ]);
        let h = DVector::from_vec(vec![4.0, 1.0, 3.0, 2.0]);
        LinearProgram::new(c).with_inequalities(g, h)
    }

    #[test]
    fn test_lp_validation() {
        let lp = small_lp();
        assert!(lp.validate().is_ok());
        assert_eq!(lp.num_vars(), 3);
        assert_eq!(lp.num_inequalities(), 4);
        assert_eq!(lp.num_equalities(), 0);
    }

    #[test]
    fn test_mismatched_h_length() {
        let mut lp = small_lp();
        lp.h = Some(DVector::from_vec(vec![4.0, 1.0, 3.0]));
        let err = lp.validate().unwrap_err();
        assert!(matches!(err, LpSolverError::InvalidInput(_)));
        assert!(err.to_string().contains("G has 4 rows"));
    }

    #[test]
    fn test_mismatched_g_columns() {
        let mut lp = small_lp();
        lp.g = Some(DMatrix::zeros(4, 2));
        assert!(matches!(lp.validate(), Err(LpSolverError::InvalidInput(_))));
    }

    #[test]
    fn test_half_pairs_rejected() {
        let mut lp = small_lp();
        lp.h = None;
        assert!(lp.validate().is_err());

        let mut lp = small_lp();
        lp.b = Some(DVector::from_vec(vec![1.0]));
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_equalities_and_bounds_validation() {
        let lp = small_lp()
            .with_equalities(
                DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
                DVector::from_vec(vec![1.0, 0.0]),
            )
            .with_bounds(
                DVector::from_element(3, f64::NEG_INFINITY),
                DVector::from_element(3, f64::INFINITY),
            );
        assert!(lp.validate().is_ok());
        assert_eq!(lp.num_equalities(), 2);

        let short = small_lp().with_lower_bounds(DVector::from_vec(vec![0.0, 0.0]));
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_crossed_bounds_are_valid_input() {
        // lb > ub is infeasible, not malformed
        let lp = LinearProgram::new(DVector::from_vec(vec![1.0]))
            .with_bounds(DVector::from_vec(vec![1.0]), DVector::from_vec(vec![0.0]));
        assert!(lp.validate().is_ok());
    }

    #[test]
    fn test_non_finite_entries_rejected() {
        let lp = LinearProgram::new(DVector::from_vec(vec![1.0, f64::NAN]));
        assert!(lp.validate().is_err());

        let mut lp = small_lp();
        lp.h = Some(DVector::from_vec(vec![4.0, f64::INFINITY, 3.0, 2.0]));
        assert!(lp.validate().is_err());

        let lp = LinearProgram::new(DVector::from_vec(vec![1.0]))
            .with_lower_bounds(DVector::from_vec(vec![f64::INFINITY]));
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_empty_problem_rejected() {
        let lp = LinearProgram::new(DVector::zeros(0));
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_qp_validation() {
        let qp = QuadraticProgram::new(DMatrix::identity(2, 2), DVector::from_vec(vec![1.0, 1.0]));
        assert!(qp.validate().is_ok());

        let bad = QuadraticProgram::new(DMatrix::identity(3, 3), DVector::from_vec(vec![1.0, 1.0]));
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("P must be 2x2"));
    }

    #[test]
    fn test_lp_into_qp() {
        let qp: QuadraticProgram = small_lp().into();
        assert_eq!(qp.p, DMatrix::zeros(3, 3));
        assert_eq!(qp.num_inequalities(), 4);
        assert_eq!(qp.standard_form().kind(), ProblemKind::Quadratic);
        assert_eq!(small_lp().standard_form().kind(), ProblemKind::Linear);
    }

    #[test]
    fn test_objective_and_violation() {
        let lp = small_lp();
        let x = [2.2, -0.8, -3.4];
        assert!((lp.objective(&x) - (2.2 - 1.6 - 10.2)).abs() < 1e-12);
        assert!(lp.standard_form().max_violation(&x) < 1e-12);
        assert!(lp.standard_form().max_violation(&[10.0, 0.0, 0.0]) > 1.0);

        let qp = QuadraticProgram::new(DMatrix::identity(2, 2) * 2.0, DVector::from_vec(vec![-1.0, 0.0]));
        // 0.5 * 2 * (1 + 4) - 1
        assert!((qp.objective(&[1.0, 2.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_p() {
        let p = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]);
        let qp = QuadraticProgram::new(p, DVector::zeros(2));
        let sym = qp.standard_form().symmetric_p();
        assert_eq!(sym[(0, 1)], 1.0);
        assert_eq!(sym[(1, 0)], 1.0);
    }

    #[test]
    fn test_partial_bounds() {
        let lp = LinearProgram::new(DVector::from_vec(vec![1.0, 1.0]))
            .with_lower_bounds(DVector::from_vec(vec![0.0, f64::NEG_INFINITY]))
            .with_upper_bounds(DVector::from_vec(vec![1.0, 2.0]));
        let form = lp.standard_form();
        assert_eq!(form.lower_bound(0), 0.0);
        assert_eq!(form.lower_bound(1), f64::NEG_INFINITY);
        assert_eq!(form.upper_bound(1), 2.0);
        assert_eq!(small_lp().standard_form().upper_bound(0), f64::INFINITY);
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!(OptionValue::parse("true"), OptionValue::Bool(true));
        assert_eq!(OptionValue::parse("3"), OptionValue::Int(3));
        assert_eq!(OptionValue::parse("1e-6"), OptionValue::Float(1e-6));
        assert_eq!(OptionValue::parse("1, 2.5"), OptionValue::Vector(vec![1.0, 2.5]));
        assert_eq!(OptionValue::parse("qdldl"), OptionValue::Str("qdldl".to_string()));

        let (k, v) = SolverOptions::parse_assignment("max_iter=200").unwrap();
        assert_eq!(k, "max_iter");
        assert_eq!(v.as_u32(), Some(200));
        assert!(SolverOptions::parse_assignment("novalue").is_none());
        assert!(SolverOptions::parse_assignment("=3").is_none());
    }

    #[test]
    fn test_option_coercions() {
        assert_eq!(OptionValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(OptionValue::Float(4.0).as_u32(), Some(4));
        assert_eq!(OptionValue::Float(4.5).as_u32(), None);
        assert_eq!(OptionValue::Int(-1).as_u32(), None);
        assert_eq!(OptionValue::Int(1).as_bool(), Some(true));
        assert_eq!(OptionValue::Str("x".into()).as_f64(), None);
    }

    #[test]
    fn test_options_merge_and_serde() {
        let defaults = SolverOptions::new().with("verbose", false).with("max_iter", 50);
        let overrides = SolverOptions::new().with("max_iter", 100).with("tol_feas", 1e-9);
        let merged = overrides.merged_over(&defaults);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("max_iter"), Some(&OptionValue::Int(100)));
        assert_eq!(merged.get("verbose"), Some(&OptionValue::Bool(false)));

        let json = serde_json::to_string(&merged).unwrap();
        let back: SolverOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, merged);

        let parsed: SolverOptions =
            serde_json::from_str(r#"{"solver": "glpk", "initvals": [1.0, 2.0]}"#).unwrap();
        assert_eq!(parsed.get("solver").and_then(|v| v.as_str()), Some("glpk"));
        assert_eq!(parsed.get("initvals").and_then(|v| v.as_vector()), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_status_classification() {
        assert!(SolutionStatus::PrimalInfeasible.is_infeasible());
        assert!(SolutionStatus::DualInfeasible.is_infeasible());
        assert!(!SolutionStatus::MaxIterations.is_infeasible());
        assert!(Solution::optimal(vec![1.0], 1.0, 3).is_optimal());
        assert!(!Solution::without_point(SolutionStatus::Unsolved, 0).is_optimal());
    }

    proptest! {
        #[test]
        fn prop_row_mismatch_always_rejected(n in 1usize..6, m in 1usize..6, extra in 1usize..3) {
            let lp = LinearProgram::new(DVector::from_element(n, 1.0))
                .with_inequalities(DMatrix::zeros(m, n), DVector::zeros(m + extra));
            prop_assert!(matches!(lp.validate(), Err(LpSolverError::InvalidInput(_))));
        }

        #[test]
        fn prop_consistent_dimensions_accepted(n in 1usize..6, m in 0usize..6, meq in 0usize..4) {
            let lp = LinearProgram::new(DVector::from_element(n, 1.0))
                .with_inequalities(DMatrix::from_element(m, n, 0.5), DVector::from_element(m, 1.0))
                .with_equalities(DMatrix::from_element(meq, n, 1.0), DVector::zeros(meq))
                .with_bounds(DVector::zeros(n), DVector::from_element(n, 1.0));
            prop_assert!(lp.validate().is_ok());
        }
    }
}
