//! Property tests over randomly shaped paths: score clamping, partition,
//! and classification determinism must hold for any input.

use pathlens::{
    BlockType, CalculationContext, CallPath, IntentCalculator, MethodNode, PathAnalyzer, PathType,
    RiskCalculator,
};
use proptest::prelude::*;

fn arb_block_type() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::Controller),
        Just(BlockType::Service),
        Just(BlockType::Repository),
        Just(BlockType::Mapper),
        Just(BlockType::Entity),
        Just(BlockType::Dto),
        Just(BlockType::Util),
        Just(BlockType::Component),
        Just(BlockType::Other),
    ]
}

prop_compose! {
    fn arb_method()(
        block in arb_block_type(),
        complexity in 1u32..60,
        loc in 0usize..400,
        in_degree in 0usize..40,
        out_degree in 0usize..40,
        tested in any::<bool>(),
        transactional in any::<bool>(),
    ) -> MethodNode {
        let mut m = MethodNode::new("Class#method()", "method", block);
        m.cyclomatic_complexity = complexity;
        m.lines_of_code = loc;
        m.in_degree = in_degree;
        m.out_degree = out_degree;
        m.has_tests = tested;
        m.signature = format!("method({complexity})");
        if transactional {
            m.annotations.insert("@Transactional".to_string());
        }
        m
    }
}

fn arb_path() -> impl Strategy<Value = CallPath> {
    proptest::collection::vec(arb_method(), 1..8).prop_map(|mut methods| {
        for (i, m) in methods.iter_mut().enumerate() {
            m.id = format!("Class{i}#method{i}()");
            m.method_name = format!("method{i}");
        }
        CallPath::new("arb", methods)
    })
}

proptest! {
    #[test]
    fn prop_intent_total_is_clamped(path in arb_path()) {
        let result = IntentCalculator::default()
            .calculate_path_intent(&path, &CalculationContext::default());
        prop_assert!((0.0..=1.0).contains(&result.total));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!((0.0..=1.0).contains(&result.business.total));
        prop_assert!((0.0..=1.0).contains(&result.completeness.total));
        prop_assert!((0.0..=1.0).contains(&result.quality.total));
    }

    #[test]
    fn prop_risk_total_is_clamped(path in arb_path()) {
        let changed = CalculationContext::with_changed_methods(
            path.methods.iter().take(2).map(|m| m.id.clone()),
        );
        let result = RiskCalculator::default().calculate_path_risk(&path, &changed);
        prop_assert!((0.0..=1.0).contains(&result.total));
        prop_assert!((0.0..=1.0).contains(&result.blast_radius));
        prop_assert!((0.0..=1.0).contains(&result.change_complexity));
        prop_assert!((0.0..=1.0).contains(&result.architectural.total));
        prop_assert!((0.0..=1.0).contains(&result.data_flow.total));
    }

    #[test]
    fn prop_every_path_lands_in_exactly_one_bucket(
        paths in proptest::collection::vec(arb_path(), 1..6)
    ) {
        let paths: Vec<CallPath> = paths
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                p.id = format!("p{i}");
                p
            })
            .collect();
        let expected = paths.len();

        let result = PathAnalyzer::default()
            .analyze_paths(paths, &CalculationContext::default(), None)
            .unwrap();
        prop_assert_eq!(result.total_analyzed_paths, expected);
        prop_assert_eq!(result.all_paths().count(), expected);

        // Critical-tagged paths stay inside the neutral bucket.
        for analyzed in &result.golden_paths {
            prop_assert_eq!(analyzed.path_type, PathType::Golden);
        }
        for analyzed in &result.risk_paths {
            prop_assert_eq!(analyzed.path_type, PathType::Risk);
        }
        for analyzed in &result.neutral_paths {
            prop_assert!(matches!(
                analyzed.path_type,
                PathType::Neutral | PathType::Critical
            ));
        }
    }

    #[test]
    fn prop_classification_is_deterministic(path in arb_path()) {
        let ctx = CalculationContext::default();
        let analyzer = PathAnalyzer::default();
        let first = analyzer
            .analyze_paths(vec![path.clone()], &ctx, None)
            .unwrap();
        let second = analyzer.analyze_paths(vec![path], &ctx, None).unwrap();

        let shape = |r: &pathlens::PathAnalysisResult| {
            (
                r.golden_paths.len(),
                r.risk_paths.len(),
                r.neutral_paths.len(),
            )
        };
        prop_assert_eq!(shape(&first), shape(&second));
    }
}
