//! Code-quality scoring: starts from a perfect 1.0 and applies penalty
//! and bonus adjustments derived from path structure.

use crate::graph::types::{CallPath, MethodNode};
use crate::intent::lexicon;

/// Breakdown of the code-quality component. The adjustment fields record
/// the raw factor values, not the weighted contributions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QualityScore {
    pub total: f64,
    pub complexity_penalty: f64,
    pub duplication_penalty: f64,
    pub design_pattern_bonus: f64,
    pub naming_score: f64,
    pub connectivity: f64,
}

const COMPLEXITY_WEIGHT: f64 = 0.30;
const DUPLICATION_WEIGHT: f64 = 0.25;
const DESIGN_PATTERN_WEIGHT: f64 = 0.20;
const NAMING_WEIGHT: f64 = 0.15;
const CONNECTIVITY_WEIGHT: f64 = 0.10;

/// Duplication evidence above this level stops counting against quality.
const DUPLICATION_PENALTY_CAP: f64 = 0.5;

/// Penalty band for average cyclomatic complexity along a path.
pub fn complexity_penalty(average_complexity: f64) -> f64 {
    if average_complexity <= 5.0 {
        0.0
    } else if average_complexity <= 10.0 {
        0.2
    } else if average_complexity <= 15.0 {
        0.5
    } else {
        0.8
    }
}

pub fn score_path(path: &CallPath) -> QualityScore {
    let complexity = complexity_penalty(path.average_complexity());
    let duplication = (1.0 - path.distinct_signature_ratio()).min(DUPLICATION_PENALTY_CAP);
    // Reserved: pattern detection is an external collaborator concern.
    let design_pattern_bonus = 0.0;
    let naming = naming_score(&path.methods);
    let connectivity = path.edge_density();

    compose(complexity, duplication, design_pattern_bonus, naming, connectivity)
}

/// Single-method analogue: duplication and connectivity carry no
/// information for one method and are held neutral.
pub fn score_method(method: &MethodNode) -> QualityScore {
    let complexity = complexity_penalty(method.cyclomatic_complexity as f64);
    let naming = if lexicon::is_well_named(&method.method_name) {
        1.0
    } else {
        0.0
    };
    compose(complexity, 0.0, 0.0, naming, 0.5)
}

/// Fraction of methods with intentional names.
fn naming_score(methods: &[MethodNode]) -> f64 {
    if methods.is_empty() {
        return 0.0;
    }
    let good = methods
        .iter()
        .filter(|m| lexicon::is_well_named(&m.method_name))
        .count();
    good as f64 / methods.len() as f64
}

fn compose(
    complexity_penalty: f64,
    duplication_penalty: f64,
    design_pattern_bonus: f64,
    naming_score: f64,
    connectivity: f64,
) -> QualityScore {
    let total = 1.0 - COMPLEXITY_WEIGHT * complexity_penalty
        - DUPLICATION_WEIGHT * duplication_penalty
        + DESIGN_PATTERN_WEIGHT * design_pattern_bonus
        + NAMING_WEIGHT * (naming_score - 0.5)
        + CONNECTIVITY_WEIGHT * (connectivity - 0.5);
    QualityScore {
        total: total.clamp(0.0, 1.0),
        complexity_penalty,
        duplication_penalty,
        design_pattern_bonus,
        naming_score,
        connectivity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;
    use crate::graph::types::CallEdge;

    fn method(name: &str, complexity: u32) -> MethodNode {
        let mut m = MethodNode::new(format!("A#{name}()"), name, BlockType::Service);
        m.cyclomatic_complexity = complexity;
        m.signature = format!("{name}()");
        m
    }

    #[test]
    fn test_complexity_penalty_bands() {
        assert_eq!(complexity_penalty(3.0), 0.0);
        assert_eq!(complexity_penalty(5.0), 0.0);
        assert_eq!(complexity_penalty(7.0), 0.2);
        assert_eq!(complexity_penalty(12.0), 0.5);
        assert_eq!(complexity_penalty(30.0), 0.8);
    }

    #[test]
    fn test_simple_well_named_connected_path_scores_high() {
        let a = method("placeOrder", 2);
        let b = method("saveOrder", 3);
        let edge = CallEdge::new(a.id.clone(), b.id.clone());
        let path = CallPath::new("p", vec![a, b]).with_edges(vec![Some(edge)]);

        let score = score_path(&path);
        // No penalties, naming 1.0, connectivity 1.0:
        // 1.0 + 0.15 * 0.5 + 0.10 * 0.5 = 1.125, clamped to 1.0.
        assert_eq!(score.total, 1.0);
    }

    #[test]
    fn test_complex_path_is_penalized() {
        let path = CallPath::new("p", vec![method("placeOrder", 20), method("saveOrder", 20)]);
        let score = score_path(&path);
        assert_eq!(score.complexity_penalty, 0.8);
        assert!(score.total < 0.9);
    }

    #[test]
    fn test_duplication_cap() {
        // Four methods sharing one signature: ratio 0.25, raw penalty 0.75.
        let mut methods = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let mut m = method(name, 1);
            m.signature = "same()".to_string();
            methods.push(m);
        }
        let path = CallPath::new("p", methods);
        let score = score_path(&path);
        assert_eq!(score.duplication_penalty, DUPLICATION_PENALTY_CAP);
    }

    #[test]
    fn test_method_variant_holds_neutral_factors() {
        let score = score_method(&method("calculateTotal", 4));
        assert_eq!(score.duplication_penalty, 0.0);
        assert_eq!(score.connectivity, 0.5);
        assert_eq!(score.naming_score, 1.0);
    }

    #[test]
    fn test_quality_clamped_to_unit_interval() {
        let bad = method("x", 40);
        let path = CallPath::new("p", vec![bad]);
        let score = score_path(&path);
        assert!((0.0..=1.0).contains(&score.total));
    }
}
