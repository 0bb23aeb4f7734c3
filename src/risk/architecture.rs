//! Architectural risk: layering violations, circular call chains,
//! coupling pressure, and single points of failure.

use crate::config::ArchitecturalFactorWeights;
use crate::core::BlockType;
use crate::graph::types::CallPath;
use std::collections::HashSet;

/// Callers above this many make a method a structural hotspot.
pub const HIGH_IN_DEGREE_THRESHOLD: usize = 5;
/// Average out-degree at which coupling saturates.
const OUT_DEGREE_NORMALIZER: f64 = 10.0;
/// Maximum in-degree at which single-point-of-failure risk saturates.
const MAX_IN_DEGREE_NORMALIZER: f64 = 20.0;

/// Breakdown of the architectural-risk component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArchitecturalRisk {
    pub total: f64,
    pub cross_layer_violation_ratio: f64,
    pub circular_dependency_ratio: f64,
    pub tight_coupling: f64,
    pub single_point_failure: f64,
    /// Raw transition violations, kept for signals and reporting.
    pub violation_count: usize,
    /// Raw repeated-method count, kept for signals and reporting.
    pub duplicate_count: usize,
}

/// Position of a layer in the sanctioned call ordering
/// Controller < Service < Repository < Entity < Util. Layers outside the
/// ordering do not participate in violation detection.
pub fn layer_order(block: BlockType) -> Option<u8> {
    match block {
        BlockType::Controller => Some(1),
        BlockType::Service => Some(2),
        BlockType::Repository => Some(3),
        BlockType::Entity => Some(4),
        BlockType::Util => Some(5),
        _ => None,
    }
}

pub fn score_path(path: &CallPath, weights: &ArchitecturalFactorWeights) -> ArchitecturalRisk {
    let transitions = path.hop_count();
    let violation_count = count_layer_violations(path);
    let cross_layer_violation_ratio = if transitions == 0 {
        0.0
    } else {
        violation_count as f64 / transitions as f64
    };

    let duplicate_count = count_duplicate_methods(path);
    let circular_dependency_ratio = if path.methods.is_empty() {
        0.0
    } else {
        duplicate_count as f64 / path.methods.len() as f64
    };

    let tight_coupling = tight_coupling_risk(path);
    let single_point_failure = single_point_failure_risk(path);

    let total = weights.cross_layer_violation * cross_layer_violation_ratio
        + weights.circular_dependency * circular_dependency_ratio
        + weights.tight_coupling * tight_coupling
        + weights.single_point_failure * single_point_failure;

    ArchitecturalRisk {
        total: total.clamp(0.0, 1.0),
        cross_layer_violation_ratio,
        circular_dependency_ratio,
        tight_coupling,
        single_point_failure,
        violation_count,
        duplicate_count,
    }
}

/// A transition violates layering when it inverts the ordering or skips
/// more than one level downward.
pub fn count_layer_violations(path: &CallPath) -> usize {
    path.methods
        .windows(2)
        .filter(|pair| {
            match (layer_order(pair[0].block_type), layer_order(pair[1].block_type)) {
                (Some(from), Some(to)) => to < from || to - from > 1,
                _ => false,
            }
        })
        .count()
}

/// Methods appearing more than once indicate the path folds back on
/// itself.
pub fn count_duplicate_methods(path: &CallPath) -> usize {
    let distinct: HashSet<&str> = path.methods.iter().map(|m| m.id.as_str()).collect();
    path.methods.len() - distinct.len()
}

fn tight_coupling_risk(path: &CallPath) -> f64 {
    if path.methods.is_empty() {
        return 0.0;
    }
    let avg_out = path
        .methods
        .iter()
        .map(|m| m.out_degree as f64)
        .sum::<f64>()
        / path.methods.len() as f64;
    let normalized_out = (avg_out / OUT_DEGREE_NORMALIZER).min(1.0);
    (normalized_out + path.edge_density()) / 2.0
}

fn single_point_failure_risk(path: &CallPath) -> f64 {
    if path.methods.is_empty() {
        return 0.0;
    }
    let hot = path
        .methods
        .iter()
        .filter(|m| m.in_degree > HIGH_IN_DEGREE_THRESHOLD)
        .count();
    let hot_ratio = hot as f64 / path.methods.len() as f64;
    let max_in = path.methods.iter().map(|m| m.in_degree).max().unwrap_or(0);
    let normalized_max = (max_in as f64 / MAX_IN_DEGREE_NORMALIZER).min(1.0);
    (hot_ratio + normalized_max) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::MethodNode;

    fn method(id: &str, block: BlockType) -> MethodNode {
        MethodNode::new(id, id, block)
    }

    fn layered_path(blocks: &[BlockType]) -> CallPath {
        let methods = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| method(&format!("M{i}#m{i}()"), *b))
            .collect();
        CallPath::new("p", methods)
    }

    #[test]
    fn test_clean_layering_has_no_violations() {
        let path = layered_path(&[BlockType::Controller, BlockType::Service, BlockType::Repository]);
        assert_eq!(count_layer_violations(&path), 0);
    }

    #[test]
    fn test_inversion_is_a_violation() {
        // Repository calling back into Service inverts the ordering.
        let path = layered_path(&[BlockType::Repository, BlockType::Service]);
        assert_eq!(count_layer_violations(&path), 1);
    }

    #[test]
    fn test_layer_skip_is_a_violation() {
        // Controller jumping straight to Repository skips the service layer.
        let path = layered_path(&[BlockType::Controller, BlockType::Repository]);
        assert_eq!(count_layer_violations(&path), 1);
    }

    #[test]
    fn test_unordered_layers_do_not_participate() {
        let path = layered_path(&[BlockType::Controller, BlockType::Component, BlockType::Service]);
        assert_eq!(count_layer_violations(&path), 0);
    }

    #[test]
    fn test_duplicate_methods_counted() {
        let a = method("A#a()", BlockType::Service);
        let b = method("B#b()", BlockType::Service);
        let path = CallPath::new("p", vec![a.clone(), b, a]);
        assert_eq!(count_duplicate_methods(&path), 1);
    }

    #[test]
    fn test_hotspot_raises_single_point_failure() {
        let mut hub = method("Hub#route()", BlockType::Service);
        hub.in_degree = 20;
        let quiet = method("Q#q()", BlockType::Service);

        let hot_path = CallPath::new("p", vec![hub]);
        let quiet_path = CallPath::new("p", vec![quiet]);

        let weights = ArchitecturalFactorWeights::default();
        let hot = score_path(&hot_path, &weights);
        let cold = score_path(&quiet_path, &weights);
        assert!(hot.single_point_failure > cold.single_point_failure);
        assert_eq!(hot.single_point_failure, 1.0);
    }

    #[test]
    fn test_total_is_clamped() {
        let path = layered_path(&[BlockType::Repository, BlockType::Controller, BlockType::Repository]);
        let score = score_path(&path, &ArchitecturalFactorWeights::default());
        assert!((0.0..=1.0).contains(&score.total));
        assert!(score.violation_count >= 1);
    }
}
