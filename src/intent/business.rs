//! Business-value scoring: how much durable business behavior a path
//! carries.

use crate::config::BusinessFactorWeights;
use crate::core::{BlockType, CommitInfo};
use crate::graph::types::{CallPath, MethodNode};
use crate::intent::lexicon;

/// Breakdown of the business-value component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BusinessValueScore {
    pub total: f64,
    pub keyword_overlap: f64,
    pub semantic_match: f64,
    pub layer_importance: f64,
    pub activity: f64,
}

/// Business importance of an architectural layer. Unmapped layers fall
/// through to the 0.2 floor.
pub fn layer_weight(block: BlockType) -> f64 {
    match block {
        BlockType::Controller => 0.9,
        BlockType::Service => 0.8,
        BlockType::Component => 0.7,
        BlockType::Repository => 0.6,
        BlockType::Entity => 0.5,
        BlockType::Config => 0.4,
        BlockType::Dto | BlockType::Vo => 0.4,
        BlockType::Util => 0.3,
        _ => 0.2,
    }
}

/// Logarithmic popularity of a method: `ln(inDegree + 1) / ln(10)`,
/// saturating at 1.0 (an in-degree of nine callers or more).
pub fn activity_score(method: &MethodNode) -> f64 {
    (((method.in_degree + 1) as f64).ln() / 10f64.ln()).min(1.0)
}

pub fn score_path(
    path: &CallPath,
    history: &[CommitInfo],
    weights: &BusinessFactorWeights,
) -> BusinessValueScore {
    let keyword_overlap = keyword_overlap(path, history);
    let semantic_match = semantic_match(path);
    let layer_importance = average(path.methods.iter().map(|m| layer_weight(m.block_type)));
    let activity = average(path.methods.iter().map(activity_score));

    compose(
        keyword_overlap,
        semantic_match,
        layer_importance,
        activity,
        weights,
    )
}

/// Single-method analogue used by the method-level intent entry point.
pub fn score_method(
    method: &MethodNode,
    history: &[CommitInfo],
    weights: &BusinessFactorWeights,
) -> BusinessValueScore {
    let tokens: std::collections::BTreeSet<String> = lexicon::name_tokens(&method.method_name)
        .into_iter()
        .chain(lexicon::name_tokens(method.class_id()))
        .collect();
    let keyword_overlap = token_overlap(&tokens, history);
    let semantic_match = if lexicon::has_business_verb(&method.method_name)
        || lexicon::has_business_verb(method.class_id())
    {
        1.0
    } else {
        0.0
    };

    compose(
        keyword_overlap,
        semantic_match,
        layer_weight(method.block_type),
        activity_score(method),
        weights,
    )
}

/// Fraction of the path's name tokens that appear in the commit-history
/// keyword set. No history means no evidence, scored zero.
fn keyword_overlap(path: &CallPath, history: &[CommitInfo]) -> f64 {
    token_overlap(&lexicon::path_tokens(path), history)
}

fn token_overlap(
    tokens: &std::collections::BTreeSet<String>,
    history: &[CommitInfo],
) -> f64 {
    if tokens.is_empty() || history.is_empty() {
        return 0.0;
    }
    let keywords: std::collections::HashSet<&str> = history
        .iter()
        .flat_map(|c| c.keywords.iter().map(String::as_str))
        .collect();
    let matched = tokens.iter().filter(|t| keywords.contains(t.as_str())).count();
    matched as f64 / tokens.len() as f64
}

/// Fraction of path methods whose own name or owning-class name carries
/// a business verb.
fn semantic_match(path: &CallPath) -> f64 {
    if path.methods.is_empty() {
        return 0.0;
    }
    let hits = path
        .methods
        .iter()
        .filter(|m| {
            lexicon::has_business_verb(&m.method_name) || lexicon::has_business_verb(m.class_id())
        })
        .count();
    hits as f64 / path.methods.len() as f64
}

fn compose(
    keyword_overlap: f64,
    semantic_match: f64,
    layer_importance: f64,
    activity: f64,
    weights: &BusinessFactorWeights,
) -> BusinessValueScore {
    let total = weights.keyword_overlap * keyword_overlap
        + weights.semantic_match * semantic_match
        + weights.layer_importance * layer_importance
        + weights.activity * activity;
    BusinessValueScore {
        total: total.clamp(0.0, 1.0),
        keyword_overlap,
        semantic_match,
        layer_importance,
        activity,
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        0.0
    } else {
        collected.iter().sum::<f64>() / collected.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommitType;

    fn service_method(id: &str, name: &str, in_degree: usize) -> MethodNode {
        let mut m = MethodNode::new(id, name, BlockType::Service);
        m.in_degree = in_degree;
        m
    }

    #[test]
    fn test_layer_weight_table() {
        assert_eq!(layer_weight(BlockType::Controller), 0.9);
        assert_eq!(layer_weight(BlockType::Service), 0.8);
        assert_eq!(layer_weight(BlockType::Util), 0.3);
        // Unmapped layers get the documented floor.
        assert_eq!(layer_weight(BlockType::Mapper), 0.2);
        assert_eq!(layer_weight(BlockType::Test), 0.2);
    }

    #[test]
    fn test_activity_saturates() {
        let quiet = service_method("A#a()", "a", 0);
        assert_eq!(activity_score(&quiet), 0.0);

        let popular = service_method("B#b()", "b", 9);
        assert_eq!(activity_score(&popular), 1.0);

        let very_popular = service_method("C#c()", "c", 500);
        assert_eq!(activity_score(&very_popular), 1.0);
    }

    #[test]
    fn test_keyword_overlap_against_history() {
        let path = CallPath::new(
            "p",
            vec![service_method("OrderService#placeOrder()", "placeOrder", 0)],
        );
        let history = vec![CommitInfo::new(
            vec!["order".to_string(), "checkout".to_string()],
            CommitType::Feature,
        )];

        let score = score_path(&path, &history, &BusinessFactorWeights::default());
        // Tokens: order, service, place. One of three matches.
        assert!((score.keyword_overlap - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_history_means_no_keyword_evidence() {
        let path = CallPath::new(
            "p",
            vec![service_method("OrderService#placeOrder()", "placeOrder", 0)],
        );
        let score = score_path(&path, &[], &BusinessFactorWeights::default());
        assert_eq!(score.keyword_overlap, 0.0);
        // Semantic match still fires on the business verb.
        assert_eq!(score.semantic_match, 1.0);
    }

    #[test]
    fn test_method_variant_uses_single_method_layer() {
        let mut m = service_method("OrderController#submitOrder()", "submitOrder", 3);
        m.block_type = BlockType::Controller;
        let score = score_method(&m, &[], &BusinessFactorWeights::default());
        assert_eq!(score.layer_importance, 0.9);
        assert_eq!(score.semantic_match, 1.0);
    }
}
