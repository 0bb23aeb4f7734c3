//! Implementation-completeness scoring: the structural hygiene present
//! along a path. Each sub-score is the fraction of path methods
//! satisfying an annotation or naming predicate.

use crate::config::CompletenessFactorWeights;
use crate::core::CallContext;
use crate::graph::types::{CallEdge, CallPath, MethodNode};

/// Breakdown of the implementation-completeness component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompletenessScore {
    pub total: f64,
    pub exception_handling: f64,
    pub test_coverage: f64,
    pub parameter_validation: f64,
    pub logging: f64,
    pub resource_management: f64,
}

pub fn score_path(path: &CallPath, weights: &CompletenessFactorWeights) -> CompletenessScore {
    let n = path.methods.len();
    if n == 0 {
        return compose(0.0, 0.0, 0.0, 0.0, 0.0, weights);
    }

    let mut exception = 0usize;
    let mut tested = 0usize;
    let mut validated = 0usize;
    let mut logged = 0usize;
    let mut managed = 0usize;

    for (i, method) in path.methods.iter().enumerate() {
        let outgoing = path.edges.get(i).and_then(|e| e.as_ref());
        if handles_exceptions(method, outgoing) {
            exception += 1;
        }
        if method.has_tests {
            tested += 1;
        }
        if validates_parameters(method) {
            validated += 1;
        }
        if has_logging(method) {
            logged += 1;
        }
        if manages_resources(method) {
            managed += 1;
        }
    }

    let frac = |count: usize| count as f64 / n as f64;
    compose(
        frac(exception),
        frac(tested),
        frac(validated),
        frac(logged),
        frac(managed),
        weights,
    )
}

/// Single-method analogue; no edge context is available.
pub fn score_method(method: &MethodNode, weights: &CompletenessFactorWeights) -> CompletenessScore {
    let on = |flag: bool| if flag { 1.0 } else { 0.0 };
    compose(
        on(handles_exceptions(method, None)),
        on(method.has_tests),
        on(validates_parameters(method)),
        on(has_logging(method)),
        on(manages_resources(method)),
        weights,
    )
}

fn handles_exceptions(method: &MethodNode, outgoing: Option<&CallEdge>) -> bool {
    method.has_annotation_containing("exception")
        || method.has_annotation_containing("retry")
        || method.method_name.starts_with("handle")
        || method.method_name.starts_with("recover")
        || outgoing.is_some_and(|e| e.context == Some(CallContext::TryCatch))
}

fn validates_parameters(method: &MethodNode) -> bool {
    method.has_annotation_containing("valid")
        || method.has_annotation_containing("notnull")
        || method.has_annotation_containing("nonnull")
        || ["validate", "check", "verify", "ensure", "assert"]
            .iter()
            .any(|prefix| method.method_name.starts_with(prefix))
}

fn has_logging(method: &MethodNode) -> bool {
    method.has_annotation_containing("slf4j")
        || method.has_annotation_containing("log")
        || method.has_annotation_containing("audit")
        || method.method_name.to_lowercase().contains("log")
        || method.method_name.to_lowercase().contains("audit")
}

fn manages_resources(method: &MethodNode) -> bool {
    ["transactional", "closeable", "resource", "cleanup", "pool"]
        .iter()
        .any(|needle| method.has_annotation_containing(needle))
}

fn compose(
    exception_handling: f64,
    test_coverage: f64,
    parameter_validation: f64,
    logging: f64,
    resource_management: f64,
    weights: &CompletenessFactorWeights,
) -> CompletenessScore {
    let total = weights.exception_handling * exception_handling
        + weights.test_coverage * test_coverage
        + weights.parameter_validation * parameter_validation
        + weights.logging * logging
        + weights.resource_management * resource_management;
    CompletenessScore {
        total: total.clamp(0.0, 1.0),
        exception_handling,
        test_coverage,
        parameter_validation,
        logging,
        resource_management,
    }
}
