//! Intent weighting: a 0–1 composite expressing how much durable
//! business value a call path (or a single method) represents.
//!
//! The calculator holds no mutable state; both entry points are pure
//! functions of their inputs and safe to run concurrently.

pub mod business;
pub mod completeness;
pub mod lexicon;
pub mod quality;

use crate::config::IntentWeights;
use crate::core::CalculationContext;
use crate::graph::types::{CallPath, MethodNode};
use serde::{Deserialize, Serialize};

pub use business::BusinessValueScore;
pub use completeness::CompletenessScore;
pub use quality::QualityScore;

/// Composite intent score with its full breakdown and a confidence
/// estimate for how much evidence backed the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentWeightResult {
    pub total: f64,
    pub business: BusinessValueScore,
    pub completeness: CompletenessScore,
    pub quality: QualityScore,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default)]
pub struct IntentCalculator {
    weights: IntentWeights,
}

impl IntentCalculator {
    pub fn new(weights: IntentWeights) -> Self {
        Self { weights }
    }

    /// Score a whole path: business value, implementation completeness,
    /// and code quality, combined 0.40 / 0.35 / 0.25 and clamped to
    /// [0, 1].
    pub fn calculate_path_intent(
        &self,
        path: &CallPath,
        ctx: &CalculationContext,
    ) -> IntentWeightResult {
        let business = business::score_path(
            path,
            &ctx.commit_history,
            &self.weights.business_factors,
        );
        let completeness = completeness::score_path(path, &self.weights.completeness_factors);
        let quality = quality::score_path(path);

        let total = self.weights.business * business.total
            + self.weights.completeness * completeness.total
            + self.weights.quality * quality.total;
        let confidence = path_confidence(path, ctx.commit_history.len());

        IntentWeightResult {
            total: total.clamp(0.0, 1.0),
            business,
            completeness,
            quality,
            confidence,
        }
    }

    /// Simplified single-method analogue with the same component split.
    pub fn calculate_method_intent(
        &self,
        method: &MethodNode,
        ctx: &CalculationContext,
    ) -> IntentWeightResult {
        let business =
            business::score_method(method, &ctx.commit_history, &self.weights.business_factors);
        let completeness =
            completeness::score_method(method, &self.weights.completeness_factors);
        let quality = quality::score_method(method);

        let total = self.weights.business * business.total
            + self.weights.completeness * completeness.total
            + self.weights.quality * quality.total;
        let confidence = confidence_factors(
            1.0 / 5.0,
            ctx.commit_history.len(),
            if method.has_tests { 1.0 } else { 0.5 },
        );

        IntentWeightResult {
            total: total.clamp(0.0, 1.0),
            business,
            completeness,
            quality,
            confidence,
        }
    }
}

/// Confidence in a path-level result: longer paths, richer history, and
/// better-tested methods all raise it.
fn path_confidence(path: &CallPath, history_size: usize) -> f64 {
    let length_factor = (path.methods.len() as f64 / 5.0).min(1.0);
    let tested_factor = if path.methods.is_empty() {
        0.5
    } else {
        path.methods
            .iter()
            .map(|m| if m.has_tests { 1.0 } else { 0.5 })
            .sum::<f64>()
            / path.methods.len() as f64
    };
    confidence_factors(length_factor, history_size, tested_factor)
}

fn confidence_factors(length_factor: f64, history_size: usize, tested_factor: f64) -> f64 {
    let history_factor = (history_size as f64 / 50.0).min(1.0);
    (length_factor + history_factor + tested_factor) / 3.0
}
