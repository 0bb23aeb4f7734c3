//! Risk weighting: a 0–1 composite expressing how dangerous a change
//! along a call path is, with an explainable breakdown.
//!
//! Like the intent calculator, this holds no mutable state; both entry
//! points are pure and safe to run concurrently.

pub mod architecture;
pub mod blast;
pub mod data_flow;

use crate::config::RiskWeights;
use crate::core::{CalculationContext, RiskLevel};
use crate::graph::types::{CallPath, MethodNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use architecture::{ArchitecturalRisk, HIGH_IN_DEGREE_THRESHOLD};
pub use data_flow::DataFlowRisk;

/// Complexity above which a method is considered critical on its own.
pub const CRITICAL_COMPLEXITY_THRESHOLD: u32 = 15;

/// Composite risk score with its breakdown, confidence, and the
/// explanatory collections consumed by the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeightResult {
    pub total: f64,
    pub risk_level: RiskLevel,
    pub architectural: ArchitecturalRisk,
    pub blast_radius: f64,
    pub change_complexity: f64,
    pub data_flow: DataFlowRisk,
    pub confidence: f64,
    /// Ids of methods that are individually dangerous to touch.
    pub critical_methods: Vec<String>,
    pub risk_factors: Vec<String>,
    pub mitigation_suggestions: Vec<String>,
    /// Distinct owning classes of the changed methods on this path.
    pub impacted_components: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    weights: RiskWeights,
}

impl RiskCalculator {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// Score a whole path: architectural risk, blast radius, change
    /// complexity, and data-flow risk combined 0.35 / 0.30 / 0.25 / 0.10
    /// and clamped to [0, 1].
    pub fn calculate_path_risk(
        &self,
        path: &CallPath,
        ctx: &CalculationContext,
    ) -> RiskWeightResult {
        let architectural = architecture::score_path(path, &self.weights.architectural_factors);
        let blast_radius = blast::blast_radius_score(path, &ctx.changed_method_ids);
        let change_complexity = blast::change_complexity_score(path, &ctx.changed_method_ids);
        let data_flow = data_flow::score_path(path, &self.weights.data_flow_factors);

        let total = (self.weights.architectural * architectural.total
            + self.weights.blast_radius * blast_radius
            + self.weights.change_complexity * change_complexity
            + self.weights.data_flow * data_flow.total)
            .clamp(0.0, 1.0);

        let critical_methods = critical_methods(&path.methods);
        let risk_factors =
            describe_risk_factors(&architectural, blast_radius, change_complexity, &data_flow);
        let mitigation_suggestions = suggest_mitigations(&risk_factors, path);
        let impacted_components = impacted_components(path, ctx);

        RiskWeightResult {
            total,
            risk_level: RiskLevel::from_score(total),
            architectural,
            blast_radius,
            change_complexity,
            data_flow,
            confidence: path_confidence(path, ctx.changed_method_ids.len()),
            critical_methods,
            risk_factors,
            mitigation_suggestions,
            impacted_components,
        }
    }

    /// Simplified single-method analogue.
    pub fn calculate_method_risk(
        &self,
        method: &MethodNode,
        ctx: &CalculationContext,
    ) -> RiskWeightResult {
        let singleton_path = CallPath::new(format!("method:{}", method.id), vec![method.clone()]);
        self.calculate_path_risk(&singleton_path, ctx)
    }
}

/// A method is critical when it is heavily depended upon, structurally
/// complex, an entry layer, or untested.
pub fn critical_methods(methods: &[MethodNode]) -> Vec<String> {
    let mut found: Vec<String> = methods
        .iter()
        .filter(|m| {
            m.in_degree > HIGH_IN_DEGREE_THRESHOLD
                || m.cyclomatic_complexity > CRITICAL_COMPLEXITY_THRESHOLD
                || m.block_type.is_entry_layer()
                || !m.has_tests
        })
        .map(|m| m.id.clone())
        .collect();
    found.sort();
    found.dedup();
    found
}

fn describe_risk_factors(
    architectural: &ArchitecturalRisk,
    blast_radius: f64,
    change_complexity: f64,
    data_flow: &DataFlowRisk,
) -> Vec<String> {
    let mut factors = Vec::new();
    if architectural.violation_count > 0 {
        factors.push(format!(
            "{} layer-ordering violation(s) along the path",
            architectural.violation_count
        ));
    }
    if architectural.duplicate_count > 0 {
        factors.push("path revisits methods (circular call chain)".to_string());
    }
    if architectural.single_point_failure >= 0.5 {
        factors.push("heavily depended-upon method on the path".to_string());
    }
    if blast_radius >= 0.6 {
        factors.push("wide blast radius from changed methods".to_string());
    }
    if change_complexity >= 0.7 {
        factors.push("changed methods are large or complex".to_string());
    }
    if data_flow.consistency_risk >= 0.8 {
        factors.push("data access without transactional guard".to_string());
    }
    if data_flow.concurrency_ratio > 0.0 {
        factors.push("concurrency primitives on the path".to_string());
    }
    if data_flow.global_state_ratio >= 0.5 {
        factors.push("shared global state dominates the path".to_string());
    }
    factors
}

fn suggest_mitigations(risk_factors: &[String], path: &CallPath) -> Vec<String> {
    let mut suggestions = Vec::new();
    for factor in risk_factors {
        if factor.contains("layer-ordering") {
            suggestions.push("route calls through the sanctioned layer order".to_string());
        } else if factor.contains("circular") {
            suggestions.push("break the cycle with an interface or event".to_string());
        } else if factor.contains("transactional") {
            suggestions.push("wrap the data access in a transaction boundary".to_string());
        } else if factor.contains("blast radius") || factor.contains("depended-upon") {
            suggestions.push("add regression tests for downstream callers".to_string());
        } else if factor.contains("large or complex") {
            suggestions.push("split the changed methods before review".to_string());
        }
    }
    let untested = path.methods.iter().filter(|m| !m.has_tests).count();
    if untested > 0 {
        suggestions.push(format!("cover the {untested} untested method(s) on the path"));
    }
    suggestions.dedup();
    suggestions
}

fn impacted_components(path: &CallPath, ctx: &CalculationContext) -> Vec<String> {
    let classes: BTreeSet<String> = path
        .changed_methods(&ctx.changed_method_ids)
        .iter()
        .map(|m| m.class_id().to_string())
        .collect();
    classes.into_iter().collect()
}

/// Mirrors the intent confidence formula with the changed-method count in
/// place of the history size.
fn path_confidence(path: &CallPath, changed_count: usize) -> f64 {
    let length_factor = (path.methods.len() as f64 / 5.0).min(1.0);
    let changed_factor = (changed_count as f64 / 50.0).min(1.0);
    let tested_factor = if path.methods.is_empty() {
        0.5
    } else {
        path.methods
            .iter()
            .map(|m| if m.has_tests { 1.0 } else { 0.5 })
            .sum::<f64>()
            / path.methods.len() as f64
    };
    (length_factor + changed_factor + tested_factor) / 3.0
}
