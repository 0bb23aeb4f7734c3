//! Data-flow risk: shared global state, concurrency primitives, and
//! unguarded data access along a path.

use crate::config::DataFlowFactorWeights;
use crate::graph::types::{CallPath, MethodNode};

/// Breakdown of the data-flow-risk component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataFlowRisk {
    pub total: f64,
    pub global_state_ratio: f64,
    pub concurrency_ratio: f64,
    pub consistency_risk: f64,
}

/// Consistency risk when a path touches data-access methods with no
/// transactional guard at all.
const CONSISTENCY_UNGUARDED: f64 = 0.8;
/// Consistency risk when only part of the data access is guarded.
const CONSISTENCY_PARTIAL: f64 = 0.5;
/// Baseline consistency risk.
const CONSISTENCY_BASE: f64 = 0.2;

pub fn score_path(path: &CallPath, weights: &DataFlowFactorWeights) -> DataFlowRisk {
    let n = path.methods.len();
    let frac = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };

    let global_state_ratio = frac(
        path.methods
            .iter()
            .filter(|m| touches_global_state(m))
            .count(),
    );
    let concurrency_ratio = frac(
        path.methods
            .iter()
            .filter(|m| uses_concurrency(m))
            .count(),
    );
    let consistency_risk = consistency_risk(path);

    let total = weights.global_state * global_state_ratio
        + weights.concurrency * concurrency_ratio
        + weights.consistency * consistency_risk;
    DataFlowRisk {
        total: total.clamp(0.0, 1.0),
        global_state_ratio,
        concurrency_ratio,
        consistency_risk,
    }
}

pub fn touches_global_state(method: &MethodNode) -> bool {
    method.has_annotation_containing("singleton")
        || method.has_annotation_containing("component")
        || method.has_annotation_containing("bean")
        || method.method_name.to_lowercase().contains("static")
}

pub fn uses_concurrency(method: &MethodNode) -> bool {
    ["async", "synchronized", "thread", "concurrent"]
        .iter()
        .any(|needle| {
            method.has_annotation_containing(needle)
                || method.method_name.to_lowercase().contains(needle)
        })
}

/// 0.8 when data-access methods run with zero transactional methods on
/// the path, 0.5 when guards cover only part of the data access, 0.2
/// otherwise.
pub fn consistency_risk(path: &CallPath) -> f64 {
    let data_access = path
        .methods
        .iter()
        .filter(|m| m.block_type.is_data_access())
        .count();
    let transactional = path
        .methods
        .iter()
        .filter(|m| m.has_annotation_containing("transactional"))
        .count();

    if data_access > 0 && transactional == 0 {
        CONSISTENCY_UNGUARDED
    } else if transactional < data_access {
        CONSISTENCY_PARTIAL
    } else {
        CONSISTENCY_BASE
    }
}
