//! Path classification. Rules are evaluated Golden first, then Risk,
//! then Neutral; the first match wins. A path can carry both golden and
//! risky structure; the precedence below is a reproducible contract,
//! not an implementation accident.

use crate::analysis::signals::PathSignals;
use crate::config::ClassifierThresholds;
use crate::core::{PathType, Priority};
use crate::intent::IntentWeightResult;
use crate::risk::RiskWeightResult;

/// Disjoint bucket a path lands in. `PathType::Critical` is a tag inside
/// the neutral bucket, never a bucket of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Golden,
    Risk,
    Neutral,
}

pub fn classify_path(
    intent: &IntentWeightResult,
    risk: &RiskWeightResult,
    signals: &PathSignals,
    thresholds: &ClassifierThresholds,
) -> PathClass {
    if is_golden(intent, risk, signals, thresholds) {
        PathClass::Golden
    } else if is_risk(intent, risk, signals, thresholds) {
        PathClass::Risk
    } else {
        PathClass::Neutral
    }
}

/// The golden gate (high intent, low risk) is mandatory; inside the gate
/// any one of quality pairing, a structural golden signal, or strong
/// path coverage qualifies the path.
fn is_golden(
    intent: &IntentWeightResult,
    risk: &RiskWeightResult,
    signals: &PathSignals,
    t: &ClassifierThresholds,
) -> bool {
    let gate = intent.total >= t.golden_intent_min && risk.total <= t.golden_risk_max;
    if !gate {
        return false;
    }

    let quality_pair = intent.business.total >= t.golden_business_min
        && intent.quality.total >= t.golden_quality_min;
    let structural =
        signals.new_endpoint || signals.core_business_entity || signals.data_model_change;
    let coverage = intent.completeness.test_coverage >= t.golden_coverage_min;

    quality_pair || structural || coverage
}

fn is_risk(
    intent: &IntentWeightResult,
    risk: &RiskWeightResult,
    signals: &PathSignals,
    t: &ClassifierThresholds,
) -> bool {
    risk.total >= t.risk_total_min
        || risk.architectural.total >= t.risk_architectural_min
        || risk.blast_radius >= t.risk_blast_min
        || risk.change_complexity >= t.risk_change_complexity_min
        || risk.architectural.violation_count > 0
        || risk.architectural.duplicate_count > 0
        || intent.completeness.test_coverage < t.risk_coverage_max
        || (signals.transactional_operation
            && (signals.external_api_call || signals.database_operation))
}

/// Final `PathType` for a path: golden and risk buckets keep their own
/// type; a neutral path with moderate value and moderate risk is tagged
/// Critical while staying in the neutral bucket.
pub fn tag_path_type(
    class: PathClass,
    intent: &IntentWeightResult,
    risk: &RiskWeightResult,
    t: &ClassifierThresholds,
) -> PathType {
    match class {
        PathClass::Golden => PathType::Golden,
        PathClass::Risk => PathType::Risk,
        PathClass::Neutral => {
            if intent.business.total >= t.critical_business_min
                && risk.total >= t.critical_risk_min
            {
                PathType::Critical
            } else {
                PathType::Neutral
            }
        }
    }
}

/// Review priority for an analyzed path.
pub fn derive_priority(
    class: PathClass,
    intent: &IntentWeightResult,
    risk: &RiskWeightResult,
    path_type: PathType,
) -> Priority {
    match class {
        PathClass::Risk => {
            if risk.total >= 0.8 {
                Priority::Critical
            } else {
                Priority::High
            }
        }
        PathClass::Golden => {
            if intent.business.total >= 0.8 {
                Priority::High
            } else {
                Priority::Medium
            }
        }
        PathClass::Neutral => {
            if path_type == PathType::Critical {
                Priority::Medium
            } else {
                Priority::Low
            }
        }
    }
}
