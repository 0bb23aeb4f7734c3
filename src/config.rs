//! Tunable scoring coefficients and classifier thresholds.
//!
//! Defaults reproduce the reference scoring model exactly; hosts may
//! deserialize overrides from their settings layer. Heuristic lookup
//! tables (layer weights, layer ordering) live next to the formulas that
//! use them as `match` functions, not here.

use serde::{Deserialize, Serialize};

/// Top-level weights for the intent composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentWeights {
    /// Weight of the business-value component (default 0.40).
    #[serde(default = "default_business_weight")]
    pub business: f64,

    /// Weight of the implementation-completeness component (default 0.35).
    #[serde(default = "default_completeness_weight")]
    pub completeness: f64,

    /// Weight of the code-quality component (default 0.25).
    #[serde(default = "default_quality_weight")]
    pub quality: f64,

    #[serde(default)]
    pub business_factors: BusinessFactorWeights,

    #[serde(default)]
    pub completeness_factors: CompletenessFactorWeights,
}

fn default_business_weight() -> f64 {
    0.40
}
fn default_completeness_weight() -> f64 {
    0.35
}
fn default_quality_weight() -> f64 {
    0.25
}

impl Default for IntentWeights {
    fn default() -> Self {
        Self {
            business: default_business_weight(),
            completeness: default_completeness_weight(),
            quality: default_quality_weight(),
            business_factors: BusinessFactorWeights::default(),
            completeness_factors: CompletenessFactorWeights::default(),
        }
    }
}

/// Sub-weights inside the business-value component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessFactorWeights {
    pub keyword_overlap: f64,
    pub semantic_match: f64,
    pub layer_importance: f64,
    pub activity: f64,
}

impl Default for BusinessFactorWeights {
    fn default() -> Self {
        Self {
            keyword_overlap: 0.30,
            semantic_match: 0.25,
            layer_importance: 0.25,
            activity: 0.20,
        }
    }
}

/// Sub-weights inside the implementation-completeness component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessFactorWeights {
    pub exception_handling: f64,
    pub test_coverage: f64,
    pub parameter_validation: f64,
    pub logging: f64,
    pub resource_management: f64,
}

impl Default for CompletenessFactorWeights {
    fn default() -> Self {
        Self {
            exception_handling: 0.30,
            test_coverage: 0.25,
            parameter_validation: 0.20,
            logging: 0.15,
            resource_management: 0.10,
        }
    }
}

/// Top-level weights for the risk composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Weight of architectural risk (default 0.35).
    #[serde(default = "default_architectural_weight")]
    pub architectural: f64,

    /// Weight of blast radius (default 0.30).
    #[serde(default = "default_blast_weight")]
    pub blast_radius: f64,

    /// Weight of change complexity (default 0.25).
    #[serde(default = "default_change_weight")]
    pub change_complexity: f64,

    /// Weight of data-flow risk (default 0.10).
    #[serde(default = "default_data_flow_weight")]
    pub data_flow: f64,

    #[serde(default)]
    pub architectural_factors: ArchitecturalFactorWeights,

    #[serde(default)]
    pub data_flow_factors: DataFlowFactorWeights,
}

fn default_architectural_weight() -> f64 {
    0.35
}
fn default_blast_weight() -> f64 {
    0.30
}
fn default_change_weight() -> f64 {
    0.25
}
fn default_data_flow_weight() -> f64 {
    0.10
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            architectural: default_architectural_weight(),
            blast_radius: default_blast_weight(),
            change_complexity: default_change_weight(),
            data_flow: default_data_flow_weight(),
            architectural_factors: ArchitecturalFactorWeights::default(),
            data_flow_factors: DataFlowFactorWeights::default(),
        }
    }
}

/// Sub-weights inside the architectural-risk component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitecturalFactorWeights {
    pub cross_layer_violation: f64,
    pub circular_dependency: f64,
    pub tight_coupling: f64,
    pub single_point_failure: f64,
}

impl Default for ArchitecturalFactorWeights {
    fn default() -> Self {
        Self {
            cross_layer_violation: 0.30,
            circular_dependency: 0.25,
            tight_coupling: 0.25,
            single_point_failure: 0.20,
        }
    }
}

/// Sub-weights inside the data-flow-risk component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFlowFactorWeights {
    pub global_state: f64,
    pub concurrency: f64,
    pub consistency: f64,
}

impl Default for DataFlowFactorWeights {
    fn default() -> Self {
        Self {
            global_state: 0.40,
            concurrency: 0.30,
            consistency: 0.30,
        }
    }
}

/// Thresholds driving the Golden / Risk / Neutral classification rules.
///
/// The precedence of the rules themselves (Golden first, then Risk) is a
/// fixed contract in the classifier and is not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    pub golden_intent_min: f64,
    pub golden_risk_max: f64,
    pub golden_business_min: f64,
    pub golden_quality_min: f64,
    pub golden_coverage_min: f64,

    pub risk_total_min: f64,
    pub risk_architectural_min: f64,
    pub risk_blast_min: f64,
    pub risk_change_complexity_min: f64,
    pub risk_coverage_max: f64,

    /// Business value at or above which a neutral path is tagged Critical.
    pub critical_business_min: f64,
    /// Risk band [min, risk_total_min) in which a neutral path is tagged
    /// Critical.
    pub critical_risk_min: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            golden_intent_min: 0.7,
            golden_risk_max: 0.3,
            golden_business_min: 0.6,
            golden_quality_min: 0.6,
            golden_coverage_min: 0.7,
            risk_total_min: 0.6,
            risk_architectural_min: 0.7,
            risk_blast_min: 0.6,
            risk_change_complexity_min: 0.7,
            risk_coverage_max: 0.3,
            critical_business_min: 0.5,
            critical_risk_min: 0.4,
        }
    }
}

impl ClassifierThresholds {
    /// Stricter gates: fewer Golden paths, more Risk paths.
    pub fn strict() -> Self {
        Self {
            golden_intent_min: 0.8,
            golden_risk_max: 0.25,
            risk_total_min: 0.5,
            risk_coverage_max: 0.4,
            ..Default::default()
        }
    }

    /// Looser gates: more Golden paths, fewer Risk paths.
    pub fn lenient() -> Self {
        Self {
            golden_intent_min: 0.6,
            golden_risk_max: 0.4,
            risk_total_min: 0.7,
            risk_coverage_max: 0.2,
            ..Default::default()
        }
    }
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub intent: IntentWeights,
    #[serde(default)]
    pub risk: RiskWeights,
    #[serde(default)]
    pub thresholds: ClassifierThresholds,
}

impl AnalysisConfig {
    // Pure function: check a weight is in range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    fn validate_sum(parts: &[f64], name: &str) -> Result<(), String> {
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > 0.001 {
            Err(format!("{} weights must sum to 1.0, but sum to {:.3}", name, sum))
        } else {
            Ok(())
        }
    }

    /// Validate every weight range and each weight group's sum.
    pub fn validate(&self) -> Result<(), String> {
        let i = &self.intent;
        let r = &self.risk;

        Self::validate_weight(i.business, "business")?;
        Self::validate_weight(i.completeness, "completeness")?;
        Self::validate_weight(i.quality, "quality")?;
        Self::validate_weight(r.architectural, "architectural")?;
        Self::validate_weight(r.blast_radius, "blast radius")?;
        Self::validate_weight(r.change_complexity, "change complexity")?;
        Self::validate_weight(r.data_flow, "data flow")?;

        Self::validate_sum(&[i.business, i.completeness, i.quality], "intent")?;
        Self::validate_sum(
            &[
                r.architectural,
                r.blast_radius,
                r.change_complexity,
                r.data_flow,
            ],
            "risk",
        )?;
        Self::validate_sum(
            &[
                i.business_factors.keyword_overlap,
                i.business_factors.semantic_match,
                i.business_factors.layer_importance,
                i.business_factors.activity,
            ],
            "business factor",
        )?;
        Self::validate_sum(
            &[
                i.completeness_factors.exception_handling,
                i.completeness_factors.test_coverage,
                i.completeness_factors.parameter_validation,
                i.completeness_factors.logging,
                i.completeness_factors.resource_management,
            ],
            "completeness factor",
        )?;
        Self::validate_sum(
            &[
                r.architectural_factors.cross_layer_violation,
                r.architectural_factors.circular_dependency,
                r.architectural_factors.tight_coupling,
                r.architectural_factors.single_point_failure,
            ],
            "architectural factor",
        )?;
        Self::validate_sum(
            &[
                r.data_flow_factors.global_state,
                r.data_flow_factors.concurrency,
                r.data_flow_factors.consistency,
            ],
            "data flow factor",
        )?;

        Ok(())
    }
}
