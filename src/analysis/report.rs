//! Report assembly: aggregates, natural-language findings, actionable
//! recommendations, and the composite quality metrics.

use crate::analysis::AnalyzedPath;
use crate::core::CalculationContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many of the top risk paths get called out for immediate review.
const TOP_RISK_PATHS: usize = 5;
/// How many recurring risk factors the report names.
const DOMINANT_FACTORS: usize = 3;

/// Composite health indicators over the whole batch, each 0–1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub code_quality: f64,
    /// 1 − average architectural risk.
    pub architectural_health: f64,
    /// Average tested-method ratio.
    pub test_maturity: f64,
    /// Average business value.
    pub business_alignment: f64,
    /// Unweighted mean of the other four.
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysisReport {
    pub golden_path_ratio: f64,
    pub risk_path_ratio: f64,
    pub average_intent: f64,
    pub average_risk: f64,
    pub average_confidence: f64,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub quality_metrics: QualityMetrics,
    pub dominant_risk_factors: Vec<String>,
    pub aggregate_test_coverage: f64,
    pub layer_violation_count: usize,
    pub files_analyzed: usize,
}

/// Build the report from the already-sorted buckets.
pub fn build(
    golden: &[AnalyzedPath],
    risk: &[AnalyzedPath],
    neutral: &[AnalyzedPath],
    ctx: &CalculationContext,
) -> PathAnalysisReport {
    let all: Vec<&AnalyzedPath> = golden.iter().chain(risk).chain(neutral).collect();
    let total = all.len();
    let ratio = |count: usize| if total == 0 { 0.0 } else { count as f64 / total as f64 };
    let mean = |f: &dyn Fn(&AnalyzedPath) -> f64| {
        if total == 0 {
            0.0
        } else {
            all.iter().map(|p| f(p)).sum::<f64>() / total as f64
        }
    };

    let average_intent = mean(&|p| p.intent.total);
    let average_risk = mean(&|p| p.risk.total);
    let average_confidence = mean(&|p| p.confidence);
    let aggregate_test_coverage = mean(&|p| p.intent.completeness.test_coverage);
    let layer_violation_count: usize =
        all.iter().map(|p| p.risk.architectural.violation_count).sum();
    let dominant_risk_factors = dominant_factors(&all);

    let quality_metrics = QualityMetrics::from_averages(
        mean(&|p| p.intent.quality.total),
        1.0 - mean(&|p| p.risk.architectural.total),
        aggregate_test_coverage,
        mean(&|p| p.intent.business.total),
    );

    PathAnalysisReport {
        golden_path_ratio: ratio(golden.len()),
        risk_path_ratio: ratio(risk.len()),
        average_intent,
        average_risk,
        average_confidence,
        findings: findings(
            golden,
            risk,
            neutral,
            &all,
            aggregate_test_coverage,
            layer_violation_count,
            &dominant_risk_factors,
        ),
        recommendations: recommendations(golden, risk, &all),
        quality_metrics,
        dominant_risk_factors,
        aggregate_test_coverage,
        layer_violation_count,
        files_analyzed: ctx.file_results.len(),
    }
}

impl QualityMetrics {
    fn from_averages(
        code_quality: f64,
        architectural_health: f64,
        test_maturity: f64,
        business_alignment: f64,
    ) -> Self {
        let overall =
            (code_quality + architectural_health + test_maturity + business_alignment) / 4.0;
        Self {
            code_quality,
            architectural_health,
            test_maturity,
            business_alignment,
            overall,
        }
    }
}

fn findings(
    golden: &[AnalyzedPath],
    risk: &[AnalyzedPath],
    neutral: &[AnalyzedPath],
    all: &[&AnalyzedPath],
    coverage: f64,
    violations: usize,
    dominant: &[String],
) -> Vec<String> {
    let mut findings = vec![format!(
        "analyzed {} path(s): {} golden, {} risk, {} neutral",
        all.len(),
        golden.len(),
        risk.len(),
        neutral.len()
    )];

    if let Some(top) = all
        .iter()
        .map(|p| p.intent.business.total)
        .max_by(f64::total_cmp)
    {
        findings.push(format!(
            "highest business value on a path: {:.0}%",
            top * 100.0
        ));
    }
    if !dominant.is_empty() {
        findings.push(format!("dominant risk factors: {}", dominant.join("; ")));
    }
    findings.push(format!(
        "aggregate test coverage across paths: {:.0}%",
        coverage * 100.0
    ));
    if violations > 0 {
        findings.push(format!(
            "{violations} layer-ordering violation(s) detected"
        ));
    }
    findings
}

fn recommendations(
    golden: &[AnalyzedPath],
    risk: &[AnalyzedPath],
    all: &[&AnalyzedPath],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !risk.is_empty() {
        let top: Vec<&str> = risk
            .iter()
            .take(TOP_RISK_PATHS)
            .map(|p| p.path.id.as_str())
            .collect();
        recommendations.push(format!("review these risk paths first: {}", top.join(", ")));
    }

    let fragile = all
        .iter()
        .filter(|p| {
            p.path.average_complexity() > 10.0 && p.intent.completeness.test_coverage < 0.5
        })
        .count();
    if fragile > 0 {
        recommendations.push(format!(
            "add tests before touching {fragile} complex, poorly covered path(s)"
        ));
    }

    if !golden.is_empty() {
        recommendations.push(format!(
            "{} golden path(s) show patterns worth propagating to the rest of the change",
            golden.len()
        ));
    }
    recommendations
}

/// Most frequent risk-factor descriptions across the batch, ties broken
/// alphabetically for stable output.
fn dominant_factors(all: &[&AnalyzedPath]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for path in all {
        for factor in &path.risk.risk_factors {
            *counts.entry(factor.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(DOMINANT_FACTORS)
        .map(|(factor, _)| factor.to_string())
        .collect()
}
