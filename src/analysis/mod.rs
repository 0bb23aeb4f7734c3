//! The path filter and sorter: fans both calculators out over a batch of
//! candidate paths, classifies each path, orders the buckets, and
//! assembles the analysis report.

pub mod classifier;
pub mod report;
pub mod signals;
pub mod sorting;

use crate::config::AnalysisConfig;
use crate::core::{CalculationContext, PathType, Priority};
use crate::errors::AnalysisError;
use crate::graph::types::CallPath;
use crate::intent::{IntentCalculator, IntentWeightResult};
use crate::risk::{RiskCalculator, RiskWeightResult};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub use report::{PathAnalysisReport, QualityMetrics};
pub use signals::PathSignals;

/// A path with both scores, its classification, and review metadata.
/// Created once per analysis run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedPath {
    pub path: CallPath,
    pub intent: IntentWeightResult,
    pub risk: RiskWeightResult,
    pub path_type: PathType,
    pub priority: Priority,
    /// Mean of the two calculators' confidences.
    pub confidence: f64,
}

/// The sole artifact returned to the reporting layer: three disjoint,
/// sorted buckets plus the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysisResult {
    pub golden_paths: Vec<AnalyzedPath>,
    pub risk_paths: Vec<AnalyzedPath>,
    pub neutral_paths: Vec<AnalyzedPath>,
    pub report: PathAnalysisReport,
    pub total_analyzed_paths: usize,
    /// True when a timeout cut the batch short; the lists then hold the
    /// paths that finished in time.
    pub incomplete: bool,
    pub skipped_paths: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl PathAnalysisResult {
    /// Every analyzed path across the three buckets.
    pub fn all_paths(&self) -> impl Iterator<Item = &AnalyzedPath> {
        self.golden_paths
            .iter()
            .chain(&self.risk_paths)
            .chain(&self.neutral_paths)
    }
}

/// Orchestrates scoring, classification, sorting, and reporting for a
/// batch of candidate paths.
#[derive(Debug, Clone, Default)]
pub struct PathAnalyzer {
    config: AnalysisConfig,
    intent: IntentCalculator,
    risk: RiskCalculator,
}

impl PathAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let intent = IntentCalculator::new(config.intent.clone());
        let risk = RiskCalculator::new(config.risk.clone());
        Self {
            config,
            intent,
            risk,
        }
    }

    /// Analyze a batch of candidate paths against the supplied context.
    ///
    /// Both calculators run for every path concurrently (two tasks per
    /// path). An optional `timeout` bounds the whole batch: paths whose
    /// scoring has not started when it expires are skipped and the result
    /// is marked incomplete rather than blocking the caller.
    ///
    /// Fails fast on invalid input (an empty batch, or a path with no
    /// methods) before any scoring work begins.
    pub fn analyze_paths(
        &self,
        paths: Vec<CallPath>,
        ctx: &CalculationContext,
        timeout: Option<Duration>,
    ) -> Result<PathAnalysisResult, AnalysisError> {
        if paths.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }
        if let Some(empty) = paths.iter().find(|p| p.methods.is_empty()) {
            return Err(AnalysisError::EmptyPath {
                id: empty.id.clone(),
            });
        }

        let requested = paths.len();
        log::debug!("analyzing {requested} candidate path(s)");
        let deadline = timeout.map(|t| Instant::now() + t);

        let scored: Vec<Option<AnalyzedPath>> = paths
            .into_par_iter()
            .map(|path| {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    return None;
                }
                Some(self.analyze_one(path, ctx))
            })
            .collect();

        let skipped = scored.iter().filter(|s| s.is_none()).count();
        if skipped > 0 {
            log::warn!("timeout expired: {skipped} of {requested} path(s) skipped");
        }

        let mut golden = Vec::new();
        let mut risk = Vec::new();
        let mut neutral = Vec::new();
        for analyzed in scored.into_iter().flatten() {
            match analyzed.path_type {
                PathType::Golden => golden.push(analyzed),
                PathType::Risk => risk.push(analyzed),
                PathType::Critical | PathType::Neutral => neutral.push(analyzed),
            }
        }

        sorting::sort_golden(&mut golden);
        sorting::sort_risk(&mut risk);
        sorting::sort_neutral(&mut neutral);

        let report = report::build(&golden, &risk, &neutral, ctx);
        let total_analyzed_paths = golden.len() + risk.len() + neutral.len();

        Ok(PathAnalysisResult {
            golden_paths: golden,
            risk_paths: risk,
            neutral_paths: neutral,
            report,
            total_analyzed_paths,
            incomplete: skipped > 0,
            skipped_paths: skipped,
            analyzed_at: Utc::now(),
        })
    }

    /// Score, classify, and tag a single path. Pure given its inputs.
    fn analyze_one(&self, mut path: CallPath, ctx: &CalculationContext) -> AnalyzedPath {
        let (intent, risk): (IntentWeightResult, RiskWeightResult) = rayon::join(
            || self.intent.calculate_path_intent(&path, ctx),
            || self.risk.calculate_path_risk(&path, ctx),
        );

        let signals = signals::detect(&path, &ctx.changed_method_ids);
        let class = classifier::classify_path(&intent, &risk, &signals, &self.config.thresholds);
        let path_type = classifier::tag_path_type(class, &intent, &risk, &self.config.thresholds);
        let priority = classifier::derive_priority(class, &intent, &risk, path_type);
        let confidence = (intent.confidence + risk.confidence) / 2.0;

        path.path_type = path_type;
        AnalyzedPath {
            path,
            intent,
            risk,
            path_type,
            priority,
            confidence,
        }
    }
}
