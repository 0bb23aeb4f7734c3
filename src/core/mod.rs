//! Shared types used across the graph store, calculators, and the
//! analysis pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Architectural layer classification of a method or class.
///
/// Layer membership drives business-importance weighting and
/// layering-violation detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Controller,
    Service,
    Repository,
    Mapper,
    Entity,
    Dto,
    Vo,
    Util,
    Config,
    Component,
    Test,
    Other,
}

impl BlockType {
    /// Whether this layer performs data access.
    pub fn is_data_access(&self) -> bool {
        matches!(self, BlockType::Repository | BlockType::Mapper)
    }

    /// Whether this layer receives external requests.
    pub fn is_entry_layer(&self) -> bool {
        matches!(self, BlockType::Controller)
    }
}

/// How a call site invokes its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallType {
    Direct,
    Lambda,
    MethodRef,
}

/// Syntactic context a call occurs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallContext {
    TryCatch,
    If,
    Loop,
}

/// Classification assigned to a call path after analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    /// High business value, low engineering risk. Protect, don't rework.
    Golden,
    /// Dangerous enough to warrant focused review regardless of value.
    Risk,
    /// Moderate-to-high value with moderate risk. Reviewed, not blocking.
    Critical,
    /// Neither valuable nor dangerous enough to surface prominently.
    Neutral,
}

/// Risk band for a computed risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // < 0.4
    Medium,   // < 0.6
    High,     // < 0.8
    Critical, // >= 0.8
}

impl RiskLevel {
    /// Band a total risk score per the calculator thresholds.
    pub fn from_score(score: f64) -> Self {
        if score < 0.4 {
            RiskLevel::Low
        } else if score < 0.6 {
            RiskLevel::Medium
        } else if score < 0.8 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// Review priority attached to an analyzed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Commit category supplied by the commit-history collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitType {
    Feature,
    Fix,
    Refactor,
    Docs,
    Test,
    Chore,
    Other,
}

/// Summary of one commit, consumed read-only by the intent calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Lowercased keywords extracted from the commit message.
    pub keywords: BTreeSet<String>,
    pub business_value: f64,
    pub risk: f64,
    pub urgency: f64,
    pub commit_type: CommitType,
}

impl CommitInfo {
    pub fn new(keywords: impl IntoIterator<Item = String>, commit_type: CommitType) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            business_value: 0.5,
            risk: 0.5,
            urgency: 0.5,
            commit_type,
        }
    }
}

/// Per-file outcome reported by the external analysis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysisResult {
    pub path: PathBuf,
    /// Ids of methods the collaborator extracted from this file.
    pub analyzed_method_ids: Vec<String>,
    /// Non-fatal notes (parse warnings, skipped regions).
    pub notes: Vec<String>,
}

/// Kind of change reported for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

/// One file-level change feeding an incremental graph update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Contextual inputs shared by both calculators and the pipeline:
/// commit history, the per-file analysis results, and the ids of methods
/// touched by the change under review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationContext {
    pub commit_history: Vec<CommitInfo>,
    pub changed_method_ids: std::collections::HashSet<String>,
    pub file_results: Vec<FileAnalysisResult>,
}

impl CalculationContext {
    pub fn with_changed_methods(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            changed_method_ids: ids.into_iter().collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.79), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.8), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_commit_info_lowercases_keywords() {
        let commit = CommitInfo::new(
            vec!["Payment".to_string(), "REFUND".to_string()],
            CommitType::Feature,
        );
        assert!(commit.keywords.contains("payment"));
        assert!(commit.keywords.contains("refund"));
    }
}
