//! Error taxonomy for path analysis.
//!
//! Not-found conditions are represented as empty results, never errors, so
//! this enum only covers the cases that must abort or be reported: invalid
//! batch input rejected before scoring, and per-file failures surfaced by
//! incremental updates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AnalysisError {
    /// The caller supplied no candidate paths at all.
    #[error("path batch is empty; at least one candidate path is required")]
    EmptyBatch,

    /// A candidate path carries no methods, so no score can be derived.
    #[error("path `{id}` contains no methods")]
    EmptyPath { id: String },

    /// An incremental update could not process a file. Collected per file;
    /// never aborts the surrounding update.
    #[error("update failed for `{path}`: {message}")]
    FileUpdate { path: PathBuf, message: String },
}

impl AnalysisError {
    pub fn file_update(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileUpdate {
            path: path.into(),
            message: message.into(),
        }
    }
}
