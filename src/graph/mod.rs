//! The in-memory call graph: node and edge records, the lock-guarded
//! store, and the traversal primitives used by the scoring pipeline.

pub mod store;
pub mod traversal;
pub mod types;

pub use store::{
    AnalysisProvider, FileAnalysis, GraphData, GraphStatistics, GraphStore, Hotspot,
    RiskHistogram, UpdateOutcome,
};
pub use traversal::RISK_DECAY_FACTOR;
pub use types::{CallEdge, CallPath, ClassNode, DataFlowEdge, ImplementsEdge, MethodNode};
