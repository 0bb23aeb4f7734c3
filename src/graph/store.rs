//! In-memory call-graph store.
//!
//! All mutation and every multi-step traversal go through one
//! synchronization domain: a `parking_lot::RwLock` over the im-backed
//! graph data. Because the inner maps use structural sharing, a consistent
//! snapshot is an O(1) clone taken under the read guard; the analysis
//! pipeline scores against such a snapshot, so a single analysis result
//! never mixes pre- and post-update node states.

use crate::core::{ChangeKind, FileChange};
use crate::errors::AnalysisError;
use crate::graph::types::{CallEdge, ClassNode, DataFlowEdge, ImplementsEdge, MethodNode};
use im::{HashMap as ImHashMap, HashSet as ImHashSet, Vector};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parsed output of the external analysis collaborator for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub classes: Vec<ClassNode>,
    pub methods: Vec<MethodNode>,
    pub calls: Vec<CallEdge>,
    pub implements: Vec<ImplementsEdge>,
    pub data_flows: Vec<DataFlowEdge>,
}

/// External collaborator that re-derives nodes for added or modified
/// files. The store never parses source itself.
pub trait AnalysisProvider: Sync {
    fn analyze_file(&self, path: &Path) -> anyhow::Result<FileAnalysis>;
}

/// Result of an incremental update. Partial failure is reported per file;
/// the update itself never aborts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub success: bool,
    pub affected_nodes: usize,
    pub errors: Vec<AnalysisError>,
}

/// Aggregate counts and distributions over the current graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub method_count: usize,
    pub class_count: usize,
    pub call_edge_count: usize,
    pub implements_edge_count: usize,
    pub data_flow_edge_count: usize,
    pub average_complexity: f64,
    pub risk_histogram: RiskHistogram,
    /// Top methods by total degree, most connected first.
    pub hotspots: Vec<Hotspot>,
}

/// Method counts per stored risk-score band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHistogram {
    pub low: usize,      // < 0.3
    pub medium: usize,   // < 0.6
    pub high: usize,     // < 0.8
    pub critical: usize, // >= 0.8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub method_id: String,
    pub total_degree: usize,
}

/// The graph's node and edge collections plus the caller/callee indexes.
///
/// Cloning is cheap (structural sharing); a clone is the snapshot handed
/// to read-only consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub(crate) methods: ImHashMap<String, MethodNode>,
    pub(crate) classes: ImHashMap<String, ClassNode>,
    pub(crate) call_edges: Vector<CallEdge>,
    pub(crate) implements_edges: Vector<ImplementsEdge>,
    pub(crate) data_flow_edges: Vector<DataFlowEdge>,
    /// callee id -> distinct caller ids
    pub(crate) caller_index: ImHashMap<String, ImHashSet<String>>,
    /// caller id -> distinct callee ids
    pub(crate) callee_index: ImHashMap<String, ImHashSet<String>>,
}

impl GraphData {
    pub fn method(&self, id: &str) -> Option<&MethodNode> {
        self.methods.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassNode> {
        self.classes.get(id)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Distinct callers of `id`, sorted by id for reproducible output.
    /// Unknown ids yield an empty list.
    pub fn callers(&self, id: &str) -> Vec<MethodNode> {
        self.resolve_sorted(self.caller_index.get(id))
    }

    /// Distinct callees of `id`, sorted by id. Unknown ids yield an empty
    /// list.
    pub fn callees(&self, id: &str) -> Vec<MethodNode> {
        self.resolve_sorted(self.callee_index.get(id))
    }

    pub fn caller_ids(&self, id: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .caller_index
            .get(id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    pub fn callee_ids(&self, id: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .callee_index
            .get(id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    pub fn methods_for_file(&self, path: &Path) -> Vec<MethodNode> {
        let mut found: Vec<MethodNode> = self
            .methods
            .values()
            .filter(|m| m.file_path == path)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    fn resolve_sorted(&self, ids: Option<&ImHashSet<String>>) -> Vec<MethodNode> {
        let mut nodes: Vec<MethodNode> = ids
            .map(|set| {
                set.iter()
                    .filter_map(|id| self.methods.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    // ---- mutation ----

    /// Insert or replace a method. Degree counters are re-derived from the
    /// edge indexes, not taken from the incoming record.
    pub(crate) fn upsert_method(&mut self, mut node: MethodNode) {
        node.in_degree = self.caller_index.get(&node.id).map_or(0, |s| s.len());
        node.out_degree = self.callee_index.get(&node.id).map_or(0, |s| s.len());
        self.methods.insert(node.id.clone(), node);
    }

    pub(crate) fn upsert_class(&mut self, node: ClassNode) {
        self.classes.insert(node.id.clone(), node);
    }

    /// Insert or replace a call edge keyed by (caller, callee, line).
    pub(crate) fn add_call_edge(&mut self, edge: CallEdge) {
        let same_site = |e: &CallEdge| {
            e.caller_id == edge.caller_id
                && e.callee_id == edge.callee_id
                && e.line_number == edge.line_number
        };
        if self.call_edges.iter().any(same_site) {
            self.call_edges = self
                .call_edges
                .iter()
                .filter(|e| !same_site(e))
                .cloned()
                .collect();
        }
        let caller = edge.caller_id.clone();
        let callee = edge.callee_id.clone();
        self.call_edges.push_back(edge);

        self.callee_index
            .entry(caller.clone())
            .or_default()
            .insert(callee.clone());
        self.caller_index
            .entry(callee.clone())
            .or_default()
            .insert(caller.clone());

        self.sync_degrees(&caller);
        self.sync_degrees(&callee);
    }

    pub(crate) fn add_implements_edge(&mut self, edge: ImplementsEdge) {
        let dup = self.implements_edges.iter().any(|e| {
            e.interface_method_id == edge.interface_method_id
                && e.implementation_method_id == edge.implementation_method_id
        });
        if !dup {
            self.implements_edges.push_back(edge);
        }
    }

    pub(crate) fn add_data_flow_edge(&mut self, edge: DataFlowEdge) {
        let dup = self
            .data_flow_edges
            .iter()
            .any(|e| e.source_id == edge.source_id && e.sink_id == edge.sink_id);
        if !dup {
            self.data_flow_edges.push_back(edge);
        }
    }

    pub(crate) fn set_risk_score(&mut self, id: &str, score: f64) {
        if let Some(node) = self.methods.get_mut(id) {
            node.risk_score = score;
        }
    }

    /// Remove every node owned by `path` and every edge referencing a
    /// removed node. Returns the number of removed methods.
    pub(crate) fn remove_file_nodes(&mut self, path: &Path) -> usize {
        let removed: Vec<String> = self
            .methods
            .values()
            .filter(|m| m.file_path == path)
            .map(|m| m.id.clone())
            .collect();
        if removed.is_empty() && !self.classes.values().any(|c| c.file_path == path) {
            return 0;
        }

        for id in &removed {
            self.methods.remove(id);
        }
        let removed_classes: Vec<String> = self
            .classes
            .values()
            .filter(|c| c.file_path == path)
            .map(|c| c.id.clone())
            .collect();
        for id in &removed_classes {
            self.classes.remove(id);
        }

        let gone: std::collections::HashSet<&String> = removed.iter().collect();
        let mut touched: std::collections::HashSet<String> = std::collections::HashSet::new();
        for e in self.call_edges.iter() {
            if gone.contains(&e.caller_id) || gone.contains(&e.callee_id) {
                touched.insert(e.caller_id.clone());
                touched.insert(e.callee_id.clone());
            }
        }

        self.call_edges = self
            .call_edges
            .iter()
            .filter(|e| !gone.contains(&e.caller_id) && !gone.contains(&e.callee_id))
            .cloned()
            .collect();
        self.implements_edges = self
            .implements_edges
            .iter()
            .filter(|e| {
                !gone.contains(&e.interface_method_id)
                    && !gone.contains(&e.implementation_method_id)
            })
            .cloned()
            .collect();
        self.data_flow_edges = self
            .data_flow_edges
            .iter()
            .filter(|e| !gone.contains(&e.source_id) && !gone.contains(&e.sink_id))
            .cloned()
            .collect();

        for id in &removed {
            self.caller_index.remove(id);
            self.callee_index.remove(id);
        }
        for sets in [&mut self.caller_index, &mut self.callee_index] {
            for id in removed.iter() {
                let keys: Vec<String> = sets
                    .iter()
                    .filter(|(_, set)| set.contains(id))
                    .map(|(k, _)| k.clone())
                    .collect();
                for key in keys {
                    if let Some(set) = sets.get_mut(&key) {
                        set.remove(id);
                    }
                }
            }
        }

        for id in touched {
            self.sync_degrees(&id);
        }

        removed.len()
    }

    /// Rewrite the owning file path on every node owned by `old`. Ids are
    /// derived from qualified names, so they do not change.
    pub(crate) fn rename_file_nodes(&mut self, old: &Path, new: &Path) -> usize {
        let method_ids: Vec<String> = self
            .methods
            .values()
            .filter(|m| m.file_path == old)
            .map(|m| m.id.clone())
            .collect();
        for id in &method_ids {
            if let Some(node) = self.methods.get_mut(id) {
                node.file_path = new.to_path_buf();
            }
        }
        let class_ids: Vec<String> = self
            .classes
            .values()
            .filter(|c| c.file_path == old)
            .map(|c| c.id.clone())
            .collect();
        for id in &class_ids {
            if let Some(node) = self.classes.get_mut(id) {
                node.file_path = new.to_path_buf();
            }
        }
        method_ids.len() + class_ids.len()
    }

    pub(crate) fn apply_file_analysis(&mut self, analysis: &FileAnalysis) -> usize {
        for class in &analysis.classes {
            self.upsert_class(class.clone());
        }
        for method in &analysis.methods {
            self.upsert_method(method.clone());
        }
        for call in &analysis.calls {
            self.add_call_edge(call.clone());
        }
        for implements in &analysis.implements {
            self.add_implements_edge(implements.clone());
        }
        for flow in &analysis.data_flows {
            self.add_data_flow_edge(flow.clone());
        }
        analysis.methods.len() + analysis.classes.len()
    }

    fn sync_degrees(&mut self, id: &str) {
        let in_degree = self.caller_index.get(id).map_or(0, |s| s.len());
        let out_degree = self.callee_index.get(id).map_or(0, |s| s.len());
        if let Some(node) = self.methods.get_mut(id) {
            node.in_degree = in_degree;
            node.out_degree = out_degree;
        }
    }

    pub(crate) fn statistics(&self, top_n: usize) -> GraphStatistics {
        let method_count = self.methods.len();
        let average_complexity = if method_count == 0 {
            0.0
        } else {
            self.methods
                .values()
                .map(|m| m.cyclomatic_complexity as f64)
                .sum::<f64>()
                / method_count as f64
        };

        let mut histogram = RiskHistogram::default();
        for node in self.methods.values() {
            if node.risk_score < 0.3 {
                histogram.low += 1;
            } else if node.risk_score < 0.6 {
                histogram.medium += 1;
            } else if node.risk_score < 0.8 {
                histogram.high += 1;
            } else {
                histogram.critical += 1;
            }
        }

        let mut hotspots: Vec<Hotspot> = self
            .methods
            .values()
            .map(|m| Hotspot {
                method_id: m.id.clone(),
                total_degree: m.in_degree + m.out_degree,
            })
            .collect();
        hotspots.sort_by(|a, b| {
            b.total_degree
                .cmp(&a.total_degree)
                .then_with(|| a.method_id.cmp(&b.method_id))
        });
        hotspots.truncate(top_n);

        GraphStatistics {
            method_count,
            class_count: self.classes.len(),
            call_edge_count: self.call_edges.len(),
            implements_edge_count: self.implements_edges.len(),
            data_flow_edge_count: self.data_flow_edges.len(),
            average_complexity,
            risk_histogram: histogram,
            hotspots,
        }
    }
}

/// Thread-safe store handle. Every operation is total over the current
/// state: unknown ids produce empty results, never errors.
#[derive(Debug, Default)]
pub struct GraphStore {
    inner: RwLock<GraphData>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) consistent view of the whole graph for read-only consumers.
    pub fn snapshot(&self) -> GraphData {
        self.inner.read().clone()
    }

    pub fn upsert_method(&self, node: MethodNode) {
        log::trace!("upsert method {}", node.id);
        self.inner.write().upsert_method(node);
    }

    pub fn upsert_class(&self, node: ClassNode) {
        log::trace!("upsert class {}", node.id);
        self.inner.write().upsert_class(node);
    }

    pub fn add_call_edge(&self, edge: CallEdge) {
        self.inner.write().add_call_edge(edge);
    }

    pub fn add_implements_edge(&self, edge: ImplementsEdge) {
        self.inner.write().add_implements_edge(edge);
    }

    pub fn add_data_flow_edge(&self, edge: DataFlowEdge) {
        self.inner.write().add_data_flow_edge(edge);
    }

    pub fn get_method(&self, id: &str) -> Option<MethodNode> {
        self.inner.read().method(id).cloned()
    }

    pub fn get_class(&self, id: &str) -> Option<ClassNode> {
        self.inner.read().class(id).cloned()
    }

    pub fn get_callers(&self, id: &str) -> Vec<MethodNode> {
        self.inner.read().callers(id)
    }

    pub fn get_callees(&self, id: &str) -> Vec<MethodNode> {
        self.inner.read().callees(id)
    }

    pub fn get_methods_for_file(&self, path: &Path) -> Vec<MethodNode> {
        self.inner.read().methods_for_file(path)
    }

    /// Write back a freshly computed method risk score.
    pub fn set_risk_score(&self, id: &str, score: f64) {
        self.inner.write().set_risk_score(id, score);
    }

    /// All simple call chains from `source` to `target` within `max_depth`
    /// hops. The read guard is held for the whole search.
    pub fn find_paths(
        &self,
        source: &str,
        target: &str,
        max_depth: usize,
    ) -> Vec<crate::graph::types::CallPath> {
        self.inner.read().find_paths(source, target, max_depth)
    }

    /// Methods reachable from `id` in either call direction within
    /// `max_depth` hops, excluding `id` itself.
    pub fn get_impact_radius(&self, id: &str, max_depth: usize) -> std::collections::HashSet<String> {
        self.inner.read().impact_radius(id, max_depth)
    }

    /// Decayed risk each caller inherits from `id`, out to `depth` hops.
    pub fn calculate_risk_propagation(
        &self,
        id: &str,
        depth: usize,
    ) -> std::collections::HashMap<String, f64> {
        self.inner.read().risk_propagation(id, depth)
    }

    /// Apply one file's parsed analysis output as a batch of upserts.
    /// Returns the number of affected nodes.
    pub fn apply_file_analysis(&self, analysis: &FileAnalysis) -> usize {
        log::debug!(
            "apply analysis for {} ({} methods, {} calls)",
            analysis.path.display(),
            analysis.methods.len(),
            analysis.calls.len()
        );
        self.inner.write().apply_file_analysis(analysis)
    }

    pub fn remove_file_nodes(&self, path: &Path) -> usize {
        let removed = self.inner.write().remove_file_nodes(path);
        log::debug!("removed {} methods for {}", removed, path.display());
        removed
    }

    pub fn rename_file_nodes(&self, old: &Path, new: &Path) -> usize {
        self.inner.write().rename_file_nodes(old, new)
    }

    /// Patch the graph for a batch of file changes. Deleted files are
    /// handled by the store itself; added and modified files are re-derived
    /// by the external provider. One bad file never aborts the batch: its
    /// error is collected and the remaining changes proceed.
    ///
    /// Provider calls run before the write lock is taken, so in-flight
    /// readers are not blocked behind external analysis; the gathered
    /// results are then applied atomically.
    pub fn incremental_update(
        &self,
        changes: &[FileChange],
        provider: &dyn AnalysisProvider,
    ) -> UpdateOutcome {
        let mut errors = Vec::new();
        let mut analyses: Vec<FileAnalysis> = Vec::new();
        let mut deletions: Vec<PathBuf> = Vec::new();

        for change in changes {
            match change.kind {
                ChangeKind::Deleted => deletions.push(change.path.clone()),
                ChangeKind::Added | ChangeKind::Modified => {
                    match provider.analyze_file(&change.path) {
                        Ok(analysis) => analyses.push(analysis),
                        Err(err) => {
                            log::warn!("analysis failed for {}: {err:#}", change.path.display());
                            errors.push(AnalysisError::file_update(
                                change.path.clone(),
                                format!("{err:#}"),
                            ));
                        }
                    }
                }
            }
        }

        let mut affected = 0;
        {
            let mut data = self.inner.write();
            for path in &deletions {
                affected += data.remove_file_nodes(path);
            }
            for analysis in &analyses {
                // Modified files are replaced wholesale: drop the stale
                // nodes first so removed methods do not linger.
                affected += data.remove_file_nodes(&analysis.path);
                affected += data.apply_file_analysis(analysis);
            }
        }

        log::debug!(
            "incremental update: {} changes, {} affected nodes, {} errors",
            changes.len(),
            affected,
            errors.len()
        );
        UpdateOutcome {
            success: errors.is_empty(),
            affected_nodes: affected,
            errors,
        }
    }

    /// Aggregate counts, complexity average, risk histogram, and the
    /// `top_n` highest-degree hotspot methods.
    pub fn get_statistics(&self, top_n: usize) -> GraphStatistics {
        self.inner.read().statistics(top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;

    fn method_in_file(id: &str, file: &str) -> MethodNode {
        let mut m = MethodNode::new(id, id, BlockType::Service);
        m.file_path = PathBuf::from(file);
        m
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "a.rs"));
        store.upsert_method(method_in_file("A#a()", "a.rs"));
        assert_eq!(store.get_statistics(5).method_count, 1);
    }

    #[test]
    fn test_degrees_follow_edge_mutation() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "a.rs"));
        store.upsert_method(method_in_file("B#b()", "b.rs"));
        store.upsert_method(method_in_file("C#c()", "c.rs"));
        store.add_call_edge(CallEdge::new("A#a()", "B#b()"));
        store.add_call_edge(CallEdge::new("C#c()", "B#b()"));

        let b = store.get_method("B#b()").unwrap();
        assert_eq!(b.in_degree, 2);
        assert_eq!(b.out_degree, 0);

        let a = store.get_method("A#a()").unwrap();
        assert_eq!(a.out_degree, 1);
    }

    #[test]
    fn test_duplicate_edge_does_not_inflate_degrees() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "a.rs"));
        store.upsert_method(method_in_file("B#b()", "b.rs"));
        store.add_call_edge(CallEdge::new("A#a()", "B#b()"));
        store.add_call_edge(CallEdge::new("A#a()", "B#b()"));

        assert_eq!(store.get_method("B#b()").unwrap().in_degree, 1);
        assert_eq!(store.get_statistics(5).call_edge_count, 1);
    }

    #[test]
    fn test_unknown_id_yields_empty_results() {
        let store = GraphStore::new();
        assert!(store.get_callers("nope").is_empty());
        assert!(store.get_callees("nope").is_empty());
        assert!(store.find_paths("nope", "other", 5).is_empty());
        assert!(store.get_impact_radius("nope", 5).is_empty());
        assert!(store.calculate_risk_propagation("nope", 5).is_empty());
    }

    #[test]
    fn test_remove_file_cascades_edges() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "a.rs"));
        store.upsert_method(method_in_file("B#b()", "b.rs"));
        store.add_call_edge(CallEdge::new("A#a()", "B#b()"));

        let removed = store.remove_file_nodes(Path::new("b.rs"));
        assert_eq!(removed, 1);
        assert!(store.get_methods_for_file(Path::new("b.rs")).is_empty());
        assert_eq!(store.get_statistics(5).call_edge_count, 0);
        assert_eq!(store.get_method("A#a()").unwrap().out_degree, 0);
    }

    #[test]
    fn test_rename_preserves_ids() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "old.rs"));
        let renamed = store.rename_file_nodes(Path::new("old.rs"), Path::new("new.rs"));
        assert_eq!(renamed, 1);

        let node = store.get_method("A#a()").unwrap();
        assert_eq!(node.file_path, PathBuf::from("new.rs"));
        assert_eq!(store.get_methods_for_file(Path::new("new.rs")).len(), 1);
    }

    #[test]
    fn test_statistics_histogram_and_hotspots() {
        let store = GraphStore::new();
        for (id, risk) in [("A#a()", 0.1), ("B#b()", 0.5), ("C#c()", 0.7), ("D#d()", 0.9)] {
            store.upsert_method(method_in_file(id, "x.rs"));
            store.set_risk_score(id, risk);
        }
        store.add_call_edge(CallEdge::new("A#a()", "B#b()"));
        store.add_call_edge(CallEdge::new("C#c()", "B#b()"));
        store.add_call_edge(CallEdge::new("D#d()", "B#b()"));

        let stats = store.get_statistics(2);
        assert_eq!(stats.risk_histogram, RiskHistogram {
            low: 1,
            medium: 1,
            high: 1,
            critical: 1,
        });
        assert_eq!(stats.hotspots.len(), 2);
        assert_eq!(stats.hotspots[0].method_id, "B#b()");
        assert_eq!(stats.hotspots[0].total_degree, 3);
    }

    struct FixedProvider(FileAnalysis);

    impl AnalysisProvider for FixedProvider {
        fn analyze_file(&self, _path: &Path) -> anyhow::Result<FileAnalysis> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl AnalysisProvider for FailingProvider {
        fn analyze_file(&self, path: &Path) -> anyhow::Result<FileAnalysis> {
            anyhow::bail!("cannot parse {}", path.display())
        }
    }

    #[test]
    fn test_incremental_update_deletes_and_applies() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("Old#gone()", "dead.rs"));

        let analysis = FileAnalysis {
            path: PathBuf::from("new.rs"),
            methods: vec![method_in_file("New#fresh()", "new.rs")],
            ..Default::default()
        };
        let outcome = store.incremental_update(
            &[
                FileChange::new("dead.rs", ChangeKind::Deleted),
                FileChange::new("new.rs", ChangeKind::Added),
            ],
            &FixedProvider(analysis),
        );

        assert!(outcome.success);
        assert_eq!(outcome.affected_nodes, 2);
        assert!(store.get_method("Old#gone()").is_none());
        assert!(store.get_method("New#fresh()").is_some());
    }

    #[test]
    fn test_incremental_update_collects_partial_failures() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("Old#gone()", "dead.rs"));

        let outcome = store.incremental_update(
            &[
                FileChange::new("broken.rs", ChangeKind::Modified),
                FileChange::new("dead.rs", ChangeKind::Deleted),
            ],
            &FailingProvider,
        );

        // The bad file is reported, the deletion still lands.
        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.affected_nodes, 1);
        assert!(store.get_method("Old#gone()").is_none());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let store = GraphStore::new();
        store.upsert_method(method_in_file("A#a()", "a.rs"));

        let snapshot = store.snapshot();
        store.upsert_method(method_in_file("B#b()", "b.rs"));

        assert_eq!(snapshot.method_count(), 1);
        assert_eq!(store.snapshot().method_count(), 2);
    }
}
