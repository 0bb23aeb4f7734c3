//! Traversal primitives over the graph data: path enumeration, impact
//! radius, and decayed risk propagation.
//!
//! These run on a [`GraphData`] view, so callers holding a snapshot get
//! the same algorithms without touching the store lock.

use crate::graph::store::GraphData;
use crate::graph::types::{CallEdge, CallPath};
use std::collections::{HashMap, HashSet, VecDeque};

/// Per-hop multiplier applied when propagating risk outward through
/// callers. Confidence in the propagated score shrinks with distance.
pub const RISK_DECAY_FACTOR: f64 = 0.8;

impl GraphData {
    /// Enumerate every simple path from `source` to `target` over the
    /// callee relation, bounded by `max_depth` hops. Breadth-first, so
    /// shorter paths come out first; exploration order is sorted for
    /// reproducible results. Unknown sources yield an empty list.
    pub fn find_paths(&self, source: &str, target: &str, max_depth: usize) -> Vec<CallPath> {
        if self.method(source).is_none() {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut queue: VecDeque<Vec<String>> = VecDeque::new();
        queue.push_back(vec![source.to_string()]);

        while let Some(ids) = queue.pop_front() {
            let last = ids.last().expect("queued paths are never empty");

            if last == target {
                found.push(self.materialize_path(&ids, found.len()));
                // A simple path cannot revisit the target, so stop here.
                continue;
            }

            if ids.len() > max_depth {
                continue;
            }

            for callee in self.callee_ids(last) {
                if !ids.contains(&callee) {
                    let mut next = ids.clone();
                    next.push(callee);
                    queue.push_back(next);
                }
            }
        }

        log::trace!(
            "find_paths {source} -> {target} (depth {max_depth}): {} paths",
            found.len()
        );
        found
    }

    /// Methods reachable from `id` through callers or callees within
    /// `max_depth` hops. The origin itself is excluded.
    pub fn impact_radius(&self, id: &str, max_depth: usize) -> HashSet<String> {
        if self.method(id).is_none() {
            return HashSet::new();
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        visited.insert(id.to_string());
        queue.push_back((id.to_string(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for neighbor in self
                .caller_ids(&current)
                .into_iter()
                .chain(self.callee_ids(&current))
            {
                if visited.insert(neighbor.clone()) {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        visited.remove(id);
        visited
    }

    /// Propagate `id`'s own risk score outward through its callers,
    /// decaying by [`RISK_DECAY_FACTOR`] per hop. Each reached method maps
    /// to the risk at its shortest caller distance, so hop 0 carries the
    /// origin's score exactly and values strictly decrease with distance
    /// (for positive scores).
    pub fn risk_propagation(&self, id: &str, depth: usize) -> HashMap<String, f64> {
        let Some(origin) = self.method(id) else {
            return HashMap::new();
        };

        let base_risk = origin.risk_score;
        let mut reached: HashMap<String, f64> = HashMap::new();
        reached.insert(id.to_string(), base_risk);

        let mut frontier: Vec<String> = vec![id.to_string()];
        for hop in 1..=depth {
            let decayed = base_risk * RISK_DECAY_FACTOR.powi(hop as i32);
            let mut next: Vec<String> = Vec::new();
            for current in &frontier {
                for caller in self.caller_ids(current) {
                    if !reached.contains_key(&caller) {
                        reached.insert(caller.clone(), decayed);
                        next.push(caller);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        reached
    }

    /// Resolve an id sequence into a `CallPath`, looking up each
    /// transition's call edge. Missing edges become gaps, not errors.
    fn materialize_path(&self, ids: &[String], ordinal: usize) -> CallPath {
        let methods = ids
            .iter()
            .filter_map(|id| self.method(id))
            .cloned()
            .collect::<Vec<_>>();

        let edges: Vec<Option<CallEdge>> = ids
            .windows(2)
            .map(|pair| self.find_call_edge(&pair[0], &pair[1]))
            .collect();

        let first = ids.first().map(String::as_str).unwrap_or_default();
        let last = ids.last().map(String::as_str).unwrap_or_default();
        CallPath::new(format!("{first}->{last}:{ordinal}"), methods).with_edges(edges)
    }

    fn find_call_edge(&self, caller: &str, callee: &str) -> Option<CallEdge> {
        self.call_edges
            .iter()
            .find(|e| e.caller_id == caller && e.callee_id == callee)
            .cloned()
    }
}
