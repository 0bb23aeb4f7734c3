//! Node, edge, and path records owned by the graph store.
//!
//! Edges hold method ids rather than embedded node copies; ids are
//! resolved against the store at query time, so an edge can never go
//! stale when its endpoints are re-analyzed.

use crate::core::{BlockType, CallContext, CallType, PathType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A method in the call graph.
///
/// Identity is the stable id `ClassQualifiedName#methodName(paramTypes)`,
/// derived from the qualified name, never from the file path, so renames
/// leave ids untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub id: String,
    pub method_name: String,
    pub signature: String,
    pub return_type: String,
    pub param_types: Vec<String>,
    pub block_type: BlockType,
    pub annotations: BTreeSet<String>,
    pub cyclomatic_complexity: u32,
    pub lines_of_code: usize,
    pub has_tests: bool,
    /// Distinct caller count, maintained on edge mutation.
    pub in_degree: usize,
    /// Distinct callee count, maintained on edge mutation.
    pub out_degree: usize,
    /// Last risk score computed for this method.
    pub risk_score: f64,
    pub file_path: PathBuf,
    pub line_start: usize,
    pub line_end: usize,
}

impl MethodNode {
    pub fn new(id: impl Into<String>, method_name: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            method_name: method_name.into(),
            signature: String::new(),
            return_type: String::new(),
            param_types: Vec::new(),
            block_type,
            annotations: BTreeSet::new(),
            cyclomatic_complexity: 1,
            lines_of_code: 0,
            has_tests: false,
            in_degree: 0,
            out_degree: 0,
            risk_score: 0.0,
            file_path: PathBuf::new(),
            line_start: 0,
            line_end: 0,
        }
    }

    /// Owning class portion of the id (the part before `#`).
    pub fn class_id(&self) -> &str {
        self.id.split('#').next().unwrap_or(&self.id)
    }

    /// Case-insensitive check for an annotation containing `needle`.
    pub fn has_annotation_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.annotations
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
    }
}

/// A class or interface in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Package-qualified class name.
    pub id: String,
    pub block_type: BlockType,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub implemented_interfaces: Vec<String>,
    pub super_class: Option<String>,
    pub cohesion: f64,
    pub coupling: f64,
    pub design_patterns: Vec<String>,
    pub method_count: usize,
    pub field_count: usize,
    pub file_path: PathBuf,
}

impl ClassNode {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            is_interface: false,
            is_abstract: false,
            implemented_interfaces: Vec::new(),
            super_class: None,
            cohesion: 0.0,
            coupling: 0.0,
            design_patterns: Vec::new(),
            method_count: 0,
            field_count: 0,
            file_path: PathBuf::new(),
        }
    }
}

/// A call relationship between two methods, by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller_id: String,
    pub callee_id: String,
    pub call_type: CallType,
    pub line_number: usize,
    /// The call occurs under a branch.
    pub is_conditional: bool,
    pub context: Option<CallContext>,
    /// Edge-local scratch values.
    pub intent_weight: f64,
    pub risk_weight: f64,
}

impl CallEdge {
    pub fn new(caller_id: impl Into<String>, callee_id: impl Into<String>) -> Self {
        Self {
            caller_id: caller_id.into(),
            callee_id: callee_id.into(),
            call_type: CallType::Direct,
            line_number: 0,
            is_conditional: false,
            context: None,
            intent_weight: 0.5,
            risk_weight: 0.5,
        }
    }
}

/// Interface method to implementation method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementsEdge {
    pub interface_method_id: String,
    pub implementation_method_id: String,
}

/// Data source to data sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFlowEdge {
    pub source_id: String,
    pub sink_id: String,
}

/// An ordered call chain through the graph.
///
/// `edges[i]` connects `methods[i]` to `methods[i + 1]` when present; a
/// `None` gap means the store held no call edge for that transition and
/// the transition contributes no structural evidence to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPath {
    pub id: String,
    pub methods: Vec<MethodNode>,
    pub edges: Vec<Option<CallEdge>>,
    pub path_type: PathType,
}

impl CallPath {
    pub fn new(id: impl Into<String>, methods: Vec<MethodNode>) -> Self {
        let edges = if methods.is_empty() {
            Vec::new()
        } else {
            vec![None; methods.len() - 1]
        };
        Self {
            id: id.into(),
            methods,
            edges,
            path_type: PathType::Neutral,
        }
    }

    pub fn with_edges(mut self, edges: Vec<Option<CallEdge>>) -> Self {
        self.edges = edges;
        self
    }

    /// Number of call hops (methods − 1, zero for a single-method path).
    pub fn hop_count(&self) -> usize {
        self.methods.len().saturating_sub(1)
    }

    pub fn average_complexity(&self) -> f64 {
        if self.methods.is_empty() {
            return 0.0;
        }
        let total: u32 = self.methods.iter().map(|m| m.cyclomatic_complexity).sum();
        total as f64 / self.methods.len() as f64
    }

    /// Fraction of methods on the path with tests.
    pub fn tested_fraction(&self) -> f64 {
        if self.methods.is_empty() {
            return 0.0;
        }
        let tested = self.methods.iter().filter(|m| m.has_tests).count();
        tested as f64 / self.methods.len() as f64
    }

    /// Resolved edges over possible transitions; 0.5 (neutral) for a
    /// single-method path where density is undefined.
    pub fn edge_density(&self) -> f64 {
        if self.methods.len() <= 1 {
            return 0.5;
        }
        let present = self.edges.iter().filter(|e| e.is_some()).count();
        present as f64 / (self.methods.len() - 1) as f64
    }

    /// Distinct signatures over path length. Repeated signatures indicate
    /// duplicated logic along the chain.
    pub fn distinct_signature_ratio(&self) -> f64 {
        if self.methods.is_empty() {
            return 1.0;
        }
        let distinct: BTreeSet<&str> = self.methods.iter().map(|m| m.signature.as_str()).collect();
        distinct.len() as f64 / self.methods.len() as f64
    }

    /// Methods on this path whose ids appear in `changed`.
    pub fn changed_methods<'a>(
        &'a self,
        changed: &std::collections::HashSet<String>,
    ) -> Vec<&'a MethodNode> {
        self.methods
            .iter()
            .filter(|m| changed.contains(&m.id))
            .collect()
    }
}
