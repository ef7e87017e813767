//! Adjacency index over the edge list
//!
//! Groups edge indices by (node id, edge label) in both directions so that
//! traversal queries are hash lookups instead of O(E) scans. The metamodel
//! is fixed and small, so this is built eagerly at load time and never
//! updated.

use crate::graph::GraphEdge;
use rustc_hash::FxHashMap;

/// Static empty slice for missing entries
static EMPTY_EDGES: &[usize] = &[];

/// Edge indices for one node, grouped by edge label.
#[derive(Debug, Clone, Default)]
struct EdgesByLabel {
    by_label: FxHashMap<String, Vec<usize>>,
}

impl EdgesByLabel {
    fn push(&mut self, label: &str, edge_idx: usize) {
        self.by_label
            .entry(label.to_string())
            .or_default()
            .push(edge_idx);
    }

    fn get(&self, label: &str) -> &[usize] {
        self.by_label
            .get(label)
            .map(|v| v.as_slice())
            .unwrap_or(EMPTY_EDGES)
    }
}

/// Bidirectional (id, label) -> edge indices map.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeIndex {
    outgoing: FxHashMap<String, EdgesByLabel>,
    incoming: FxHashMap<String, EdgesByLabel>,
}

impl EdgeIndex {
    /// Build the index from an edge list. Edge order is preserved within
    /// each (id, label) bucket so traversal output stays deterministic.
    pub(crate) fn build(edges: &[GraphEdge]) -> Self {
        let mut outgoing: FxHashMap<String, EdgesByLabel> = FxHashMap::default();
        let mut incoming: FxHashMap<String, EdgesByLabel> = FxHashMap::default();

        for (i, edge) in edges.iter().enumerate() {
            outgoing
                .entry(edge.source.id.clone())
                .or_default()
                .push(&edge.label, i);
            incoming
                .entry(edge.target.id.clone())
                .or_default()
                .push(&edge.label, i);
        }

        Self { outgoing, incoming }
    }

    pub(crate) fn outgoing(&self, id: &str, label: &str) -> &[usize] {
        self.outgoing
            .get(id)
            .map(|e| e.get(label))
            .unwrap_or(EMPTY_EDGES)
    }

    pub(crate) fn incoming(&self, id: &str, label: &str) -> &[usize] {
        self.incoming
            .get(id)
            .map(|e| e.get(label))
            .unwrap_or(EMPTY_EDGES)
    }
}
