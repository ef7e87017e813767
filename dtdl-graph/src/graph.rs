//! Metamodel graph types and JSON loading
//!
//! The metamodel is an RDF-style edge list: subjects and objects are
//! `GraphNode`s, relationships are `GraphEdge`s whose `label` is one of the
//! fixed edge-label IRIs in [`dtdl_vocab::rdf`] / [`dtdl_vocab::rdfs`].
//! A graph is loaded once from a packaged schema document and is immutable
//! for the lifetime of any resolver constructed over it.

use crate::error::{GraphError, Result};
use crate::index::EdgeIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An RDF subject or object.
///
/// `value` is present only for literal nodes (comment or label text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Fully qualified concept IRI, or literal text for value nodes
    pub id: String,
    /// Literal value, if this node is a literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl GraphNode {
    /// Create a concept node.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
        }
    }
}

/// A directed, labeled edge between two nodes.
///
/// Multiple edges between the same pair with different labels are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge subject
    #[serde(rename = "sourceNode")]
    pub source: GraphNode,
    /// Edge object
    #[serde(rename = "targetNode")]
    pub target: GraphNode,
    /// Edge label IRI (domain, range, subClassOf, type, label, comment)
    pub label: String,
}

impl GraphEdge {
    /// Create an edge between two concept ids.
    pub fn new(
        source: impl Into<String>,
        label: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: GraphNode::new(source),
            target: GraphNode::new(target),
            label: label.into(),
        }
    }
}

/// Wire shape of a packaged metamodel document.
#[derive(Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

/// The immutable metamodel graph.
///
/// Construction builds an adjacency index (id -> incoming/outgoing edges by
/// label) so traversal queries avoid full edge-list scans. Query results are
/// identical to a linear scan of [`MetamodelGraph::edges`]; the index is a
/// load-time optimization only.
#[derive(Debug, Clone)]
pub struct MetamodelGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index: EdgeIndex,
}

impl MetamodelGraph {
    /// Build a graph from nodes and edges.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let index = EdgeIndex::build(&edges);
        Self {
            nodes,
            edges,
            index,
        }
    }

    /// Load a graph from packaged JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawGraph = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Load a graph from an already-parsed JSON value.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let raw: RawGraph = serde_json::from_value(value.clone())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawGraph) -> Result<Self> {
        if let Some(node) = raw.nodes.iter().find(|n| n.id.is_empty()) {
            return Err(GraphError::invalid_graph(format!(
                "node with empty id (value: {:?})",
                node.value
            )));
        }
        Ok(Self::new(raw.nodes, raw.edges))
    }

    /// All nodes, in document order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, in document order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Edges whose source is `id` and whose label is `label`.
    pub fn outgoing<'a>(
        &'a self,
        id: &str,
        label: &str,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.index
            .outgoing(id, label)
            .iter()
            .map(move |&i| &self.edges[i])
    }

    /// Edges whose target is `id` and whose label is `label`.
    pub fn incoming<'a>(
        &'a self,
        id: &str,
        label: &str,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.index
            .incoming(id, label)
            .iter()
            .map(move |&i| &self.edges[i])
    }

    /// Check whether any edge with the given label points at `id`.
    pub fn has_incoming(&self, id: &str, label: &str) -> bool {
        !self.index.incoming(id, label).is_empty()
    }
}
