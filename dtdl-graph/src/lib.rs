//! # DTDL Metamodel Graph
//!
//! Immutable RDF-style metamodel graph for DTDL schema resolution.
//!
//! This crate provides:
//! - Core types: [`GraphNode`], [`GraphEdge`], [`MetamodelGraph`]
//! - JSON loading of a packaged metamodel document
//! - An adjacency index built at load time (id -> incoming/outgoing edges
//!   by label), turning traversal scans into hash lookups
//!
//! The graph is loaded once per session and never mutated; resolvers built
//! over it rely on that immutability for lifetime-long memoization.

pub mod error;
pub mod graph;
mod index;

pub use error::{GraphError, Result};
pub use graph::{GraphEdge, GraphNode, MetamodelGraph};
