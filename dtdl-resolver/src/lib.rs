//! # DTDL Model Resolver
//!
//! The query engine over the DTDL metamodel graph.
//!
//! Given a [`dtdl_graph::MetamodelGraph`] and a
//! [`dtdl_context::DocumentContext`], a [`ModelResolver`] answers:
//! - which property short names a concept admits (including inherited ones)
//! - which `@type` values are legal at a document position
//! - a property's canonical primitive value type(s)
//! - the legal literal string values of a concept
//! - the required property names of a known DTDL type
//!
//! Resolution is best-effort throughout: failures yield `None` or empty
//! results for callers to skip, never errors. Traversal results are
//! deduplicated, sorted, and memoized per resolver instance.

pub mod resolver;

pub use resolver::{ModelResolver, TypedProperty};
