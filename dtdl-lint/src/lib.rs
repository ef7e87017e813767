//! # DTDL Document Diagnostics
//!
//! Validates authored DTDL documents (interfaces and capability models)
//! against the resolved metamodel, producing positioned issues for a host
//! editor to render.
//!
//! This crate provides:
//! - A span-carrying JSON lexer and parser ([`parse::parse_document`]):
//!   every value node and property-name token keeps its byte-offset span
//! - [`Issue`]: a half-open span plus a human-readable message
//! - [`Linter`]: the two-pass diagnostics engine (shape checks, then
//!   numeric type checks) driven by a [`dtdl_resolver::ModelResolver`]
//!
//! Validation is biased toward availability: resolution failures skip the
//! affected check, and an unparsable document produces no issues at all
//! (syntax errors belong to a separate reporting layer).
//!
//! # Example
//!
//! ```ignore
//! use dtdl_context::DocumentKind;
//! use dtdl_graph::MetamodelGraph;
//! use dtdl_lint::Linter;
//! use dtdl_resolver::ModelResolver;
//!
//! let graph = MetamodelGraph::from_json(schema_text)?;
//! let resolver = ModelResolver::new(&graph);
//! let linter = Linter::new(&resolver, DocumentKind::Interface);
//!
//! for issue in linter.lint(document_text) {
//!     println!("{}..{}: {}", issue.start, issue.end, issue.message);
//! }
//! ```

pub mod error;
pub mod issue;
pub mod lex;
pub mod parse;
pub mod validate;

pub use error::{LintError, Result};
pub use issue::{offset_to_line_col, Issue};
pub use parse::{parse_document, JsonNode, JsonValue, PropertyName};
pub use validate::Linter;

/// Document kind (re-exported from dtdl-context)
pub use dtdl_context::DocumentKind;
