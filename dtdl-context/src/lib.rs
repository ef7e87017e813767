//! # DTDL Document Context
//!
//! JSON-LD-style `@context` handling for DTDL documents.
//!
//! A context maps the short names authors write (`name`, `schema`,
//! `Telemetry`) to fully qualified concept IRIs by concatenating a required
//! `@vocab` base with per-term suffixes. Terms flagged
//! `@container: @language` denote localizable string maps keyed by language
//! code.
//!
//! Documents normally carry their own `@context`; packaged defaults per
//! [`DocumentKind`] cover documents that do not.

pub mod context;
pub mod error;
pub mod kind;

pub use context::{DocumentContext, TermEntry};
pub use error::{ContextError, Result};
pub use kind::DocumentKind;
