//! Document kinds
//!
//! The document kind is derived from the file name and fixes the root type
//! and the pair of `@context` URIs a document is allowed to declare.

use dtdl_vocab::{contexts, model};

/// The two kinds of authored DTDL documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// An interface definition (`*.interface.json`)
    Interface,
    /// A capability model (`*.capabilitymodel.json`)
    CapabilityModel,
}

impl DocumentKind {
    /// Derive the kind from a file path. Matching is case-insensitive on
    /// the double extension; anything else is not a DTDL document.
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".interface.json") {
            Some(DocumentKind::Interface)
        } else if lower.ends_with(".capabilitymodel.json") {
            Some(DocumentKind::CapabilityModel)
        } else {
            None
        }
    }

    /// The implied root `@type` for documents of this kind.
    pub fn root_type_name(self) -> &'static str {
        match self {
            DocumentKind::Interface => model::INTERFACE,
            DocumentKind::CapabilityModel => model::CAPABILITY_MODEL,
        }
    }

    /// The two `@context` URIs documents of this kind may declare.
    pub fn allowed_context_uris(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Interface => contexts::INTERFACE_ALLOWED,
            DocumentKind::CapabilityModel => contexts::CAPABILITY_MODEL_ALLOWED,
        }
    }
}
