//! Document context parsing and lookup
//!
//! A DTDL document carries a JSON-LD-like `@context`: a required `@vocab`
//! base IRI plus term definitions mapping the short names authors write to
//! IRI suffixes. A term definition is either a plain suffix string or an
//! object `{"@id": suffix, "@container": "@language"?}`; the language
//! container marks a localizable string map.
//!
//! Every resolution call is scoped to exactly one context. Contexts are
//! parsed once per document and treated as immutable.

use crate::error::{ContextError, Result};
use crate::kind::DocumentKind;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A single term definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    /// IRI suffix, concatenated with `@vocab` to form the full concept id
    pub id_suffix: String,
    /// Whether this term is a localizable string map (`@container: @language`)
    pub language_container: bool,
}

/// The parsed context of one document.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    vocab: String,
    /// Term definitions, ordered by short name so reverse lookups are
    /// deterministic.
    terms: BTreeMap<String, TermEntry>,
}

impl DocumentContext {
    /// Parse a `@context` JSON value.
    ///
    /// Accepts either the context object itself or a document object with a
    /// wrapped `@context` key. `@vocab` is required; `@`-prefixed keys other
    /// than `@vocab` are ignored.
    pub fn parse(value: &JsonValue) -> Result<Self> {
        let map = match value {
            JsonValue::Object(map) => map,
            other => return Err(ContextError::NotAnObject(kind_name(other).to_string())),
        };

        // Allow a wrapped { "@context": {...} } document
        if let Some(inner) = map.get("@context") {
            if inner.is_object() {
                return Self::parse(inner);
            }
        }

        let vocab = map
            .get("@vocab")
            .and_then(|v| v.as_str())
            .ok_or(ContextError::MissingVocab)?
            .to_string();

        let mut terms = BTreeMap::new();
        for (key, entry) in map.iter() {
            if key.starts_with('@') {
                continue;
            }
            terms.insert(key.clone(), parse_term_entry(key, entry)?);
        }

        Ok(Self { vocab, terms })
    }

    /// Parse a context from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::parse(&value)
    }

    /// The packaged default context for a document kind, used when a
    /// document does not carry a usable `@context` of its own.
    pub fn default_for(kind: DocumentKind) -> Self {
        let text = match kind {
            DocumentKind::Interface => include_str!("../assets/interface.context.json"),
            DocumentKind::CapabilityModel => {
                include_str!("../assets/capability_model.context.json")
            }
        };
        // Packaged assets are fixed at build time; a parse failure here is
        // a packaging defect, not a runtime condition.
        Self::from_json(text).expect("packaged default context is valid")
    }

    /// The `@vocab` base IRI.
    pub fn vocab(&self) -> &str {
        &self.vocab
    }

    /// Get a term definition by short name.
    pub fn term(&self, short_name: &str) -> Option<&TermEntry> {
        self.terms.get(short_name)
    }

    /// Resolve a short name to its fully qualified concept id.
    pub fn id_of(&self, short_name: &str) -> Option<String> {
        self.terms
            .get(short_name)
            .map(|entry| format!("{}{}", self.vocab, entry.id_suffix))
    }

    /// Reverse lookup: the short name whose resolved id equals `id`.
    ///
    /// Scans term definitions in short-name order; the first match wins.
    pub fn short_name_of(&self, id: &str) -> Option<&str> {
        let suffix = id.strip_prefix(self.vocab.as_str())?;
        self.terms
            .iter()
            .find(|(_, entry)| entry.id_suffix == suffix)
            .map(|(name, _)| name.as_str())
    }

    /// Whether `id` resolves to a term flagged `@container: @language`.
    pub fn is_language_container(&self, id: &str) -> bool {
        match id.strip_prefix(self.vocab.as_str()) {
            Some(suffix) => self
                .terms
                .values()
                .any(|entry| entry.language_container && entry.id_suffix == suffix),
            None => false,
        }
    }

    /// Iterate term definitions in short-name order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &TermEntry)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn parse_term_entry(key: &str, value: &JsonValue) -> Result<TermEntry> {
    match value {
        JsonValue::String(suffix) => Ok(TermEntry {
            id_suffix: suffix.clone(),
            language_container: false,
        }),
        JsonValue::Object(map) => {
            let suffix = map
                .get("@id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ContextError::invalid_entry(key, "object entry without @id"))?;
            let language_container = map
                .get("@container")
                .and_then(|v| v.as_str())
                .is_some_and(|c| c == "@language");
            Ok(TermEntry {
                id_suffix: suffix.to_string(),
                language_container,
            })
        }
        other => Err(ContextError::invalid_entry(
            key,
            format!("expected string or object, got {}", kind_name(other)),
        )),
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
