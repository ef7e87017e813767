//! Document validation
//!
//! A state-machine-free recursive-descent validator over the span-carrying
//! value tree, producing a flat list of [`Issue`]s. Two passes run per
//! document:
//!
//! 1. the shape pass: effective `@type` resolution, required/unexpected
//!    property checks, sibling duplicate names, and string value checks;
//! 2. the type pass: numeric integrality against declared value types.
//!
//! Resolution failures anywhere skip the affected check: an unresolvable
//! key or type yields no issues for that subtree. The one hard failure
//! mode is an unparsable document, which yields zero issues; syntax errors
//! are reported by a separate layer.

use crate::issue::Issue;
use crate::parse::{parse_document, JsonNode, JsonValue, PropertyName};
use dtdl_context::{DocumentContext, DocumentKind};
use dtdl_resolver::ModelResolver;
use dtdl_vocab::{model, prim, rules};
use regex::Regex;
use serde_json::Value as SerdeValue;
use std::collections::HashSet;

/// Contextual key assigned to an interface body embedded under
/// `implements.schema`. Objects at this key are interfaces that may omit
/// `@context`; strings at this key are interface references.
const INLINE_INTERFACE_KEY: &str = "implements/schema";

/// Document validator over one resolver and document kind.
pub struct Linter<'r, 'g> {
    resolver: &'r ModelResolver<'g>,
    kind: DocumentKind,
}

impl<'r, 'g> Linter<'r, 'g> {
    /// Create a linter for documents of the given kind.
    pub fn new(resolver: &'r ModelResolver<'g>, kind: DocumentKind) -> Self {
        Self { resolver, kind }
    }

    /// Validate document text, producing positioned issues.
    ///
    /// The document's own `@context` object is used when present and
    /// parsable; otherwise the packaged default for the document kind.
    /// Unparsable text yields no issues.
    pub fn lint(&self, text: &str) -> Vec<Issue> {
        let root = match parse_document(text) {
            Ok(root) => root,
            Err(_) => return Vec::new(),
        };
        let ctx = self.document_context(&root);

        let mut issues = self.value_issues(&ctx, &root, None);
        issues.extend(self.type_issues(&ctx, &root, None));
        issues
    }

    fn document_context(&self, root: &JsonNode) -> DocumentContext {
        if let Some(node) = root.property("@context") {
            match DocumentContext::parse(&to_serde_value(node)) {
                Ok(ctx) => return ctx,
                Err(err) => {
                    tracing::debug!(error = %err, "document @context unusable; using packaged default");
                }
            }
        }
        DocumentContext::default_for(self.kind)
    }

    // =========================================================================
    // Shape pass
    // =========================================================================

    fn value_issues(&self, ctx: &DocumentContext, node: &JsonNode, key: Option<&str>) -> Vec<Issue> {
        match &node.value {
            JsonValue::Object(props) => self.object_issues(ctx, node, props, key),
            JsonValue::Array(items) => self.array_issues(ctx, items, key),
            JsonValue::String(s) => self.string_issues(ctx, node, s, key),
            _ => Vec::new(),
        }
    }

    /// Type names legal for an object at the given position, or `None`
    /// when the position is unresolvable and checks must be skipped.
    fn valid_type_names(&self, ctx: &DocumentContext, key: Option<&str>) -> Option<Vec<String>> {
        match key {
            None => Some(vec![self.kind.root_type_name().to_string()]),
            Some(k) if k == INLINE_INTERFACE_KEY => Some(vec![model::INTERFACE.to_string()]),
            Some(k) => {
                let id = self.resolver.id_from_short_name(ctx, k)?;
                let types = self.resolver.types_from_id(ctx, &id);
                if types.is_empty() {
                    None
                } else {
                    Some(types.to_vec())
                }
            }
        }
    }

    fn object_issues(
        &self,
        ctx: &DocumentContext,
        node: &JsonNode,
        props: &[(PropertyName, JsonNode)],
        key: Option<&str>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        let valid_types = match self.valid_type_names(ctx, key) {
            Some(v) => v,
            None => return issues,
        };

        let effective = match props.iter().find(|(p, _)| p.name == "@type") {
            Some((_, type_node)) => {
                match self.explicit_type(key, type_node, &valid_types, &mut issues) {
                    Some(t) => t,
                    None => return issues,
                }
            }
            None if valid_types.len() == 1 => valid_types[0].clone(),
            None => {
                issues.push(Issue::new(node.start, node.end, "missing @type"));
                return issues;
            }
        };

        let required = self.resolver.required_properties(&effective);
        let lenient_context = matches!(key, Some(k) if k == INLINE_INTERFACE_KEY);

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|r| !(lenient_context && *r == "@context"))
            .filter(|r| !props.iter().any(|(p, _)| p.name == *r))
            .collect();
        if !missing.is_empty() {
            issues.push(Issue::new(
                node.start,
                node.end,
                format!("missing required properties: {}", missing.join(", ")),
            ));
        }

        // A required property authored as an empty array is still missing.
        for (p, v) in props {
            if required.contains(&p.name.as_str()) {
                if let JsonValue::Array(items) = &v.value {
                    if items.is_empty() {
                        issues.push(Issue::new(
                            v.start,
                            v.end,
                            format!("required property '{}' must not be empty", p.name),
                        ));
                    }
                }
            }
        }

        let type_id = self.resolver.id_from_type(ctx, &effective);
        let typed = self.resolver.typed_properties_from_id(ctx, &type_id);
        for (p, _) in props {
            let name = p.name.as_str();
            if name == "@type" || name == "@id" {
                continue;
            }
            if typed.iter().any(|tp| tp.label == name) || required.contains(&name) {
                continue;
            }
            issues.push(Issue::new(
                p.start,
                p.end,
                format!("unexpected property '{}'", name),
            ));
        }

        for (p, v) in props {
            if p.name == "@type" {
                continue;
            }
            issues.extend(self.value_issues(ctx, v, Some(child_key(key, &p.name))));
        }

        issues
    }

    /// Resolve an explicit `@type` value against the types valid at this
    /// position. Returns the effective type name, or `None` when the value
    /// is unusable (issues already recorded).
    fn explicit_type(
        &self,
        key: Option<&str>,
        type_node: &JsonNode,
        valid: &[String],
        issues: &mut Vec<Issue>,
    ) -> Option<String> {
        match &type_node.value {
            JsonValue::String(t) => {
                if valid.iter().any(|v| v == t) {
                    Some(t.clone())
                } else {
                    issues.push(Issue::new(
                        type_node.start,
                        type_node.end,
                        format!("invalid type '{}'; valid types: {}", t, valid.join(", ")),
                    ));
                    None
                }
            }
            JsonValue::Array(elems) => {
                // In `contents`, extra array entries are co-types and only
                // membership in the content-type set is arbitrated; anywhere
                // else every entry must be valid on its own.
                let in_contents = key == Some("contents");
                let mut seen: HashSet<&str> = HashSet::new();
                let mut matching: Vec<String> = Vec::new();
                let mut failed = false;

                for elem in elems {
                    let Some(t) = elem.as_str() else {
                        issues.push(Issue::new(
                            elem.start,
                            elem.end,
                            "@type entries must be strings",
                        ));
                        failed = true;
                        continue;
                    };
                    if !seen.insert(t) {
                        issues.push(Issue::new(
                            elem.start,
                            elem.end,
                            format!("duplicate type '{}'", t),
                        ));
                        failed = true;
                        continue;
                    }
                    if valid.iter().any(|v| v == t) {
                        matching.push(t.to_string());
                    } else if !in_contents {
                        issues.push(Issue::new(
                            elem.start,
                            elem.end,
                            format!("invalid type '{}'; valid types: {}", t, valid.join(", ")),
                        ));
                        failed = true;
                    }
                }

                if in_contents && matching.len() > 1 {
                    issues.push(Issue::new(
                        type_node.start,
                        type_node.end,
                        format!(
                            "conflicting types: {}; exactly one content type is allowed",
                            matching.join(", ")
                        ),
                    ));
                    return None;
                }
                if in_contents && matching.is_empty() {
                    issues.push(Issue::new(
                        type_node.start,
                        type_node.end,
                        format!("missing content type; valid types: {}", valid.join(", ")),
                    ));
                    return None;
                }
                if failed {
                    return None;
                }
                matching.into_iter().next()
            }
            _ => {
                issues.push(Issue::new(
                    type_node.start,
                    type_node.end,
                    "@type must be a string or an array of strings",
                ));
                None
            }
        }
    }

    fn array_issues(&self, ctx: &DocumentContext, items: &[JsonNode], key: Option<&str>) -> Vec<Issue> {
        let mut issues = Vec::new();

        // Sibling objects must carry distinct names; each repeat after the
        // first occurrence is flagged at the repeated name's span.
        let mut seen: HashSet<&str> = HashSet::new();
        for item in items {
            if let Some(name_node) = item.property("name") {
                if let Some(name) = name_node.as_str() {
                    if !seen.insert(name) {
                        issues.push(Issue::new(
                            name_node.start,
                            name_node.end,
                            format!("duplicate name '{}'", name),
                        ));
                    }
                }
            }
        }

        for item in items {
            issues.extend(self.value_issues(ctx, item, key));
        }

        issues
    }

    fn string_issues(
        &self,
        ctx: &DocumentContext,
        node: &JsonNode,
        s: &str,
        key: Option<&str>,
    ) -> Vec<Issue> {
        let Some(key) = key else {
            return Vec::new();
        };

        if key == "@context" {
            let allowed = self.kind.allowed_context_uris();
            if allowed.iter().any(|u| u.eq_ignore_ascii_case(s)) {
                return Vec::new();
            }
            return vec![Issue::new(
                node.start,
                node.end,
                format!("invalid @context; valid values: {}", allowed.join(", ")),
            )];
        }
        if key == "@id" {
            return self.string_rule_issues(node, s, "@id");
        }
        if key == INLINE_INTERFACE_KEY {
            // A string here references an external interface by id.
            return self.string_rule_issues(node, s, "schema");
        }

        let Some(id) = self.resolver.id_from_short_name(ctx, key) else {
            return Vec::new();
        };
        let values = self.resolver.string_values_from_id(ctx, &id);
        if values.is_empty() {
            return Vec::new();
        }
        // A legal set of exactly the string primitive means "any string":
        // lexical rules apply instead of set membership. A larger set that
        // happens to contain `string` is an enumeration of schema names.
        if values.len() == 1 && values[0] == prim::STRING {
            return self.string_rule_issues(node, s, key);
        }
        if !values.iter().any(|v| v == s) {
            return vec![Issue::new(
                node.start,
                node.end,
                format!("invalid value '{}'; valid values: {}", s, values.join(", ")),
            )];
        }
        Vec::new()
    }

    fn string_rule_issues(&self, node: &JsonNode, s: &str, key: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some(pattern) = rules::value_pattern(key) {
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(s) {
                    issues.push(Issue::new(
                        node.start,
                        node.end,
                        format!("value '{}' does not match pattern '{}'", s, pattern),
                    ));
                }
            }
        }
        if let Some((min, max)) = rules::length_range(key) {
            let len = s.chars().count();
            if len < min || len > max {
                issues.push(Issue::new(
                    node.start,
                    node.end,
                    format!("length {} is outside the allowed range {}..={}", len, min, max),
                ));
            }
        }

        issues
    }

    // =========================================================================
    // Type pass
    // =========================================================================

    fn type_issues(&self, ctx: &DocumentContext, node: &JsonNode, key: Option<&str>) -> Vec<Issue> {
        match &node.value {
            JsonValue::Object(props) => {
                let mut issues = Vec::new();
                for (p, v) in props {
                    if p.name == "@type" {
                        continue;
                    }
                    issues.extend(self.type_issues(ctx, v, Some(child_key(key, &p.name))));
                }
                issues
            }
            JsonValue::Array(items) => items
                .iter()
                .flat_map(|item| self.type_issues(ctx, item, key))
                .collect(),
            JsonValue::Number { raw, value } => self.number_issues(ctx, node, raw, *value, key),
            _ => Vec::new(),
        }
    }

    fn number_issues(
        &self,
        ctx: &DocumentContext,
        node: &JsonNode,
        raw: &str,
        value: f64,
        key: Option<&str>,
    ) -> Vec<Issue> {
        let Some(key) = key else {
            return Vec::new();
        };
        let Some(id) = self.resolver.id_from_short_name(ctx, key) else {
            return Vec::new();
        };
        let value_types = self.resolver.value_types_from_id(&id);
        if value_types.is_empty() {
            return Vec::new();
        }
        // Kind mismatches are not reported in this pass: JSON-LD compaction
        // may flatten a single-element array to its value, so the authored
        // kind can legally differ from the declared one. Only integrality
        // is enforced.
        if value_types.iter().any(|t| prim::is_floating_point(t)) {
            return Vec::new();
        }
        if value.fract() != 0.0 {
            return vec![Issue::new(
                node.start,
                node.end,
                format!("non-integral value {}; expected {}", raw, value_types.join(", ")),
            )];
        }
        Vec::new()
    }
}

/// Contextual key for a child property, renaming `implements.schema` to
/// the inline-interface sentinel.
fn child_key<'a>(parent_key: Option<&str>, property_name: &'a str) -> &'a str {
    if parent_key == Some("implements") && property_name == "schema" {
        INLINE_INTERFACE_KEY
    } else {
        property_name
    }
}

/// Convert a parsed node back to a `serde_json` value (used to hand the
/// document's `@context` member to the context parser).
fn to_serde_value(node: &JsonNode) -> SerdeValue {
    match &node.value {
        JsonValue::Object(props) => SerdeValue::Object(
            props
                .iter()
                .map(|(p, v)| (p.name.clone(), to_serde_value(v)))
                .collect(),
        ),
        JsonValue::Array(items) => SerdeValue::Array(items.iter().map(to_serde_value).collect()),
        JsonValue::String(s) => SerdeValue::String(s.clone()),
        JsonValue::Number { value, .. } => serde_json::Number::from_f64(*value)
            .map(SerdeValue::Number)
            .unwrap_or(SerdeValue::Null),
        JsonValue::Bool(b) => SerdeValue::Bool(*b),
        JsonValue::Null => SerdeValue::Null,
    }
}
