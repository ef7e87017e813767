//! Memoized queries over the metamodel graph
//!
//! [`ModelResolver`] answers the questions validation asks of the
//! metamodel: which properties a concept admits, which `@type` values are
//! legal at a position, what a property's value type is, and which literal
//! string values a concept accepts.
//!
//! All queries are best-effort: an unresolvable short name, type, or id
//! yields `None` or an empty result, never an error. Callers treat empty
//! results as "no constraint" and skip the corresponding check.
//!
//! Results that require traversal are deduplicated, sorted, and cached by
//! fully qualified id, so resolution is order-independent and repeated
//! queries return the same `Arc`-backed slice. The graph is immutable for
//! the resolver's lifetime and caches are never invalidated. A resolver
//! instance serves a single document context; caches are keyed by id alone.

use dtdl_context::DocumentContext;
use dtdl_graph::MetamodelGraph;
use dtdl_vocab::{lang, model, prim, rdf, rdfs};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{debug, warn};

/// A resolved property descriptor: authored name, requiredness, and the
/// canonical primitive value type (empty when unresolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedProperty {
    /// Authored short name
    pub label: String,
    /// Whether the property is required on its containing type
    pub required: bool,
    /// Canonical primitive type name, `array`, or empty if unresolved
    pub value_type: String,
}

/// Memoizing resolver over one metamodel graph.
///
/// Caches use `RefCell` interior mutability: the engine is single-threaded
/// and synchronous, and a resolver is only ever touched by its calling
/// thread.
pub struct ModelResolver<'g> {
    graph: &'g MetamodelGraph,
    properties: RefCell<FxHashMap<String, Arc<[String]>>>,
    types: RefCell<FxHashMap<String, Arc<[String]>>>,
    string_values: RefCell<FxHashMap<String, Arc<[String]>>>,
    typed_properties: RefCell<FxHashMap<String, Arc<[TypedProperty]>>>,
    name_by_id: RefCell<FxHashMap<String, String>>,
}

impl<'g> ModelResolver<'g> {
    /// Create a resolver over a loaded graph.
    pub fn new(graph: &'g MetamodelGraph) -> Self {
        Self {
            graph,
            properties: RefCell::new(FxHashMap::default()),
            types: RefCell::new(FxHashMap::default()),
            string_values: RefCell::new(FxHashMap::default()),
            typed_properties: RefCell::new(FxHashMap::default()),
            name_by_id: RefCell::new(FxHashMap::default()),
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'g MetamodelGraph {
        self.graph
    }

    /// Resolve a short name to its fully qualified id via the context.
    pub fn id_from_short_name(&self, ctx: &DocumentContext, short_name: &str) -> Option<String> {
        ctx.id_of(short_name)
    }

    /// Resolve a type name to its fully qualified id.
    ///
    /// A type name with no context mapping falls back to the name itself
    /// as the label, so unknown types still resolve to `vocab + name`.
    pub fn id_from_type(&self, ctx: &DocumentContext, type_name: &str) -> String {
        match ctx.id_of(type_name) {
            Some(id) => id,
            None => {
                warn!(
                    type_name = %type_name,
                    "type has no context mapping; using the name itself as label"
                );
                format!("{}{}", ctx.vocab(), type_name)
            }
        }
    }

    /// Reverse lookup: the short name for a fully qualified id.
    ///
    /// Context terms win; XSD datatype IRIs fall back to their canonical
    /// primitive names; anything else falls back to the id itself (lossy).
    pub fn property_name_from_id(&self, ctx: &DocumentContext, id: &str) -> String {
        if let Some(hit) = self.name_by_id.borrow().get(id) {
            return hit.clone();
        }
        let name = match ctx.short_name_of(id) {
            Some(short) => short.to_string(),
            None => match prim::primitive_name_of(id) {
                Some(primitive) => primitive.to_string(),
                None => {
                    warn!(id = %id, "no context term resolves to id; using id as name");
                    id.to_string()
                }
            },
        };
        self.name_by_id
            .borrow_mut()
            .insert(id.to_string(), name.clone());
        name
    }

    /// Property short names a concept admits.
    ///
    /// Language-container ids short-circuit to the fixed language-code
    /// list. Otherwise the result unions the concept's own domain-declared
    /// properties with those of its superclasses, transitively.
    pub fn properties_from_id(&self, ctx: &DocumentContext, id: &str) -> Arc<[String]> {
        if let Some(hit) = self.properties.borrow().get(id) {
            return Arc::clone(hit);
        }

        let result: Arc<[String]> = if ctx.is_language_container(id) {
            lang::LANGUAGE_CODES.iter().map(|c| c.to_string()).collect()
        } else {
            let mut out = Vec::new();
            let mut visited = FxHashSet::default();
            self.collect_properties(ctx, id, &mut visited, &mut out);
            out.sort_unstable();
            out.dedup();
            out.into()
        };

        self.properties
            .borrow_mut()
            .insert(id.to_string(), Arc::clone(&result));
        result
    }

    fn collect_properties(
        &self,
        ctx: &DocumentContext,
        id: &str,
        visited: &mut FxHashSet<String>,
        out: &mut Vec<String>,
    ) {
        if !visited.insert(id.to_string()) {
            return;
        }
        for edge in self.graph.incoming(id, rdfs::DOMAIN) {
            out.push(self.property_name_from_id(ctx, &edge.source.id));
        }
        for edge in self.graph.outgoing(id, rdfs::SUB_CLASS_OF) {
            self.collect_properties(ctx, &edge.target.id, visited, out);
        }
    }

    /// Type short names legal at a position whose property id is `id`.
    ///
    /// Unions the declared range targets with everything that is a
    /// subclass of them, transitively; concepts with no matching edges
    /// contribute their own short name.
    pub fn types_from_id(&self, ctx: &DocumentContext, id: &str) -> Arc<[String]> {
        if let Some(hit) = self.types.borrow().get(id) {
            return Arc::clone(hit);
        }

        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_types(ctx, id, &mut visited, &mut out);
        out.sort_unstable();
        out.dedup();
        let result: Arc<[String]> = out.into();

        self.types
            .borrow_mut()
            .insert(id.to_string(), Arc::clone(&result));
        result
    }

    fn collect_types(
        &self,
        ctx: &DocumentContext,
        id: &str,
        visited: &mut FxHashSet<String>,
        out: &mut Vec<String>,
    ) {
        if !visited.insert(id.to_string()) {
            return;
        }
        let mut matched = false;
        for edge in self.graph.outgoing(id, rdfs::RANGE) {
            matched = true;
            self.collect_types(ctx, &edge.target.id, visited, out);
        }
        for edge in self.graph.incoming(id, rdfs::SUB_CLASS_OF) {
            matched = true;
            self.collect_types(ctx, &edge.source.id, visited, out);
        }
        if !matched {
            out.push(self.property_name_from_id(ctx, id));
        }
    }

    /// Typed property descriptors for a concept.
    ///
    /// Array-valued properties are typed `array`; everything else takes
    /// its first resolved primitive value type (empty when unresolved).
    /// Requiredness comes from the static per-type table keyed by the
    /// concept's short name. Language-container ids emit one optional
    /// string-typed descriptor per language code.
    pub fn typed_properties_from_id(
        &self,
        ctx: &DocumentContext,
        id: &str,
    ) -> Arc<[TypedProperty]> {
        if let Some(hit) = self.typed_properties.borrow().get(id) {
            return Arc::clone(hit);
        }

        let result: Arc<[TypedProperty]> = if ctx.is_language_container(id) {
            lang::LANGUAGE_CODES
                .iter()
                .map(|code| TypedProperty {
                    label: code.to_string(),
                    required: false,
                    value_type: prim::STRING.to_string(),
                })
                .collect()
        } else {
            let type_name = self.property_name_from_id(ctx, id);
            let required = model::required_properties(&type_name);
            self.properties_from_id(ctx, id)
                .iter()
                .map(|name| {
                    let value_type = if model::is_array_valued(name) {
                        prim::ARRAY.to_string()
                    } else {
                        self.id_from_short_name(ctx, name)
                            .and_then(|pid| self.value_types_from_id(&pid).into_iter().next())
                            .unwrap_or_default()
                    };
                    TypedProperty {
                        label: name.clone(),
                        required: required.contains(&name.as_str()),
                        value_type,
                    }
                })
                .collect()
        };

        self.typed_properties
            .borrow_mut()
            .insert(id.to_string(), Arc::clone(&result));
        result
    }

    /// Canonical primitive value types declared for a property id.
    ///
    /// Range targets outside the coercible XSD set are dropped.
    pub fn value_types_from_id(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        for edge in self.graph.outgoing(id, rdfs::RANGE) {
            match prim::primitive_name_of(&edge.target.id) {
                Some(primitive) => out.push(primitive.to_string()),
                None => {
                    debug!(range_target = %edge.target.id, "dropping unrecognized range value type");
                }
            }
        }
        out
    }

    /// Legal literal string values for a concept.
    ///
    /// Unions range targets, subclasses, and typed instances, transitively.
    /// A concept with no values that also has a domain edge pointing at it
    /// is an object container and stays empty; a concept with no values and
    /// no such edge falls back to its own short name (scalar primitive
    /// leaves resolve to themselves).
    pub fn string_values_from_id(&self, ctx: &DocumentContext, id: &str) -> Arc<[String]> {
        if let Some(hit) = self.string_values.borrow().get(id) {
            return Arc::clone(hit);
        }

        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_string_values(ctx, id, &mut visited, &mut out, true);

        if out.is_empty() && !self.graph.has_incoming(id, rdfs::DOMAIN) {
            out.push(self.property_name_from_id(ctx, id));
        }

        out.sort_unstable();
        out.dedup();
        let result: Arc<[String]> = out.into();

        self.string_values
            .borrow_mut()
            .insert(id.to_string(), Arc::clone(&result));
        result
    }

    fn collect_string_values(
        &self,
        ctx: &DocumentContext,
        id: &str,
        visited: &mut FxHashSet<String>,
        out: &mut Vec<String>,
        is_root: bool,
    ) {
        if !visited.insert(id.to_string()) {
            return;
        }
        let mut matched = false;
        for edge in self.graph.outgoing(id, rdfs::RANGE) {
            matched = true;
            self.collect_string_values(ctx, &edge.target.id, visited, out, false);
        }
        for edge in self.graph.incoming(id, rdfs::SUB_CLASS_OF) {
            matched = true;
            self.collect_string_values(ctx, &edge.source.id, visited, out, false);
        }
        for edge in self.graph.incoming(id, rdf::TYPE) {
            matched = true;
            self.collect_string_values(ctx, &edge.source.id, visited, out, false);
        }
        if !matched && !is_root {
            out.push(self.property_name_from_id(ctx, id));
        }
    }

    /// Required property names for a type, from the static table.
    pub fn required_properties(&self, type_name: &str) -> &'static [&'static str] {
        model::required_properties(type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtdl_graph::GraphEdge;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const VOCAB: &str = "http://azureiot.com/v1/classes/";
    const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    fn qualified(suffix: &str) -> String {
        format!("{VOCAB}{suffix}")
    }

    fn test_context() -> DocumentContext {
        DocumentContext::parse(&json!({
            "@vocab": VOCAB,
            "Interface": "Interface",
            "Content": "Content",
            "Telemetry": "Telemetry",
            "Property": "Property",
            "Schema": "Schema",
            "Enum": "Enum",
            "boolean": "boolean",
            "string": "string",
            "int": "int",
            "double": "double",
            "contents": "contents",
            "name": "name",
            "schema": "schema",
            "unit": "unit",
            "writable": "writable",
            "index": "index",
            "displayName": {"@id": "displayName", "@container": "@language"}
        }))
        .unwrap()
    }

    /// Small interface-shaped metamodel:
    ///
    /// - `contents` and `displayName` have domain `Interface`
    /// - `name`, `schema` have domain `Content`; `unit` has domain `Telemetry`
    /// - `Telemetry` and `Property` are subclasses of `Content`
    /// - `schema` ranges over `Schema`; `Enum` is a subclass of `Schema`,
    ///   primitives are typed instances of `Schema`
    /// - `name`/`unit` range over xsd:string, `writable` over xsd:boolean,
    ///   `index` over xsd:int
    fn test_graph() -> MetamodelGraph {
        MetamodelGraph::new(
            vec![],
            vec![
                GraphEdge::new(qualified("contents"), rdfs::DOMAIN, qualified("Interface")),
                GraphEdge::new(
                    qualified("displayName"),
                    rdfs::DOMAIN,
                    qualified("Interface"),
                ),
                GraphEdge::new(qualified("name"), rdfs::DOMAIN, qualified("Content")),
                GraphEdge::new(qualified("schema"), rdfs::DOMAIN, qualified("Content")),
                GraphEdge::new(qualified("unit"), rdfs::DOMAIN, qualified("Telemetry")),
                GraphEdge::new(qualified("Telemetry"), rdfs::SUB_CLASS_OF, qualified("Content")),
                GraphEdge::new(qualified("Property"), rdfs::SUB_CLASS_OF, qualified("Content")),
                GraphEdge::new(qualified("contents"), rdfs::RANGE, qualified("Content")),
                GraphEdge::new(qualified("schema"), rdfs::RANGE, qualified("Schema")),
                GraphEdge::new(qualified("Enum"), rdfs::SUB_CLASS_OF, qualified("Schema")),
                GraphEdge::new(qualified("boolean"), rdf::TYPE, qualified("Schema")),
                GraphEdge::new(qualified("string"), rdf::TYPE, qualified("Schema")),
                GraphEdge::new(qualified("int"), rdf::TYPE, qualified("Schema")),
                GraphEdge::new(qualified("double"), rdf::TYPE, qualified("Schema")),
                GraphEdge::new(qualified("name"), rdfs::RANGE, XSD_STRING),
                GraphEdge::new(qualified("unit"), rdfs::RANGE, XSD_STRING),
                GraphEdge::new(qualified("writable"), rdfs::RANGE, XSD_BOOLEAN),
                GraphEdge::new(qualified("index"), rdfs::RANGE, XSD_INT),
            ],
        )
    }

    #[test]
    fn test_id_from_short_name() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        assert_eq!(
            resolver.id_from_short_name(&ctx, "schema").as_deref(),
            Some("http://azureiot.com/v1/classes/schema")
        );
        assert_eq!(resolver.id_from_short_name(&ctx, "nope"), None);
    }

    #[test]
    fn test_id_from_type_falls_back_to_name() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        assert_eq!(resolver.id_from_type(&ctx, "Telemetry"), qualified("Telemetry"));
        // Unknown type names still resolve, using the name as label.
        assert_eq!(resolver.id_from_type(&ctx, "Widget"), qualified("Widget"));
    }

    #[test]
    fn test_property_name_from_id() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        assert_eq!(resolver.property_name_from_id(&ctx, &qualified("schema")), "schema");
        // XSD datatypes normalize to canonical primitive names.
        assert_eq!(resolver.property_name_from_id(&ctx, XSD_STRING), "string");
        // Anything else is lossy: the id comes back unchanged.
        assert_eq!(
            resolver.property_name_from_id(&ctx, "http://elsewhere.org/x"),
            "http://elsewhere.org/x"
        );
    }

    #[test]
    fn test_properties_include_superclass_transitively() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        let content: Vec<_> = resolver
            .properties_from_id(&ctx, &qualified("Content"))
            .to_vec();
        assert_eq!(content, vec!["name", "schema"]);

        let telemetry: Vec<_> = resolver
            .properties_from_id(&ctx, &qualified("Telemetry"))
            .to_vec();
        assert_eq!(telemetry, vec!["name", "schema", "unit"]);

        // Telemetry ⊇ Content
        for p in &content {
            assert!(telemetry.contains(p));
        }
    }

    #[test]
    fn test_properties_cached_by_reference() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        let first = resolver.properties_from_id(&ctx, &qualified("Telemetry"));
        let second = resolver.properties_from_id(&ctx, &qualified("Telemetry"));
        assert!(Arc::ptr_eq(&first, &second));

        let types_first = resolver.types_from_id(&ctx, &qualified("schema"));
        let types_second = resolver.types_from_id(&ctx, &qualified("schema"));
        assert!(Arc::ptr_eq(&types_first, &types_second));
    }

    #[test]
    fn test_language_container_shortcut() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        let codes = resolver.properties_from_id(&ctx, &qualified("displayName"));
        assert_eq!(codes.len(), lang::LANGUAGE_CODES.len());
        assert_eq!(codes.first().map(String::as_str), Some("af"));

        let typed = resolver.typed_properties_from_id(&ctx, &qualified("displayName"));
        assert_eq!(typed.len(), lang::LANGUAGE_CODES.len());
        assert!(typed
            .iter()
            .all(|p| !p.required && p.value_type == prim::STRING));
    }

    #[test]
    fn test_types_from_schema_position() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        // schema --range--> Schema <--subClassOf-- Enum
        let types: Vec<_> = resolver.types_from_id(&ctx, &qualified("schema")).to_vec();
        assert_eq!(types, vec!["Enum"]);

        // contents --range--> Content, subclassed by Telemetry and Property
        let content_types: Vec<_> = resolver
            .types_from_id(&ctx, &qualified("contents"))
            .to_vec();
        assert_eq!(content_types, vec!["Property", "Telemetry"]);
    }

    #[test]
    fn test_types_fallback_to_own_name() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        // `unit` ranges over xsd:string, a leaf: its canonical name comes back.
        let types: Vec<_> = resolver.types_from_id(&ctx, &qualified("unit")).to_vec();
        assert_eq!(types, vec!["string"]);
    }

    #[test]
    fn test_typed_properties() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        let typed = resolver.typed_properties_from_id(&ctx, &qualified("Interface"));
        let contents = typed.iter().find(|p| p.label == "contents").unwrap();
        assert_eq!(contents.value_type, prim::ARRAY);

        let telemetry = resolver.typed_properties_from_id(&ctx, &qualified("Telemetry"));
        let name = telemetry.iter().find(|p| p.label == "name").unwrap();
        assert!(name.required);
        assert_eq!(name.value_type, prim::STRING);
        let unit = telemetry.iter().find(|p| p.label == "unit").unwrap();
        assert!(!unit.required);
    }

    #[test]
    fn test_value_types() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);

        assert_eq!(resolver.value_types_from_id(&qualified("writable")), vec!["boolean"]);
        assert_eq!(resolver.value_types_from_id(&qualified("index")), vec!["int"]);
        // Range targets outside the coercible set are dropped.
        assert!(resolver.value_types_from_id(&qualified("schema")).is_empty());
        assert!(resolver.value_types_from_id(&qualified("missing")).is_empty());
    }

    #[test]
    fn test_string_values_enumerated() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        let values: Vec<_> = resolver
            .string_values_from_id(&ctx, &qualified("schema"))
            .to_vec();
        assert_eq!(values, vec!["Enum", "boolean", "double", "int", "string"]);
    }

    #[test]
    fn test_string_values_object_suppression() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        // Interface has domain edges pointing at it and no enumerable
        // values: it is an object container, not a scalar.
        let values = resolver.string_values_from_id(&ctx, &qualified("Interface"));
        assert!(values.is_empty());
    }

    #[test]
    fn test_string_values_scalar_leaf_fallback() {
        let graph = test_graph();
        let resolver = ModelResolver::new(&graph);
        let ctx = test_context();

        // `name` ranges over xsd:string; the legal-value set is the
        // string-primitive marker alone.
        let values: Vec<_> = resolver
            .string_values_from_id(&ctx, &qualified("name"))
            .to_vec();
        assert_eq!(values, vec![prim::STRING]);
    }

    #[test]
    fn test_cycle_safety() {
        // A subClassOf cycle must terminate, not recurse forever.
        let graph = MetamodelGraph::new(
            vec![],
            vec![
                GraphEdge::new(qualified("A"), rdfs::SUB_CLASS_OF, qualified("B")),
                GraphEdge::new(qualified("B"), rdfs::SUB_CLASS_OF, qualified("A")),
                GraphEdge::new(qualified("p"), rdfs::DOMAIN, qualified("A")),
            ],
        );
        let resolver = ModelResolver::new(&graph);
        let ctx = DocumentContext::parse(&json!({"@vocab": VOCAB, "p": "p"})).unwrap();

        let props: Vec<_> = resolver.properties_from_id(&ctx, &qualified("B")).to_vec();
        assert_eq!(props, vec!["p"]);
    }
}
