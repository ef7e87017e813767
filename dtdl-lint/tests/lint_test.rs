//! Integration tests for capability model validation, including inline
//! interface bodies under `implements.schema`.

use dtdl_graph::{GraphEdge, MetamodelGraph};
use dtdl_lint::{DocumentKind, Linter};
use dtdl_resolver::ModelResolver;
use dtdl_vocab::{rdfs, xsd};
use pretty_assertions::assert_eq;

const VOCAB: &str = "http://azureiot.com/v1/classes/";

fn qualified(suffix: &str) -> String {
    format!("{VOCAB}{suffix}")
}

/// Capability-model-flavored metamodel: a CapabilityModel implements
/// InterfaceInstances, each naming an interface by reference or inline.
fn capability_model_graph() -> MetamodelGraph {
    MetamodelGraph::new(
        vec![],
        vec![
            GraphEdge::new(
                qualified("implements"),
                rdfs::DOMAIN,
                qualified("CapabilityModel"),
            ),
            GraphEdge::new(
                qualified("displayName"),
                rdfs::DOMAIN,
                qualified("CapabilityModel"),
            ),
            GraphEdge::new(
                qualified("implements"),
                rdfs::RANGE,
                qualified("InterfaceInstance"),
            ),
            GraphEdge::new(
                qualified("name"),
                rdfs::DOMAIN,
                qualified("InterfaceInstance"),
            ),
            GraphEdge::new(
                qualified("schema"),
                rdfs::DOMAIN,
                qualified("InterfaceInstance"),
            ),
            GraphEdge::new(qualified("name"), rdfs::RANGE, xsd::STRING),
            GraphEdge::new(qualified("contents"), rdfs::DOMAIN, qualified("Interface")),
        ],
    )
}

const CM_CONTEXT: &str = r##""@context": {
    "@vocab": "http://azureiot.com/v1/classes/",
    "CapabilityModel": "CapabilityModel",
    "InterfaceInstance": "InterfaceInstance",
    "Interface": "Interface",
    "implements": "implements",
    "contents": "contents",
    "name": "name",
    "schema": "schema",
    "displayName": {"@id": "displayName", "@container": "@language"}
}"##;

fn lint_cm(text: &str) -> Vec<dtdl_lint::Issue> {
    let graph = capability_model_graph();
    let resolver = ModelResolver::new(&graph);
    Linter::new(&resolver, DocumentKind::CapabilityModel).lint(text)
}

#[test]
fn test_capability_model_with_interface_reference() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{"name": "thermostat", "schema": "urn:contoso:thermostat:1"}}
            ]
        }}"##
    );
    assert_eq!(lint_cm(&doc), vec![]);
}

#[test]
fn test_inline_interface_may_omit_context() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{
                    "name": "thermostat",
                    "schema": {{
                        "@id": "urn:contoso:thermostat:1",
                        "@type": "Interface"
                    }}
                }}
            ]
        }}"##
    );
    // The inline interface body has no @context; that is allowed in this
    // position and produces no issue.
    assert_eq!(lint_cm(&doc), vec![]);
}

#[test]
fn test_inline_interface_still_checks_other_requireds() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{
                    "name": "thermostat",
                    "schema": {{"@type": "Interface"}}
                }}
            ]
        }}"##
    );
    let issues = lint_cm(&doc);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("missing required properties"));
    assert!(issues[0].message.contains("@id"));
    assert!(!issues[0].message.contains("@context"));
}

#[test]
fn test_interface_instance_type_is_inferred() {
    // No @type on the implements entry: the position admits only
    // InterfaceInstance, so requireds are still enforced.
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{"name": "thermostat"}}
            ]
        }}"##
    );
    let issues = lint_cm(&doc);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("missing required properties"));
    assert!(issues[0].message.contains("schema"));
}

#[test]
fn test_interface_reference_must_be_urn_shaped() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{"name": "thermostat", "schema": "./thermostat.interface.json"}}
            ]
        }}"##
    );
    let issues = lint_cm(&doc);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("does not match pattern"));
    assert!(issues[0].message.contains("urn:"));
}

#[test]
fn test_duplicate_implements_names() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{"name": "thermostat", "schema": "urn:contoso:thermostat:1"}},
                {{"name": "thermostat", "schema": "urn:contoso:thermostat:2"}}
            ]
        }}"##
    );
    let issues = lint_cm(&doc);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("duplicate name 'thermostat'"));
}

#[test]
fn test_missing_root_context_is_reported() {
    let graph = capability_model_graph();
    let resolver = ModelResolver::new(&graph);
    let linter = Linter::new(&resolver, DocumentKind::CapabilityModel);

    // No @context anywhere: the packaged default drives resolution, and
    // the root is missing a required property.
    let doc = r##"{
        "@id": "urn:contoso:truck:1",
        "@type": "CapabilityModel",
        "implements": [
            {"name": "thermostat", "schema": "urn:contoso:thermostat:1"}
        ]
    }"##;
    let issues = linter.lint(doc);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("missing required properties"));
    assert!(issues[0].message.contains("@context"));
}

#[test]
fn test_issues_are_positioned() {
    let doc = format!(
        r##"{{
            {CM_CONTEXT},
            "@id": "urn:contoso:truck:1",
            "@type": "CapabilityModel",
            "implements": [
                {{"name": "bad name!", "schema": "urn:contoso:thermostat:1"}}
            ]
        }}"##
    );
    let issues = lint_cm(&doc);
    assert_eq!(issues.len(), 1);
    assert_eq!(&doc[issues[0].start..issues[0].end], "\"bad name!\"");

    let (line, col) = dtdl_lint::offset_to_line_col(&doc, issues[0].start);
    assert!(line > 1);
    assert!(col > 1);
}
