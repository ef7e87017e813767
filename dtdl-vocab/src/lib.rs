//! Vocabulary Constants for the DTDL Metamodel
//!
//! This crate provides a centralized location for the fixed vocabulary used
//! across the DTDL toolchain: RDF edge-label IRIs, XSD datatype IRIs, the
//! allowed `@context` URIs per document kind, the required-properties table,
//! the array-valued property allow-list, string validation rules, and the
//! language-region code list used for localizable string maps.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `prim` - canonical primitive type names used in resolved descriptors
//! - `contexts` - allowed `@context` URIs per document kind
//! - `model` - required-properties table and array-valued property list
//! - `rules` - per-property string pattern and length rules
//! - `lang` - IETF language-region codes for localizable string maps
//!
//! These values are part of the compatibility contract with the existing
//! DTDL schema corpus and must be reproduced verbatim.

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

/// Canonical primitive type names used in resolved property descriptors.
///
/// These are the short names a resolved `TypedProperty` carries, and the
/// names the diagnostics engine matches against when deciding between
/// set-membership and pattern checks.
pub mod prim {
    /// Canonical name for string-typed values; doubles as the
    /// string-primitive marker in legal-value sets.
    pub const STRING: &str = "string";

    /// Canonical name for 32-bit integer values
    pub const INT: &str = "int";

    /// Canonical name for 64-bit integer values
    pub const LONG: &str = "long";

    /// Canonical name for single-precision values
    pub const FLOAT: &str = "float";

    /// Canonical name for double-precision values
    pub const DOUBLE: &str = "double";

    /// Canonical name for boolean values
    pub const BOOLEAN: &str = "boolean";

    /// Canonical name for array-valued properties
    pub const ARRAY: &str = "array";

    /// Map an XSD datatype IRI to its canonical primitive name.
    ///
    /// Returns `None` for IRIs outside the coercible set; callers drop
    /// (and log) unrecognized values rather than failing.
    #[inline]
    pub fn primitive_name_of(datatype_iri: &str) -> Option<&'static str> {
        match datatype_iri {
            super::xsd::BOOLEAN => Some(BOOLEAN),
            super::xsd::INT => Some(INT),
            super::xsd::LONG => Some(LONG),
            super::xsd::FLOAT => Some(FLOAT),
            super::xsd::DOUBLE => Some(DOUBLE),
            super::xsd::STRING => Some(STRING),
            _ => None,
        }
    }

    /// Check whether a canonical primitive name denotes a floating-point type.
    #[inline]
    pub fn is_floating_point(name: &str) -> bool {
        name == FLOAT || name == DOUBLE
    }
}

/// Allowed `@context` URIs per document kind.
///
/// A document's `@context` string must match one of the two URIs allowed
/// for its kind (compared case-insensitively).
pub mod contexts {
    /// Interface document context URI
    pub const INTERFACE: &str = "http://azureiot.com/v1/contexts/Interface.json";

    /// Capability model document context URI
    pub const CAPABILITY_MODEL: &str = "http://azureiot.com/v1/contexts/CapabilityModel.json";

    /// Combined model context URI, accepted for both document kinds
    pub const IOT_MODEL: &str = "http://azureiot.com/v1/contexts/IoTModel.json";

    /// The two context URIs allowed in interface documents
    pub const INTERFACE_ALLOWED: &[&str] = &[INTERFACE, IOT_MODEL];

    /// The two context URIs allowed in capability model documents
    pub const CAPABILITY_MODEL_ALLOWED: &[&str] = &[CAPABILITY_MODEL, IOT_MODEL];
}

/// Structural knowledge about DTDL model types that is not derivable from
/// the metamodel graph.
pub mod model {
    /// Root type name of interface documents
    pub const INTERFACE: &str = "Interface";

    /// Root type name of capability model documents
    pub const CAPABILITY_MODEL: &str = "CapabilityModel";

    /// Properties that hold JSON arrays rather than single values.
    pub const ARRAY_VALUED_PROPERTIES: &[&str] =
        &["contents", "schemas", "fields", "enumValues", "implements"];

    /// Check whether a property name is array-valued.
    #[inline]
    pub fn is_array_valued(property_name: &str) -> bool {
        ARRAY_VALUED_PROPERTIES.contains(&property_name)
    }

    /// Required property names for a DTDL type, keyed by short type name.
    ///
    /// This table is intentionally static rather than derived from the
    /// metamodel graph: the graph does not encode cardinality, and the set
    /// of known types is closed. Unknown type names return an empty slice,
    /// which downstream validation treats as "no required properties
    /// enforced".
    pub fn required_properties(type_name: &str) -> &'static [&'static str] {
        match type_name {
            "Interface" | "CapabilityModel" => &["@id", "@type", "@context"],
            "Telemetry" | "Property" | "MapKey" | "MapValue" | "SchemaField"
            | "InterfaceInstance" => &["name", "schema"],
            "Command" | "EnumValue" => &["name"],
            "Array" => &["elementSchema"],
            "Enum" => &["enumValues"],
            "Map" => &["mapKey", "mapValue"],
            "Object" => &["fields"],
            _ => &[],
        }
    }
}

/// Per-property string validation rules.
///
/// Only a handful of authored properties carry lexical constraints; both
/// the patterns and the length bounds are fixed by the schema corpus.
pub mod rules {
    /// URN shape required of `@id` and string-valued `schema` references:
    /// `urn:` followed by colon-separated segments and a numeric version.
    pub const URN_PATTERN: &str = "^urn:([a-zA-Z0-9_]+:)+[a-zA-Z0-9_]+:[0-9]+$";

    /// Shape required of `name` values
    pub const NAME_PATTERN: &str = "^[a-zA-Z0-9_]+$";

    /// Pattern rule for a property name, if any.
    pub fn value_pattern(property_name: &str) -> Option<&'static str> {
        match property_name {
            "@id" | "schema" => Some(URN_PATTERN),
            "name" => Some(NAME_PATTERN),
            _ => None,
        }
    }

    /// Inclusive length bounds for a property name, if any.
    pub fn length_range(property_name: &str) -> Option<(usize, usize)> {
        match property_name {
            "@id" | "schema" => Some((0, 256)),
            _ => None,
        }
    }
}

/// Language-region codes for localizable string maps.
pub mod lang {
    /// The fixed list of IETF language-region codes accepted as keys of a
    /// localizable string map (a context term with `@container: @language`).
    pub const LANGUAGE_CODES: &[&str] = &[
        "af", "am", "ar-ae", "ar-bh", "ar-dz", "ar-eg", "ar-iq", "ar-jo", "ar-kw", "ar-lb",
        "ar-ly", "ar-ma", "ar-om", "ar-qa", "ar-sa", "ar-sy", "ar-tn", "ar-ye", "as", "az-az",
        "be", "bg", "bn", "bo", "bs", "ca", "cs", "cy", "da", "de-at",
        "de-ch", "de-de", "de-li", "de-lu", "dv", "el", "en-au", "en-bz", "en-ca", "en-gb",
        "en-ie", "en-in", "en-jm", "en-nz", "en-ph", "en-tt", "en-us", "en-za", "en-zw", "es-ar",
        "es-bo", "es-cl", "es-co", "es-cr", "es-do", "es-ec", "es-es", "es-gt", "es-hn", "es-mx",
        "es-ni", "es-pa", "es-pe", "es-pr", "es-py", "es-sv", "es-uy", "es-ve", "et", "eu",
        "fa", "fi", "fo", "fr-be", "fr-ca", "fr-ch", "fr-fr", "fr-lu", "gd", "gl",
        "gu", "he", "hi", "hr", "hu", "hy", "id", "is", "it-ch", "it-it",
        "ja", "kk", "km", "kn", "ko", "lo", "lt", "lv", "mk", "ml",
        "mn", "mr", "ms-bn", "ms-my", "mt", "my", "nb", "ne", "nl-be", "nl-nl",
        "nn", "or", "pa", "pl", "pt-br", "pt-pt", "ro", "ru", "sa", "sd",
        "si", "sk", "sl", "so", "sq", "sr-sp", "sv-fi", "sv-se", "sw", "ta",
        "te", "tg", "th", "tk", "tn", "tr", "tt", "uk", "ur", "uz-uz",
        "vi", "xh", "zh-cn", "zh-hk", "zh-mo", "zh-sg", "zh-tw", "zu",
    ];
}
