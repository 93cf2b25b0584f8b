//! Query terms: nodes, variables, literals, and the closed set of primitive
//! value types the target schema understands.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_LABEL: &str = "rdfs:label";
pub const RDFS_COMMENT: &str = "rdfs:comment";
pub const RDFS_SUBCLASS_OF: &str = "rdfs:subClassOf";
pub const RDFS_DOMAIN: &str = "rdfs:domain";
pub const RDFS_RANGE: &str = "rdfs:range";
pub const OWL_CLASS: &str = "owl:Class";
pub const OWL_OBJECT_PROPERTY: &str = "owl:ObjectProperty";
pub const OWL_DATATYPE_PROPERTY: &str = "owl:DatatypeProperty";
pub const DOCUMENT_CLASS: &str = "terminus:Document";

/// Prefix marking a string as a query variable (`v:ID_0`).
pub const VARIABLE_PREFIX: &str = "v:";

/// Scalar value kinds natively supported by the target schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    String,
    #[serde(rename = "dateTime")]
    DateTime,
    Integer,
    Decimal,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::String,
        PrimitiveKind::DateTime,
        PrimitiveKind::Integer,
        PrimitiveKind::Decimal,
    ];

    /// Prefixed XSD datatype, e.g. `xsd:dateTime`.
    pub fn xsd_type(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "xsd:boolean",
            PrimitiveKind::String => "xsd:string",
            PrimitiveKind::DateTime => "xsd:dateTime",
            PrimitiveKind::Integer => "xsd:integer",
            PrimitiveKind::Decimal => "xsd:decimal",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::String => "string",
            PrimitiveKind::DateTime => "dateTime",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Decimal => "decimal",
        }
    }

    /// Accepts the bare names (`dateTime`, `string`, ...) and their `xsd:`
    /// prefixed forms. Matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bare = s.strip_prefix("xsd:").unwrap_or(s);
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(bare))
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target graph of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Graph {
    Schema,
    Instance,
}

impl Graph {
    pub fn as_str(self) -> &'static str {
        match self {
            Graph::Schema => "schema",
            Graph::Instance => "instance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralTag {
    Datatype(String),
    Language(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub tag: LiteralTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Node(String),
    Variable(String),
    Literal(Literal),
}

impl Term {
    pub fn node(iri: impl Into<String>) -> Self {
        Term::Node(iri.into())
    }

    /// Variable term. A leading `v:` is stripped so `var("v:ID_0")` and
    /// `var("ID_0")` name the same variable.
    pub fn var(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        Term::Variable(name.strip_prefix(VARIABLE_PREFIX).unwrap_or(name).to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::typed(value, PrimitiveKind::String.xsd_type())
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            tag: LiteralTag::Datatype(datatype.into()),
        })
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            tag: LiteralTag::Language(language.into()),
        })
    }

    /// Interpret a bare string the way query builders usually do: `v:`
    /// prefixed strings are variables, everything else is a node id.
    pub fn from_ref(s: &str) -> Self {
        if s.starts_with(VARIABLE_PREFIX) {
            Term::var(s)
        } else {
            Term::node(s)
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Term::Node(iri) => json!({ "@type": "NodeValue", "node": iri }),
            Term::Variable(name) => json!({ "@type": "Variable", "variable": name }),
            Term::Literal(lit) => match &lit.tag {
                LiteralTag::Datatype(dt) => json!({
                    "@type": "Value",
                    "data": { "@value": lit.value, "@type": dt }
                }),
                LiteralTag::Language(lang) => json!({
                    "@type": "Value",
                    "data": { "@value": lit.value, "@language": lang }
                }),
            },
        }
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::from_ref(value)
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::from_ref(&value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Node(iri) => write!(f, "{iri}"),
            Term::Variable(name) => write!(f, "{VARIABLE_PREFIX}{name}"),
            Term::Literal(lit) => match &lit.tag {
                LiteralTag::Datatype(dt) => write!(f, "{:?}^^{dt}", lit.value),
                LiteralTag::Language(lang) => write!(f, "{:?}@{lang}", lit.value),
            },
        }
    }
}
