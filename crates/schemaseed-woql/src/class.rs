//! Class and property declarations.
//!
//! [`ClassBuilder`] is the fluent way to declare a schema class; it lowers to a
//! flat conjunction of schema-graph quads. Document classes additionally
//! subclass the server's root document type so their instances are
//! addressable as documents.

use crate::query::Query;
use crate::term::{
    PrimitiveKind, Term, DOCUMENT_CLASS, OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY,
    RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL, RDFS_RANGE, RDFS_SUBCLASS_OF, RDF_TYPE,
};

/// Language tag attached to labels and descriptions.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyRange {
    Primitive(PrimitiveKind),
    Class(String),
}

impl PropertyRange {
    /// Primitive names (`string`, `dateTime`, `xsd:integer`, ...) become
    /// datatype ranges; anything else is taken as a class id.
    pub fn parse(s: &str) -> Self {
        match PrimitiveKind::parse(s) {
            Some(kind) => PropertyRange::Primitive(kind),
            None => PropertyRange::Class(s.trim().to_string()),
        }
    }

    fn property_type(&self) -> &'static str {
        match self {
            PropertyRange::Primitive(_) => OWL_DATATYPE_PROPERTY,
            PropertyRange::Class(_) => OWL_OBJECT_PROPERTY,
        }
    }

    fn range_node(&self) -> &str {
        match self {
            PropertyRange::Primitive(kind) => kind.xsd_type(),
            PropertyRange::Class(id) => id,
        }
    }
}

impl From<&str> for PropertyRange {
    fn from(value: &str) -> Self {
        PropertyRange::parse(value)
    }
}

impl From<PrimitiveKind> for PropertyRange {
    fn from(value: PrimitiveKind) -> Self {
        PropertyRange::Primitive(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBuilder {
    pub name: String,
    pub range: PropertyRange,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl PropertyBuilder {
    pub fn new(name: impl Into<String>, range: impl Into<PropertyRange>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
            label: None,
            description: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn lower_into(&self, domain: &str, out: &mut Vec<Query>) {
        let name = self.name.as_str();
        out.push(Query::schema_quad(
            Term::node(name),
            RDF_TYPE,
            Term::node(self.range.property_type()),
        ));
        out.push(Query::schema_quad(
            Term::node(name),
            RDFS_RANGE,
            Term::node(self.range.range_node()),
        ));
        out.push(Query::schema_quad(Term::node(name), RDFS_DOMAIN, Term::node(domain)));
        push_annotations(name, self.label.as_deref(), self.description.as_deref(), out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBuilder {
    pub id: String,
    pub document: bool,
    pub label: Option<String>,
    pub description: Option<String>,
    pub parents: Vec<String>,
    pub properties: Vec<PropertyBuilder>,
}

impl ClassBuilder {
    /// A document class (instances are top-level documents).
    pub fn document(id: impl Into<String>) -> Self {
        Self::new(id, true)
    }

    /// A plain class.
    pub fn class(id: impl Into<String>) -> Self {
        Self::new(id, false)
    }

    fn new(id: impl Into<String>, document: bool) -> Self {
        Self {
            id: id.into(),
            document,
            label: None,
            description: None,
            parents: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label_opt(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn description_opt(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    pub fn to_query(&self) -> Query {
        let id = self.id.as_str();
        let mut out = vec![Query::schema_quad(Term::node(id), RDF_TYPE, Term::node(OWL_CLASS))];
        if self.document {
            out.push(Query::schema_quad(
                Term::node(id),
                RDFS_SUBCLASS_OF,
                Term::node(DOCUMENT_CLASS),
            ));
        }
        push_annotations(id, self.label.as_deref(), self.description.as_deref(), &mut out);
        for parent in &self.parents {
            out.push(Query::schema_quad(
                Term::node(id),
                RDFS_SUBCLASS_OF,
                Term::node(parent.as_str()),
            ));
        }
        for property in &self.properties {
            property.lower_into(id, &mut out);
        }
        Query::And(out)
    }
}

impl From<ClassBuilder> for Query {
    fn from(value: ClassBuilder) -> Self {
        value.to_query()
    }
}

fn push_annotations(
    subject: &str,
    label: Option<&str>,
    description: Option<&str>,
    out: &mut Vec<Query>,
) {
    if let Some(label) = label {
        out.push(Query::schema_quad(
            Term::node(subject),
            RDFS_LABEL,
            Term::lang(label, DEFAULT_LANGUAGE),
        ));
    }
    if let Some(description) = description {
        out.push(Query::schema_quad(
            Term::node(subject),
            RDFS_COMMENT,
            Term::lang(description, DEFAULT_LANGUAGE),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quads(q: &Query) -> Vec<(String, String, String)> {
        let Query::And(parts) = q else {
            panic!("class lowers to And");
        };
        parts
            .iter()
            .map(|p| match p {
                Query::AddQuad {
                    subject,
                    predicate,
                    object,
                    ..
                } => (subject.to_string(), predicate.clone(), object.to_string()),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn document_class_with_parent_and_datatype_property() {
        let q = ClassBuilder::document("Country")
            .label("Country")
            .description("A nation state")
            .parent("EphemeralEntity")
            .property(PropertyBuilder::new("iso_code", "string").label("ISO Code"))
            .to_query();
        let quads = quads(&q);

        let has = |s: &str, p: &str, o: &str| {
            quads
                .iter()
                .any(|(qs, qp, qo)| qs == s && qp == p && qo == o)
        };
        assert!(has("Country", RDF_TYPE, OWL_CLASS));
        assert!(has("Country", RDFS_SUBCLASS_OF, DOCUMENT_CLASS));
        assert!(has("Country", RDFS_SUBCLASS_OF, "EphemeralEntity"));
        assert!(has("Country", RDFS_LABEL, "\"Country\"@en"));
        assert!(has("iso_code", RDF_TYPE, OWL_DATATYPE_PROPERTY));
        assert!(has("iso_code", RDFS_RANGE, "xsd:string"));
        assert!(has("iso_code", RDFS_DOMAIN, "Country"));
        assert!(has("iso_code", RDFS_LABEL, "\"ISO Code\"@en"));
    }

    #[test]
    fn class_ranged_property_is_object_property() {
        let q = ClassBuilder::class("Airline")
            .property(PropertyBuilder::new("registered_in", "Country"))
            .to_query();
        let quads = quads(&q);
        assert!(quads.contains(&(
            "registered_in".to_string(),
            RDF_TYPE.to_string(),
            OWL_OBJECT_PROPERTY.to_string()
        )));
        assert!(!quads
            .iter()
            .any(|(_, _, o)| o == DOCUMENT_CLASS));
    }

    #[test]
    fn bare_class_has_no_annotations() {
        let q = ClassBuilder::document("worksForDomain").to_query();
        assert_eq!(q.write_count(), 2);
    }
}
