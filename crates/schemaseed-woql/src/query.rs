//! Composable query expressions.
//!
//! A [`Query`] is a tree: leaves write quads or bind variables, inner nodes
//! conjoin (`And`) or guard (`When`) sub-queries. Builders never flatten
//! nested conjunctions, so a group of operations built together stays one
//! sub-tree in the encoded document.

use crate::term::{Graph, Term, RDFS_LABEL, RDF_TYPE};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    True,
    And(Vec<Query>),
    When {
        condition: Box<Query>,
        consequent: Box<Query>,
    },
    AddQuad {
        subject: Term,
        predicate: String,
        object: Term,
        graph: Graph,
    },
    /// Deterministic id generation: `output` is bound to a node id derived
    /// from `base` and the key terms.
    IdGen {
        base: String,
        key: Vec<Term>,
        output: Term,
    },
    Cast {
        value: Term,
        target_type: String,
        output: Term,
    },
}

impl Query {
    pub fn and(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::And(queries.into_iter().collect())
    }

    pub fn when(condition: Query, consequent: Query) -> Self {
        Query::When {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
        }
    }

    pub fn add_quad(
        subject: impl Into<Term>,
        predicate: impl Into<String>,
        object: impl Into<Term>,
        graph: Graph,
    ) -> Self {
        Query::AddQuad {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph,
        }
    }

    /// Quad in the schema graph; the most common write when seeding a schema.
    pub fn schema_quad(
        subject: impl Into<Term>,
        predicate: impl Into<String>,
        object: impl Into<Term>,
    ) -> Self {
        Query::add_quad(subject, predicate, object, Graph::Schema)
    }

    pub fn idgen(base: impl Into<String>, key: Vec<Term>, output: Term) -> Self {
        Query::IdGen {
            base: base.into(),
            key,
            output,
        }
    }

    pub fn cast(value: Term, target_type: impl Into<String>, output: Term) -> Self {
        Query::Cast {
            value,
            target_type: target_type.into(),
            output,
        }
    }

    /// Instance insertion: `rdf:type` plus an optional label triple.
    pub fn insert(id: Term, class: impl Into<String>, label: Option<Term>) -> Self {
        let mut parts = vec![Query::add_quad(
            id.clone(),
            RDF_TYPE,
            Term::node(class.into()),
            Graph::Instance,
        )];
        if let Some(label) = label {
            parts.push(Query::add_quad(id, RDFS_LABEL, label, Graph::Instance));
        }
        Query::And(parts)
    }

    /// Number of quad writes in the tree.
    pub fn write_count(&self) -> usize {
        match self {
            Query::True | Query::IdGen { .. } | Query::Cast { .. } => 0,
            Query::AddQuad { .. } => 1,
            Query::And(parts) => parts.iter().map(Query::write_count).sum(),
            Query::When {
                condition,
                consequent,
            } => condition.write_count() + consequent.write_count(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Query::True => json!({ "@type": "True" }),
            Query::And(parts) => json!({
                "@type": "And",
                "and": parts.iter().map(Query::to_json).collect::<Vec<_>>(),
            }),
            Query::When {
                condition,
                consequent,
            } => json!({
                "@type": "When",
                "query": condition.to_json(),
                "consequent": consequent.to_json(),
            }),
            Query::AddQuad {
                subject,
                predicate,
                object,
                graph,
            } => json!({
                "@type": "AddQuad",
                "subject": subject.to_json(),
                "predicate": Term::node(predicate.clone()).to_json(),
                "object": object.to_json(),
                "graph": graph.as_str(),
            }),
            Query::IdGen { base, key, output } => json!({
                "@type": "IdGen",
                "base": Term::node(base.clone()).to_json(),
                "key": key.iter().map(Term::to_json).collect::<Vec<_>>(),
                "uri": output.to_json(),
            }),
            Query::Cast {
                value,
                target_type,
                output,
            } => json!({
                "@type": "Cast",
                "value": value.to_json(),
                "type": Term::node(target_type.clone()).to_json(),
                "result": output.to_json(),
            }),
        }
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

/// A query ready for submission, tagged with the name used in logs and
/// error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    pub name: String,
    pub query: Query,
}

impl NamedQuery {
    pub fn new(name: impl Into<String>, query: Query) -> Self {
        Self {
            name: name.into(),
            query,
        }
    }
}
