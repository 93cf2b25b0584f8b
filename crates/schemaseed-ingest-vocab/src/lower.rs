//! Lowering operations to query objects.

use crate::plan::{Batch, VocabularyPlan};
use crate::translate::Operation;
use schemaseed_woql::term::{
    OWL_OBJECT_PROPERTY, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL, RDFS_RANGE, RDFS_SUBCLASS_OF,
    RDF_TYPE,
};
use schemaseed_woql::{ClassBuilder, NamedQuery, PropertyBuilder, Query, Term};

const LABEL_LANGUAGE: &str = schemaseed_woql::class::DEFAULT_LANGUAGE;

pub fn lower_operation(op: &Operation) -> Query {
    match op {
        Operation::DefineClass {
            id,
            label,
            description,
            value_property,
        } => {
            let mut class = ClassBuilder::document(id.as_str())
                .label_opt(label.clone())
                .description_opt(description.clone());
            if let Some(vp) = value_property {
                class = class.property(PropertyBuilder::new(vp.name.as_str(), vp.primitive));
            }
            class.to_query()
        }
        Operation::DefineSubclassOf { child, parent } => Query::schema_quad(
            Term::node(child.as_str()),
            RDFS_SUBCLASS_OF,
            Term::node(parent.as_str()),
        ),
        Operation::DefineProperty {
            id,
            label,
            description,
        } => {
            let decl = Query::schema_quad(
                Term::node(id.as_str()),
                RDF_TYPE,
                Term::node(OWL_OBJECT_PROPERTY),
            );
            if label.is_none() && description.is_none() {
                return decl;
            }
            let mut parts = vec![decl];
            if let Some(label) = label {
                parts.push(Query::schema_quad(
                    Term::node(id.as_str()),
                    RDFS_LABEL,
                    Term::lang(label.as_str(), LABEL_LANGUAGE),
                ));
            }
            if let Some(description) = description {
                parts.push(Query::schema_quad(
                    Term::node(id.as_str()),
                    RDFS_COMMENT,
                    Term::lang(description.as_str(), LABEL_LANGUAGE),
                ));
            }
            Query::And(parts)
        }
        Operation::DefineDomainConstraint { property, class } => Query::schema_quad(
            Term::node(property.as_str()),
            RDFS_DOMAIN,
            Term::node(class.as_str()),
        ),
        Operation::DefineRangeConstraint { property, class } => Query::schema_quad(
            Term::node(property.as_str()),
            RDFS_RANGE,
            Term::node(class.as_str()),
        ),
    }
}

/// A single operation lowers to its own query; several to a conjunction.
pub fn lower_group(group: &[Operation]) -> Option<Query> {
    match group {
        [] => None,
        [only] => Some(lower_operation(only)),
        many => Some(Query::and(many.iter().map(lower_operation))),
    }
}

/// Conjunction of the batch's groups, or `None` for an empty batch.
pub fn lower_batch(batch: &Batch) -> Option<NamedQuery> {
    let groups: Vec<Query> = batch.groups.iter().filter_map(|g| lower_group(g)).collect();
    if groups.is_empty() {
        return None;
    }
    Some(NamedQuery::new(batch.name.as_str(), Query::And(groups)))
}

/// Every non-empty batch, in plan order.
pub fn lower_plan(plan: &VocabularyPlan) -> Vec<NamedQuery> {
    plan.batches.iter().filter_map(lower_batch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::BATCH_TYPE_HIERARCHY;
    use crate::translate::ValueProperty;
    use schemaseed_woql::PrimitiveKind;

    #[test]
    fn subclass_lowers_to_schema_quad() {
        let q = lower_operation(&Operation::subclass_of("Person", "worksForDomain"));
        let v = q.to_json();
        assert_eq!(v["@type"], "AddQuad");
        assert_eq!(v["predicate"]["node"], RDFS_SUBCLASS_OF);
        assert_eq!(v["graph"], "schema");
    }

    #[test]
    fn class_with_value_property_declares_datatype_property() {
        let op = Operation::DefineClass {
            id: "http://schema.org/Boolean".into(),
            label: Some("Boolean".into()),
            description: None,
            value_property: Some(ValueProperty {
                name: "http://schema.org/BooleanValue".into(),
                primitive: PrimitiveKind::Boolean,
            }),
        };
        let q = lower_operation(&op);
        let text = q.to_json_string();
        assert!(text.contains("http://schema.org/BooleanValue"));
        assert!(text.contains("xsd:boolean"));
    }

    #[test]
    fn two_operation_group_is_and_of_two_quads() {
        let group = vec![
            Operation::subclass_of("C", "B"),
            Operation::subclass_of("B", "A"),
        ];
        let q = lower_group(&group).unwrap();
        let Query::And(parts) = &q else {
            panic!("expected And");
        };
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| matches!(p, Query::AddQuad { .. })));
    }

    #[test]
    fn empty_batch_is_skipped() {
        let batch = Batch::new(BATCH_TYPE_HIERARCHY);
        assert!(lower_batch(&batch).is_none());
    }

    #[test]
    fn bare_property_declaration_is_one_quad() {
        let q = lower_operation(&Operation::DefineProperty {
            id: "worksFor".into(),
            label: None,
            description: None,
        });
        assert_eq!(q.write_count(), 1);
    }
}
