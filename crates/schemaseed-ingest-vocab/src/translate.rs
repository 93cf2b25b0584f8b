//! Row → operation translation.
//!
//! Every function here is pure and total: malformed or missing optional
//! fields yield fewer operations, never an error. Class references are
//! filtered against the [`TypeIdentifierSet`] at construction, so no emitted
//! operation names an unknown class.

use crate::primitive::PrimitiveTypeMap;
use crate::rows::{IdentifierList, PropertyRow, TypeIdentifierSet, TypeRow};
use schemaseed_woql::PrimitiveKind;
use serde::Serialize;

/// A property is declared only if it carries at least this many operations
/// (its declaration plus some domain or range information).
pub const MIN_PROPERTY_OPERATIONS: usize = 3;

/// Scalar-valued property attached to a class that wraps a primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueProperty {
    pub name: String,
    pub primitive: PrimitiveKind,
}

/// One schema-mutation instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    DefineClass {
        id: String,
        label: Option<String>,
        description: Option<String>,
        value_property: Option<ValueProperty>,
    },
    DefineSubclassOf {
        child: String,
        parent: String,
    },
    /// Declares an object-type relation.
    DefineProperty {
        id: String,
        label: Option<String>,
        description: Option<String>,
    },
    DefineDomainConstraint {
        property: String,
        class: String,
    },
    DefineRangeConstraint {
        property: String,
        class: String,
    },
}

impl Operation {
    pub fn subclass_of(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Operation::DefineSubclassOf {
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// Bare class declaration (no label, description or value property).
    pub fn class(id: impl Into<String>) -> Self {
        Operation::DefineClass {
            id: id.into(),
            label: None,
            description: None,
            value_property: None,
        }
    }

    pub fn domain(property: impl Into<String>, class: impl Into<String>) -> Self {
        Operation::DefineDomainConstraint {
            property: property.into(),
            class: class.into(),
        }
    }

    pub fn range(property: impl Into<String>, class: impl Into<String>) -> Self {
        Operation::DefineRangeConstraint {
            property: property.into(),
            class: class.into(),
        }
    }
}

/// Subclass facts collapsing leaf scalar types onto the text and datetime
/// roots. Roots are never linked to themselves.
pub fn build_primitive_subclass_facts(map: &PrimitiveTypeMap) -> Vec<Operation> {
    let mut out = Vec::new();
    for (key, kind) in map.iter() {
        match kind {
            PrimitiveKind::String if key != map.text_root() => {
                out.push(Operation::subclass_of(key, map.text_root()));
            }
            PrimitiveKind::DateTime if key != map.datetime_root() => {
                out.push(Operation::subclass_of(key, map.datetime_root()));
            }
            _ => {}
        }
    }
    out
}

/// The class declaration for a type row. Scalar types get a synthetic
/// `<id>Value` property of their primitive kind.
pub fn build_class_definition(row: &TypeRow, map: &PrimitiveTypeMap) -> Operation {
    let value_property = map.get(&row.id).map(|primitive| ValueProperty {
        name: format!("{}Value", row.id),
        primitive,
    });
    Operation::DefineClass {
        id: row.id.clone(),
        label: row.label.clone(),
        description: row.description.clone(),
        value_property,
    }
}

/// Subclass links from the row's `subTypes` (children) and `subTypeOf`
/// (parents). Children come first.
pub fn build_hierarchy_links(row: &TypeRow, known: &TypeIdentifierSet) -> Vec<Operation> {
    let mut out = Vec::new();
    for child in known_ids(&row.sub_types, known, &row.id) {
        out.push(Operation::subclass_of(child, row.id.as_str()));
    }
    for parent in known_ids(&row.sub_type_of, known, &row.id) {
        out.push(Operation::subclass_of(row.id.as_str(), parent));
    }
    out
}

/// Placeholder classes for multi-class domain/range unions.
pub fn build_property_domain_range_shims(row: &PropertyRow) -> Vec<Operation> {
    let mut out = Vec::new();
    if row.domain_includes.is_union() {
        out.push(Operation::class(row.domain_placeholder()));
    }
    if row.range_includes.is_union() {
        out.push(Operation::class(row.range_placeholder()));
    }
    out
}

/// The property declaration with its domain and range constraints, or
/// nothing when the row carries no usable domain/range information.
pub fn build_property_definition(row: &PropertyRow, known: &TypeIdentifierSet) -> Vec<Operation> {
    let mut out = vec![Operation::DefineProperty {
        id: row.id.clone(),
        label: row.label.clone(),
        description: row.description.clone(),
    }];

    if let Some(class) = constraint_class(
        &row.domain_includes,
        row.domain_placeholder(),
        known,
        &row.id,
        &mut out,
    ) {
        out.push(Operation::domain(row.id.as_str(), class));
    }
    if let Some(class) = constraint_class(
        &row.range_includes,
        row.range_placeholder(),
        known,
        &row.id,
        &mut out,
    ) {
        out.push(Operation::range(row.id.as_str(), class));
    }

    if out.len() < MIN_PROPERTY_OPERATIONS {
        tracing::trace!(property = %row.id, "no usable domain/range; property skipped");
        return Vec::new();
    }
    out
}

/// Resolves the class a domain/range constraint should point at. For a union
/// this pushes the member subclass links onto `out` and returns the
/// placeholder; for a single known class it returns that class.
fn constraint_class(
    ids: &IdentifierList,
    placeholder: String,
    known: &TypeIdentifierSet,
    owner: &str,
    out: &mut Vec<Operation>,
) -> Option<String> {
    if ids.is_union() {
        for member in known_ids(ids, known, owner) {
            out.push(Operation::subclass_of(member, placeholder.as_str()));
        }
        return Some(placeholder);
    }
    let only = ids.single()?;
    if known.contains(only) {
        Some(only.to_string())
    } else {
        tracing::trace!(owner, id = only, "dropping unknown identifier");
        None
    }
}

fn known_ids<'a>(
    ids: &'a IdentifierList,
    known: &'a TypeIdentifierSet,
    owner: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    ids.iter().filter(move |id| {
        let keep = known.contains(id);
        if !keep {
            tracing::trace!(owner, id = *id, "dropping unknown identifier");
        }
        keep
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(ids: &[&str]) -> TypeIdentifierSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn country_links_to_known_parent() {
        let row = TypeRow::new("Country")
            .with_label("Country")
            .with_sub_type_of("EphemeralEntity");
        let known = known(&["Country", "EphemeralEntity"]);
        let map = PrimitiveTypeMap::schema_org();

        let mut ops = vec![build_class_definition(&row, &map)];
        ops.extend(build_hierarchy_links(&row, &known));

        assert_eq!(
            ops,
            vec![
                Operation::DefineClass {
                    id: "Country".into(),
                    label: Some("Country".into()),
                    description: None,
                    value_property: None,
                },
                Operation::subclass_of("Country", "EphemeralEntity"),
            ]
        );
    }

    #[test]
    fn hierarchy_drops_unknown_ids_and_orders_children_first() {
        let row = TypeRow::new("B")
            .with_sub_types("C, Missing")
            .with_sub_type_of("A,Ghost");
        let ops = build_hierarchy_links(&row, &known(&["A", "B", "C"]));
        assert_eq!(
            ops,
            vec![Operation::subclass_of("C", "B"), Operation::subclass_of("B", "A")]
        );
    }

    #[test]
    fn scalar_type_gets_value_property() {
        let map = PrimitiveTypeMap::schema_org();
        let row = TypeRow::new("http://schema.org/Date").with_label("Date");
        let Operation::DefineClass { value_property, .. } = build_class_definition(&row, &map)
        else {
            panic!("expected DefineClass");
        };
        assert_eq!(
            value_property,
            Some(ValueProperty {
                name: "http://schema.org/DateValue".into(),
                primitive: PrimitiveKind::DateTime,
            })
        );
    }

    #[test]
    fn operations_serialize_tagged_by_kind() {
        let map = PrimitiveTypeMap::schema_org();
        let row = TypeRow::new("http://schema.org/Date").with_label("Date");
        let json = serde_json::to_value(build_class_definition(&row, &map)).unwrap();
        assert_eq!(json["op"], "define_class");
        assert_eq!(json["label"], "Date");
        assert_eq!(json["value_property"]["primitive"], "dateTime");

        let json = serde_json::to_value(Operation::range("knows", "Person")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "op": "define_range_constraint",
                "property": "knows",
                "class": "Person"
            })
        );
    }

    #[test]
    fn primitive_facts_skip_roots_and_non_text_kinds() {
        let ops = build_primitive_subclass_facts(&PrimitiveTypeMap::schema_org());
        let s = |local: &str| format!("http://schema.org/{local}");
        assert_eq!(
            ops,
            vec![
                Operation::subclass_of(s("Text"), s("Thing")),
                Operation::subclass_of(s("Date"), s("DateTime")),
                Operation::subclass_of(s("URL"), s("Thing")),
                Operation::subclass_of(s("XPathType"), s("Thing")),
            ]
        );
    }

    #[test]
    fn works_for_uses_domain_placeholder_and_direct_range() {
        let row = PropertyRow::new("worksFor")
            .with_domain("Person, Organization")
            .with_range("Organization");
        let known = known(&["Person", "Organization"]);

        assert_eq!(
            build_property_domain_range_shims(&row),
            vec![Operation::class("worksForDomain")]
        );
        assert_eq!(
            build_property_definition(&row, &known),
            vec![
                Operation::DefineProperty {
                    id: "worksFor".into(),
                    label: None,
                    description: None,
                },
                Operation::subclass_of("Person", "worksForDomain"),
                Operation::subclass_of("Organization", "worksForDomain"),
                Operation::domain("worksFor", "worksForDomain"),
                Operation::range("worksFor", "Organization"),
            ]
        );
    }

    #[test]
    fn lonely_property_is_discarded() {
        let row = PropertyRow::new("lonely");
        assert!(build_property_domain_range_shims(&row).is_empty());
        assert!(build_property_definition(&row, &known(&["Person"])).is_empty());
    }

    #[test]
    fn single_unknown_domain_alone_is_below_threshold() {
        let row = PropertyRow::new("p").with_domain("Ghost").with_range("Ghost");
        assert!(build_property_definition(&row, &known(&["Person"])).is_empty());
    }

    #[test]
    fn union_of_unknowns_still_points_at_placeholder() {
        let row = PropertyRow::new("p")
            .with_domain("Ghost, Phantom")
            .with_range("Person");
        let ops = build_property_definition(&row, &known(&["Person"]));
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], Operation::domain("p", "pDomain"));
        assert_eq!(ops[2], Operation::range("p", "Person"));
    }
}
