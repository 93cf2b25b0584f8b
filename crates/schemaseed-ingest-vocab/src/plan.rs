//! Grouping translated operations into executor batches.
//!
//! A batch is submitted as one executor call. Inside a batch, each row's
//! operations form one [`OperationGroup`] so the executor treats them as a
//! unit.

use crate::primitive::PrimitiveTypeMap;
use crate::rows::{PropertyRow, TypeIdentifierSet, TypeRow};
use crate::translate::{
    build_class_definition, build_hierarchy_links, build_primitive_subclass_facts,
    build_property_definition, build_property_domain_range_shims, Operation,
};
use serde::Serialize;

pub const BATCH_TYPE_CLASSES: &str = "type-classes";
pub const BATCH_PRIMITIVE_SUBCLASSES: &str = "primitive-subclasses";
pub const BATCH_TYPE_HIERARCHY: &str = "type-hierarchy";
pub const BATCH_PROPERTY_SHIMS: &str = "property-shims";
pub const BATCH_PROPERTY_DEFINITIONS: &str = "property-definitions";

/// Operations emitted together for one row (or one fact).
pub type OperationGroup = Vec<Operation>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub name: String,
    pub groups: Vec<OperationGroup>,
}

impl Batch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Adds a group; empty groups are dropped.
    pub fn push_group(&mut self, group: OperationGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn operation_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.groups.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub name: String,
    pub groups: usize,
    pub operations: usize,
}

/// The full, ordered import plan for a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyPlan {
    pub batches: Vec<Batch>,
}

impl VocabularyPlan {
    pub fn batch(&self, name: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.name == name)
    }

    pub fn operation_count(&self) -> usize {
        self.batches.iter().map(Batch::operation_count).sum()
    }

    pub fn summary(&self) -> Vec<BatchSummary> {
        self.batches
            .iter()
            .map(|b| BatchSummary {
                name: b.name.clone(),
                groups: b.groups.len(),
                operations: b.operation_count(),
            })
            .collect()
    }
}

/// Translate both tables into the ordered batch plan:
/// type classes, primitive subclass facts, type hierarchy, property
/// placeholder classes, then property definitions.
pub fn plan_vocabulary(
    types: &[TypeRow],
    properties: &[PropertyRow],
    map: &PrimitiveTypeMap,
) -> VocabularyPlan {
    let known = TypeIdentifierSet::from_rows(types);

    let mut classes = Batch::new(BATCH_TYPE_CLASSES);
    for row in types {
        classes.push_group(vec![build_class_definition(row, map)]);
    }

    let mut primitives = Batch::new(BATCH_PRIMITIVE_SUBCLASSES);
    for op in build_primitive_subclass_facts(map) {
        primitives.push_group(vec![op]);
    }

    let mut hierarchy = Batch::new(BATCH_TYPE_HIERARCHY);
    for row in types {
        hierarchy.push_group(build_hierarchy_links(row, &known));
    }

    let mut shims = Batch::new(BATCH_PROPERTY_SHIMS);
    let mut definitions = Batch::new(BATCH_PROPERTY_DEFINITIONS);
    for row in properties {
        shims.push_group(build_property_domain_range_shims(row));
        definitions.push_group(build_property_definition(row, &known));
    }

    let plan = VocabularyPlan {
        batches: vec![classes, primitives, hierarchy, shims, definitions],
    };
    for b in &plan.batches {
        tracing::debug!(
            batch = %b.name,
            groups = b.groups.len(),
            operations = b.operation_count(),
            "planned batch"
        );
    }
    plan
}
