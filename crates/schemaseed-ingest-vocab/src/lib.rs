//! Vocabulary ingestion for Schemaseed.
//!
//! Turns a vocabulary published as two tables (one row per type, one row per
//! property, e.g. schema.org's `all-layers-types.csv` and
//! `all-layers-properties.csv`) into schema-definition batches:
//!
//! ```text
//!   types.csv ──┐                      ┌── type-classes
//!               ├─► rows ─► translate ─┼── primitive-subclasses
//!   props.csv ──┘                      ├── type-hierarchy
//!                                      ├── property-shims
//!                                      └── property-definitions ─► lower ─► queries
//! ```
//!
//! Translation is pure: references to unknown type ids are dropped, never
//! reported as errors. Only reading the tables can fail.

pub mod csv_rows;
pub mod lower;
pub mod plan;
pub mod primitive;
pub mod rows;
pub mod translate;

pub use csv_rows::{read_property_rows, read_type_rows, IngestError};
pub use lower::{lower_batch, lower_group, lower_operation, lower_plan};
pub use plan::{plan_vocabulary, Batch, BatchSummary, OperationGroup, VocabularyPlan};
pub use primitive::PrimitiveTypeMap;
pub use rows::{IdentifierList, PropertyRow, TypeIdentifierSet, TypeRow};
pub use translate::{Operation, ValueProperty};

use std::path::Path;

/// Read both tables and plan the import.
pub fn plan_vocabulary_files(
    types_path: &Path,
    properties_path: &Path,
    map: &PrimitiveTypeMap,
) -> Result<VocabularyPlan, IngestError> {
    let types = read_type_rows(types_path)?;
    let properties = read_property_rows(properties_path)?;
    tracing::info!(
        types = types.len(),
        properties = properties.len(),
        "loaded vocabulary tables"
    );
    Ok(plan_vocabulary(&types, &properties, map))
}
