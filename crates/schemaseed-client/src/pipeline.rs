//! Import orchestration: make sure the target database exists, then run the
//! batches in order, stopping at the first failure.

use crate::config::{DatabaseRef, DatabaseSpec};
use crate::error::ClientError;
use crate::{ExecutionReport, GraphClient};
use schemaseed_woql::{NamedQuery, Query};
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExisted,
}

pub fn ensure_database<C: GraphClient + ?Sized>(
    client: &C,
    spec: &DatabaseSpec,
) -> Result<EnsureOutcome, ClientError> {
    if client.database_exists(&spec.db)? {
        tracing::debug!(db = %spec.db.path(), "database already present");
        return Ok(EnsureOutcome::AlreadyExisted);
    }
    match client.create_database(spec) {
        Ok(()) => Ok(EnsureOutcome::Created),
        Err(err) if err.is_already_exists() => {
            tracing::warn!(
                db = %spec.db.path(),
                error = %err,
                "database already exists; reusing it"
            );
            Ok(EnsureOutcome::AlreadyExisted)
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub name: String,
    pub report: ExecutionReport,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub executed: Vec<BatchOutcome>,
    /// Batches with nothing to write; never sent.
    pub skipped: Vec<String>,
}

impl RunReport {
    pub fn inserts(&self) -> u64 {
        self.executed.iter().map(|b| b.report.inserts).sum()
    }
}

pub fn execute_batches<C: GraphClient + ?Sized>(
    client: &C,
    db: &DatabaseRef,
    batches: &[NamedQuery],
) -> Result<RunReport, ClientError> {
    let mut run = RunReport::default();
    for batch in batches {
        if is_empty_batch(&batch.query) {
            tracing::debug!(batch = %batch.name, "skipping empty batch");
            run.skipped.push(batch.name.clone());
            continue;
        }
        tracing::debug!(
            batch = %batch.name,
            writes = batch.query.write_count(),
            "executing batch"
        );
        let report = client
            .execute(db, &batch.query)
            .map_err(|source| ClientError::Batch {
                batch: batch.name.clone(),
                source: Box::new(source),
            })?;
        run.executed.push(BatchOutcome {
            name: batch.name.clone(),
            report,
        });
    }
    Ok(run)
}

fn is_empty_batch(query: &Query) -> bool {
    matches!(query, Query::And(parts) if parts.is_empty())
}
