//! In-process graph client that records every call.

use crate::config::{DatabaseRef, DatabaseSpec};
use crate::error::{ClientError, ErrorCategory};
use crate::{ExecutionReport, GraphClient};
use parking_lot::Mutex;
use schemaseed_woql::Query;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub db: DatabaseRef,
    pub query: Query,
}

#[derive(Debug, Default)]
struct State {
    databases: BTreeMap<DatabaseRef, DatabaseSpec>,
    executed: Vec<ExecutedQuery>,
    execute_calls: usize,
    failures: HashMap<usize, ClientError>,
    hide_existing: bool,
}

/// Test double for [`GraphClient`].
///
/// Execute calls are numbered from zero; [`MemoryGraphClient::fail_execute_at`]
/// makes the call with that number return the given error instead of
/// recording the query.
#[derive(Debug, Default)]
pub struct MemoryGraphClient {
    state: Mutex<State>,
}

impl MemoryGraphClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `spec` already present on the "server".
    pub fn with_database(self, spec: DatabaseSpec) -> Self {
        self.state.lock().databases.insert(spec.db.clone(), spec);
        self
    }

    /// Report existing databases as missing, so a create races into
    /// `DatabaseAlreadyExists`.
    pub fn hide_existing_databases(self) -> Self {
        self.state.lock().hide_existing = true;
        self
    }

    pub fn fail_execute_at(self, call: usize, error: ClientError) -> Self {
        self.state.lock().failures.insert(call, error);
        self
    }

    pub fn databases(&self) -> Vec<DatabaseSpec> {
        self.state.lock().databases.values().cloned().collect()
    }

    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.state.lock().executed.clone()
    }

    /// Total quads written across all executed queries.
    pub fn quads_written(&self) -> usize {
        self.state
            .lock()
            .executed
            .iter()
            .map(|e| e.query.write_count())
            .sum()
    }
}

impl GraphClient for MemoryGraphClient {
    fn database_exists(&self, db: &DatabaseRef) -> Result<bool, ClientError> {
        let state = self.state.lock();
        Ok(!state.hide_existing && state.databases.contains_key(db))
    }

    fn create_database(&self, spec: &DatabaseSpec) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        if state.databases.contains_key(&spec.db) {
            return Err(ClientError::api(
                ErrorCategory::DatabaseAlreadyExists,
                400,
                format!("Database already exists: {}", spec.db.path()),
            ));
        }
        state.databases.insert(spec.db.clone(), spec.clone());
        Ok(())
    }

    fn execute(&self, db: &DatabaseRef, query: &Query) -> Result<ExecutionReport, ClientError> {
        let mut state = self.state.lock();
        let call = state.execute_calls;
        state.execute_calls += 1;
        if let Some(err) = state.failures.remove(&call) {
            return Err(err);
        }
        if !state.databases.contains_key(db) {
            return Err(ClientError::api(
                ErrorCategory::DatabaseNotFound,
                404,
                format!("Unknown database: {}", db.path()),
            ));
        }
        let inserts = query.write_count() as u64;
        state.executed.push(ExecutedQuery {
            db: db.clone(),
            query: query.clone(),
        });
        Ok(ExecutionReport {
            inserts,
            ..ExecutionReport::default()
        })
    }
}
