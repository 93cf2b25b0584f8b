//! Graph server access for Schemaseed.
//!
//! [`GraphClient`] is the seam between the import pipeline and a server:
//! [`HttpGraphClient`] talks to a live server over HTTP and
//! [`MemoryGraphClient`] records calls for tests and dry runs.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod pipeline;

pub use config::{DatabaseRef, DatabaseSpec, ServerConfig, ServerOverrides};
pub use error::{ClientError, ErrorCategory};
pub use http::HttpGraphClient;
pub use memory::MemoryGraphClient;
pub use pipeline::{ensure_database, execute_batches, BatchOutcome, EnsureOutcome, RunReport};

use schemaseed_woql::Query;
use serde::Deserialize;

/// What the server reported after running one query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecutionReport {
    #[serde(default)]
    pub bindings: Vec<serde_json::Value>,
    #[serde(default)]
    pub inserts: u64,
    #[serde(default)]
    pub deletes: u64,
}

pub trait GraphClient {
    fn database_exists(&self, db: &DatabaseRef) -> Result<bool, ClientError>;

    fn create_database(&self, spec: &DatabaseSpec) -> Result<(), ClientError>;

    fn execute(&self, db: &DatabaseRef, query: &Query) -> Result<ExecutionReport, ClientError>;
}

impl<C: GraphClient + ?Sized> GraphClient for &C {
    fn database_exists(&self, db: &DatabaseRef) -> Result<bool, ClientError> {
        (**self).database_exists(db)
    }

    fn create_database(&self, spec: &DatabaseSpec) -> Result<(), ClientError> {
        (**self).create_database(spec)
    }

    fn execute(&self, db: &DatabaseRef, query: &Query) -> Result<ExecutionReport, ClientError> {
        (**self).execute(db, query)
    }
}
