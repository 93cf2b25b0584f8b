//! Schemaseed query objects
//!
//! Declarative queries submitted to the graph server:
//!
//! - [`term`]: nodes, variables, literals, primitive value kinds
//! - [`query`]: the composable [`Query`] tree and its JSON document encoding
//! - [`class`]: fluent class/property declarations lowered to schema quads
//!
//! Nothing here performs I/O; executing a query is the client's job.

pub mod class;
pub mod query;
pub mod term;

pub use class::{ClassBuilder, PropertyBuilder, PropertyRange};
pub use query::{NamedQuery, Query};
pub use term::{Graph, Literal, LiteralTag, PrimitiveKind, Term};
