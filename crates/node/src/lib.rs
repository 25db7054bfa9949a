//! Permit workflow node
//!
//! Resolves per-item parameters into PDP calls and runs them in input order.

pub mod attributes;
pub mod description;
pub mod error;
pub mod executor;
pub mod operation;
pub mod params;
pub mod template;

pub use description::NodeDescription;
pub use error::{NodeError, NodeOperationError};
pub use executor::{NodeItem, NodeOutput, PairedItem, PermitNode};
pub use operation::Operation;
pub use params::{NodeParameters, OperationCall};
