//! `avatax-core`: building blocks shared by the AvaTax client crates.
//!
//! This crate contains **pure data** primitives (no HTTP, no IO): identifiers,
//! query options, and the fault model returned by the service.

pub mod error;
pub mod fault;
pub mod id;
pub mod options;

pub use error::{CoreError, CoreResult};
pub use fault::{ErrorDetail, ErrorInfo, ErrorResult};
pub use id::TransactionId;
pub use options::QueryOptions;
