//! `avatax-client`
//!
//! **Responsibility:** typed async bindings for the AvaTax REST v2
//! Transactions endpoints.
//!
//! The crate is split in two layers:
//! - [`Dispatcher`]: the shared transport (`get` / `post` of JSON). The
//!   default [`HttpDispatcher`] handles auth headers, query rendering, and
//!   error mapping over `reqwest`.
//! - [`AvaTaxClient`]: one method per endpoint. Each builds the URL path,
//!   hands body and options to the dispatcher, and decodes the typed result.
//!   Nothing is validated, retried, or cached at this layer.
//!
//! ```ignore
//! use avatax_client::{AvaTaxClient, ClientConfig};
//! use avatax_core::QueryOptions;
//!
//! let client = AvaTaxClient::new(ClientConfig::from_env()?)?;
//! let tx = client
//!     .get_transaction_by_code("DEFAULT", "INV-001", Some(&QueryOptions::new().include("Lines")))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod transactions;

pub use client::AvaTaxClient;
pub use config::{ClientConfig, Credentials, Environment};
pub use dispatcher::Dispatcher;
pub use error::{ApiError, ApiResult, ConfigError};
pub use http::HttpDispatcher;

/// Version reported in the `X-Avalara-Client` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
