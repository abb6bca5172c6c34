//! MEGA API client and types.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiErrorCode;
pub use transport::{DeleteBatch, NodeEntry, NodeTransport};
