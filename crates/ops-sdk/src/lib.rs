//! Client SDK for ops running next to the ops daemon.
//!
//! State and config live in JSON files on local disk. Presentation, secrets
//! and telemetry are forwarded to the daemon over HTTP. Every call is a
//! single blocking round trip.

// Key-value file persistence
pub mod store;
pub use store::KeyValueStore;

// HTTP requests to the daemon
pub mod client;
pub use client::DaemonClient;

// State, config, secrets and telemetry
pub mod sdk;
pub use sdk::Sdk;

// Print, spinner and progress bar
pub mod ux;
pub use ux::Ux;

pub use ops_sdk_common::{ErrorCode, Result, SdkConfig, SdkError};

#[cfg(test)]
pub(crate) mod testing;
