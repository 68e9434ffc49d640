//! Network profiles for the coinaddr address codecs
//!
//! This crate provides the per-chain prefix bytes and human-readable prefixes
//! that select how addresses and private keys are encoded, plus a registry
//! for looking profiles up by name and loading custom ones from JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod network;
pub mod registry;

pub use network::Network;
pub use registry::NetworkRegistry;

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Profile failed validation
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// A profile with the same name is already registered
    #[error("Duplicate network: {0}")]
    DuplicateNetwork(String),

    /// No profile registered under the given name
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed profile document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
