//! Registrar provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "enom")]
mod enom;

#[cfg(feature = "enom")]
pub use enom::{EnomEnvironment, EnomProvider, EnomProviderBuilder};
