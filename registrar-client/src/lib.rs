//! # registrar-client
//!
//! Entry point for applications: wraps a [`registrar_provider::RegistrarProvider`],
//! normalizes every domain, host and TLD argument before delegating, and wraps
//! failures in [`ClientError`]. Provider failures are already logged by the
//! adapter; the client logs only the arguments it rejects itself.
//!
//! ```rust,no_run
//! use registrar_client::RegistrarClient;
//! use registrar_provider::ProviderCredentials;
//!
//! # async fn example() -> registrar_client::ClientResult<()> {
//! let client = RegistrarClient::from_credentials(ProviderCredentials::Enom {
//!     url: None,
//!     username: "reseller".to_string(),
//!     password: "secret".to_string(),
//! })?;
//! let available = client.is_available("Example.COM").await?;
//! # let _ = available;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;

pub use client::RegistrarClient;
pub use error::{ClientError, ClientResult};
