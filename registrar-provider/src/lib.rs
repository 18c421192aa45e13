//! # registrar-provider
//!
//! A registrar-agnostic abstraction for registering and managing domain names
//! through reseller APIs.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Enom](https://www.enom.com/) | `enom` | Reseller login (`UID`/`PW`) |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)* — Enable all providers listed above.
//! - **`enom`** — Enable only the Enom provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registrar_provider::{
//!     create_provider, Contact, ProviderCredentials, PurchaseOptions, RegistrarProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from credentials
//!     let provider = create_provider(ProviderCredentials::Enom {
//!         url: Some("https://resellertest.enom.com/interface.asp".to_string()),
//!         username: "reseller".to_string(),
//!         password: "secret".to_string(),
//!     })?;
//!
//!     // 2. Check availability
//!     if provider.is_available("example.com").await? {
//!         // 3. Register it with custom name servers
//!         let registrant = Contact {
//!             first_name: Some("John".to_string()),
//!             last_name: Some("Doe".to_string()),
//!             email: Some("john.doe@example.com".to_string()),
//!             ..Contact::default()
//!         };
//!         let options = PurchaseOptions::default()
//!             .name_server("ns1.example.net")
//!             .name_server("ns2.example.net");
//!         let order = provider.purchase("example.com", &registrant, Some(&options)).await?;
//!         println!("order {} complete: {}", order.id(), order.is_complete());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, RegistrarError>`](RegistrarError):
//!
//! - [`RegistrarError::ProviderProtocolError`]: the registrar reported errors;
//!   every message is kept
//! - [`RegistrarError::RegistrationRejected`]: a purchase or host registration was refused
//! - [`RegistrarError::NotFound`]: a name server or contact does not exist
//! - [`RegistrarError::TransportEmptyResponse`]: no parseable response body
//!
//! Nothing is retried automatically. Registrar commands such as `Purchase` are not
//! idempotent.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderErrorEntry, RegistrarError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export public traits (the error mapper stays internal)
pub use traits::{RegistrarProvider, Transport, WireParams};

// Re-export the HTTP transport for custom client configuration
pub use http_client::HttpTransport;

// Re-export types
pub use types::{
    Contact, ContactRole, ContactSet, CredentialValidationError, Domain, ExtendedAttribute,
    ExtendedAttributeDescriptor, ExtendedAttributeOptionDescriptor, NameServer, NameServerEntry,
    Order, OrderStatus, Price, ProviderCredentials, ProviderType, PurchaseOptions,
    RenewalOptions,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "enom")]
pub use providers::{EnomEnvironment, EnomProvider, EnomProviderBuilder};
