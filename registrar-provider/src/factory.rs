//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::RegistrarProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "enom")]
use crate::providers::{EnomEnvironment, EnomProvider};

/// Creates a [`RegistrarProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn RegistrarProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use registrar_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Enom {
///     url: None,
///     username: "reseller".to_string(),
///     password: "secret".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn RegistrarProvider>> {
    match credentials {
        #[cfg(feature = "enom")]
        ProviderCredentials::Enom {
            url,
            username,
            password,
        } => {
            let environment = url.map_or(EnomEnvironment::Live, EnomEnvironment::Custom);
            Ok(Arc::new(
                EnomProvider::builder(username, password)
                    .environment(environment)
                    .build(),
            ))
        }
    }
}
