//! Enom reseller API provider

mod error;
mod http;
mod provider;
pub(crate) mod types;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::http_client::HttpTransport;
use crate::traits::Transport;

pub(crate) const ENOM_PROVIDER_NAME: &str = "enom";
pub(crate) const ENOM_LIVE_URL: &str = "https://reseller.enom.com/interface.asp";
pub(crate) const ENOM_TEST_URL: &str = "https://resellertest.enom.com/interface.asp";

/// `RRPCode` Enom answers `Check` with when the name can be registered.
pub(crate) const RRP_AVAILABLE: &str = "210";
/// `RRPCode` for a successful command.
pub(crate) const RRP_SUCCESS: &str = "200";
/// `PE_GetRetailPrice` product type for a domain transfer.
pub(crate) const PRODUCT_TYPE_TRANSFER: &str = "19";

/// TLDs whose registries require more than a one-year registration.
const MINIMUM_YEARS: &[(&str, u32)] = &[
    ("co.uk", 2),
    ("org.uk", 2),
    ("nu", 2),
    ("tm", 10),
    ("com.mx", 2),
    ("me.uk", 2),
];

/// Minimum registration period Enom accepts for `tld`.
pub(crate) fn minimum_years_for(tld: &str) -> u32 {
    let tld = tld.trim().trim_start_matches('.').to_ascii_lowercase();
    MINIMUM_YEARS
        .iter()
        .find(|(candidate, _)| *candidate == tld)
        .map_or(1, |(_, years)| *years)
}

/// Which Enom endpoint a provider talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnomEnvironment {
    /// Production reseller endpoint.
    #[default]
    Live,
    /// Reseller test environment; nothing is billed.
    Test,
    /// Any other endpoint (proxy, mock server).
    Custom(String),
}

impl EnomEnvironment {
    pub fn url(&self) -> &str {
        match self {
            Self::Live => ENOM_LIVE_URL,
            Self::Test => ENOM_TEST_URL,
            Self::Custom(url) => url,
        }
    }
}

/// Enom registrar provider.
///
/// Every command is an HTTP GET against the reseller interface with the account
/// login (`UID`/`PW`) and `ResponseType=XML`.
///
/// # Construction
///
/// ```rust,no_run
/// use registrar_provider::{EnomEnvironment, EnomProvider};
///
/// let provider = EnomProvider::builder("reseller".to_string(), "secret".to_string())
///     .environment(EnomEnvironment::Test)
///     .build();
/// ```
pub struct EnomProvider {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    /// Name → (SLD, TLD); `ParseDomain` is asked at most once per name.
    pub(crate) parse_cache: RwLock<HashMap<String, (String, String)>>,
}

/// Builder for [`EnomProvider`].
pub struct EnomProviderBuilder {
    username: String,
    password: String,
    environment: EnomEnvironment,
    transport: Option<Arc<dyn Transport>>,
}

impl EnomProviderBuilder {
    fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            environment: EnomEnvironment::Live,
            transport: None,
        }
    }

    /// Select the endpoint (default: [`EnomEnvironment::Live`]).
    pub fn environment(mut self, environment: EnomEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Use a custom transport instead of the HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the [`EnomProvider`] instance.
    pub fn build(self) -> EnomProvider {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new(ENOM_PROVIDER_NAME)));
        EnomProvider {
            transport,
            url: self.environment.url().to_string(),
            username: self.username,
            password: self.password,
            parse_cache: RwLock::new(HashMap::new()),
        }
    }
}

impl EnomProvider {
    /// Creates a provider against the live endpoint.
    pub fn new(username: String, password: String) -> Self {
        Self::builder(username, password).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(username: String, password: String) -> EnomProviderBuilder {
        EnomProviderBuilder::new(username, password)
    }

    /// Endpoint this provider sends commands to.
    pub fn url(&self) -> &str {
        &self.url
    }
}
