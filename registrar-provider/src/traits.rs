use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProviderErrorEntry, RegistrarError, Result};
use crate::types::{
    Contact, ContactSet, Domain, ExtendedAttribute, ExtendedAttributeDescriptor, NameServer,
    Order, Price, PurchaseOptions, RenewalOptions,
};

/// Flat, ordered request parameters. Keys and values are always strings on the wire.
pub type WireParams = BTreeMap<String, String>;

/// Executes one wire call.
///
/// Implementations own socket I/O and response decoding; adapters only shape the
/// parameter map and interpret the returned tree. The tree is the registrar's
/// response element: elements with children become objects, repeated siblings
/// become arrays and text leaves become strings.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `params` to `endpoint` and return the decoded response tree.
    ///
    /// Fails with [`RegistrarError::TransportEmptyResponse`] when there is no
    /// parseable body.
    async fn execute(&self, endpoint: &str, params: &WireParams) -> Result<Value>;
}

/// Raw registrar error entry (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

impl From<RawApiError> for ProviderErrorEntry {
    fn from(raw: RawApiError) -> Self {
        Self {
            code: raw.code,
            message: raw.message,
        }
    }
}

/// Extra information available when mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Wire command that failed.
    pub command: Option<String>,
    /// Domain or host the command was about.
    pub subject: Option<String>,
}

/// Maps a registrar's raw error collection onto [`RegistrarError`] (internal).
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    /// Map every error of one failed response.
    fn map_errors(&self, raw: Vec<RawApiError>, context: ErrorContext) -> RegistrarError;

    fn parse_error(&self, detail: impl ToString) -> RegistrarError {
        RegistrarError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn not_found(&self, resource: impl Into<String>) -> RegistrarError {
        RegistrarError::NotFound {
            provider: self.provider_name().to_string(),
            resource: resource.into(),
        }
    }

    fn invalid_parameter(
        &self,
        param: impl Into<String>,
        detail: impl Into<String>,
    ) -> RegistrarError {
        RegistrarError::InvalidParameter {
            provider: self.provider_name().to_string(),
            param: param.into(),
            detail: detail.into(),
        }
    }

    fn rejected(&self, name: impl Into<String>, reason: impl Into<String>) -> RegistrarError {
        RegistrarError::RegistrationRejected {
            provider: self.provider_name().to_string(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Registrar capability set
///
/// Every registrar adapter implements this capability set. Name arguments are
/// fully-qualified domain names; adapters lower-case them before use.
#[async_trait]
pub trait RegistrarProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Split a name into its second-level label and registrar-defined TLD
    /// (`"example.co.uk"` → `("example", "co.uk")`). Memoized per adapter instance.
    async fn parse(&self, name: &str) -> Result<(String, String)>;

    async fn is_available(&self, name: &str) -> Result<bool>;

    /// Look up a domain in the reseller account; `None` when the registrar has no details.
    async fn find(&self, name: &str) -> Result<Option<Domain>>;

    /// Register a domain. The returned order contains the purchased domain.
    async fn purchase(
        &self,
        name: &str,
        registrant: &Contact,
        options: Option<&PurchaseOptions>,
    ) -> Result<Order>;

    /// Extend a registration; `true` when the registrar confirms the extension.
    async fn renew(&self, name: &str, options: Option<&RenewalOptions>) -> Result<bool>;

    async fn order(&self, id: &str) -> Result<Order>;

    /// Name servers assigned to a domain; empty when none are.
    async fn name_servers(&self, name: &str) -> Result<Vec<NameServer>>;

    /// Replace the name servers of a domain and return the list applied.
    async fn set_name_servers(&self, name: &str, name_servers: &[String]) -> Result<Vec<String>>;

    /// Look up a registered host; [`RegistrarError::NotFound`] when absent.
    async fn find_name_server(&self, name: &str) -> Result<NameServer>;

    /// Register a host (glue) record.
    async fn register_name_server(&self, name_server: &NameServer) -> Result<NameServer>;

    /// Extended attributes the domain's TLD accepts; empty when it needs none.
    async fn extended_attributes(&self, name: &str) -> Result<Vec<ExtendedAttributeDescriptor>>;

    /// Minimum registration period for a TLD.
    fn minimum_number_of_years(&self, tld: &str) -> u32 {
        let _ = tld;
        1
    }

    async fn tld_retail_transfer_price(&self, tld: &str) -> Result<Price>;

    async fn contacts(&self, domain: &Domain) -> Result<ContactSet>;

    /// Update the registrant. Some TLDs require extended attributes alongside.
    async fn update_registrant(
        &self,
        domain: &Domain,
        registrant: &Contact,
        extended_attributes: &[ExtendedAttribute],
    ) -> Result<Contact>;

    /// Set the tech, admin and aux billing contacts to the same contact.
    async fn update_contacts(&self, domain: &Domain, contact: &Contact) -> Result<ContactSet>;

    async fn update_technical_contact(&self, domain: &Domain, contact: &Contact)
    -> Result<Contact>;

    async fn update_administrative_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact>;

    async fn update_aux_billing_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact>;
}
