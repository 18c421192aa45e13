//! Registrar client
//!
//! Normalizes name and TLD arguments (trimmed, trailing dot removed, lower-cased)
//! and forwards each call to the configured [`RegistrarProvider`].

use std::collections::HashMap;
use std::sync::Arc;

use registrar_provider::{
    Contact, ContactSet, Domain, ExtendedAttribute, ExtendedAttributeDescriptor, NameServer,
    Order, Price, ProviderCredentials, ProviderType, PurchaseOptions, RegistrarProvider, RenewalOptions,
    create_provider,
};

use crate::error::{ClientError, ClientResult};

/// Lower-cased, trimmed name without a trailing dot.
fn normalize(param: &str, value: &str) -> ClientResult<String> {
    let normalized = value.trim().trim_end_matches('.').to_lowercase();
    if normalized.is_empty() {
        return Err(ClientError::InvalidArgument {
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        }
        .logged());
    }
    Ok(normalized)
}

/// Registrar client
pub struct RegistrarClient {
    provider: Arc<dyn RegistrarProvider>,
}

impl RegistrarClient {
    /// Wrap an existing provider.
    #[must_use]
    pub fn new(provider: Arc<dyn RegistrarProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider for `credentials` and wrap it.
    pub fn from_credentials(credentials: ProviderCredentials) -> ClientResult<Self> {
        let provider = create_provider(credentials).map_err(|e| ClientError::from(e).logged())?;
        Ok(Self::new(provider))
    }

    /// Validate a flat credential map (as stored by a host application) and build the client.
    pub fn from_credential_map(
        provider: &ProviderType,
        map: &HashMap<String, String>,
    ) -> ClientResult<Self> {
        let credentials = ProviderCredentials::from_map(provider, map)
            .map_err(|e| ClientError::from(e).logged())?;
        Self::from_credentials(credentials)
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &Arc<dyn RegistrarProvider> {
        &self.provider
    }

    pub async fn parse(&self, name: &str) -> ClientResult<(String, String)> {
        let name = normalize("name", name)?;
        self.provider.parse(&name).await.map_err(ClientError::from)
    }

    pub async fn is_available(&self, name: &str) -> ClientResult<bool> {
        let name = normalize("name", name)?;
        self.provider.is_available(&name).await.map_err(ClientError::from)
    }

    pub async fn find(&self, name: &str) -> ClientResult<Option<Domain>> {
        let name = normalize("name", name)?;
        self.provider.find(&name).await.map_err(ClientError::from)
    }

    pub async fn purchase(
        &self,
        name: &str,
        registrant: &Contact,
        options: Option<&PurchaseOptions>,
    ) -> ClientResult<Order> {
        let name = normalize("name", name)?;
        log::info!("[{}] Purchasing {name}", self.provider.id());
        self.provider
            .purchase(&name, registrant, options)
            .await
            .map_err(ClientError::from)
    }

    pub async fn renew(&self, name: &str, options: Option<&RenewalOptions>) -> ClientResult<bool> {
        let name = normalize("name", name)?;
        self.provider.renew(&name, options).await.map_err(ClientError::from)
    }

    pub async fn order(&self, id: &str) -> ClientResult<Order> {
        self.provider.order(id.trim()).await.map_err(ClientError::from)
    }

    pub async fn name_servers(&self, name: &str) -> ClientResult<Vec<NameServer>> {
        let name = normalize("name", name)?;
        self.provider.name_servers(&name).await.map_err(ClientError::from)
    }

    /// Alias of [`Self::name_servers`].
    pub async fn check_name_servers(&self, name: &str) -> ClientResult<Vec<NameServer>> {
        self.name_servers(name).await
    }

    pub async fn set_name_servers(
        &self,
        name: &str,
        name_servers: &[String],
    ) -> ClientResult<Vec<String>> {
        let name = normalize("name", name)?;
        let hosts = name_servers
            .iter()
            .map(|host| normalize("name_servers", host))
            .collect::<ClientResult<Vec<_>>>()?;
        self.provider
            .set_name_servers(&name, &hosts)
            .await
            .map_err(ClientError::from)
    }

    pub async fn find_name_server(&self, name: &str) -> ClientResult<NameServer> {
        let name = normalize("name", name)?;
        self.provider.find_name_server(&name).await.map_err(ClientError::from)
    }

    pub async fn register_name_server(&self, name_server: &NameServer) -> ClientResult<NameServer> {
        let host = NameServer {
            name: normalize("name_server", &name_server.name)?,
            ip_address: name_server.ip_address.clone(),
        };
        self.provider.register_name_server(&host).await.map_err(ClientError::from)
    }

    pub async fn extended_attributes(
        &self,
        name: &str,
    ) -> ClientResult<Vec<ExtendedAttributeDescriptor>> {
        let name = normalize("name", name)?;
        self.provider.extended_attributes(&name).await.map_err(ClientError::from)
    }

    pub fn minimum_number_of_years(&self, tld: &str) -> ClientResult<u32> {
        let tld = normalize("tld", tld)?;
        Ok(self.provider.minimum_number_of_years(&tld))
    }

    pub async fn tld_retail_transfer_price(&self, tld: &str) -> ClientResult<Price> {
        let tld = normalize("tld", tld)?;
        self.provider
            .tld_retail_transfer_price(&tld)
            .await
            .map_err(ClientError::from)
    }

    pub async fn contacts(&self, domain: &Domain) -> ClientResult<ContactSet> {
        self.provider.contacts(domain).await.map_err(ClientError::from)
    }

    pub async fn update_registrant(
        &self,
        domain: &Domain,
        registrant: &Contact,
        extended_attributes: &[ExtendedAttribute],
    ) -> ClientResult<Contact> {
        self.provider
            .update_registrant(domain, registrant, extended_attributes)
            .await
            .map_err(ClientError::from)
    }

    pub async fn update_contacts(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> ClientResult<ContactSet> {
        self.provider.update_contacts(domain, contact).await.map_err(ClientError::from)
    }

    pub async fn update_technical_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> ClientResult<Contact> {
        self.provider
            .update_technical_contact(domain, contact)
            .await
            .map_err(ClientError::from)
    }

    pub async fn update_administrative_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> ClientResult<Contact> {
        self.provider
            .update_administrative_contact(domain, contact)
            .await
            .map_err(ClientError::from)
    }

    pub async fn update_aux_billing_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> ClientResult<Contact> {
        self.provider
            .update_aux_billing_contact(domain, contact)
            .await
            .map_err(ClientError::from)
    }
}
