use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============ Contacts ============

/// A registrant or role contact.
///
/// Every field except `identifier` is supplied by the caller. The identifier is
/// assigned by the registrar and only filled in after a successful round trip
/// (purchase, contact lookup).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Registrar-assigned party/contact id.
    pub identifier: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
    pub job_title: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    /// Whether `state_province` holds a state (`S`) or a province (`P`).
    pub state_province_choice: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub phone_ext: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
}

/// Contact roles a registrar keeps per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRole {
    Registrant,
    AuxBilling,
    Tech,
    Admin,
    /// The reseller's own billing contact. Read-only.
    Billing,
}

impl std::fmt::Display for ContactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registrant => write!(f, "registrant"),
            Self::AuxBilling => write!(f, "aux_billing"),
            Self::Tech => write!(f, "tech"),
            Self::Admin => write!(f, "admin"),
            Self::Billing => write!(f, "billing"),
        }
    }
}

/// All contacts attached to a domain, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSet {
    pub registrant: Option<Contact>,
    pub aux_billing: Option<Contact>,
    pub tech: Option<Contact>,
    pub admin: Option<Contact>,
    pub billing: Option<Contact>,
}

impl ContactSet {
    /// Contact for the given role, if the registrar returned one.
    pub fn get(&self, role: ContactRole) -> Option<&Contact> {
        match role {
            ContactRole::Registrant => self.registrant.as_ref(),
            ContactRole::AuxBilling => self.aux_billing.as_ref(),
            ContactRole::Tech => self.tech.as_ref(),
            ContactRole::Admin => self.admin.as_ref(),
            ContactRole::Billing => self.billing.as_ref(),
        }
    }

    /// Store the contact for the given role, replacing any previous one.
    pub fn set(&mut self, role: ContactRole, contact: Contact) {
        let slot = match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::AuxBilling => &mut self.aux_billing,
            ContactRole::Tech => &mut self.tech,
            ContactRole::Admin => &mut self.admin,
            ContactRole::Billing => &mut self.billing,
        };
        *slot = Some(contact);
    }
}

// ============ Name servers ============

/// A name server host, optionally with its glue address.
///
/// Equality and ordering only look at `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameServer {
    pub name: String,
    pub ip_address: Option<String>,
}

impl NameServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address: None,
        }
    }

    pub fn with_ip(name: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address: Some(ip_address.into()),
        }
    }
}

impl PartialEq for NameServer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NameServer {}

impl PartialOrd for NameServer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NameServer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// A name server as supplied in [`PurchaseOptions`]: either a bare host name or a
/// [`NameServer`] object. Both end up as the same wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameServerEntry {
    Name(String),
    Server(NameServer),
}

impl NameServerEntry {
    /// Host name sent on the wire.
    pub fn host_name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Server(server) => &server.name,
        }
    }
}

impl From<&str> for NameServerEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for NameServerEntry {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<NameServer> for NameServerEntry {
    fn from(server: NameServer) -> Self {
        Self::Server(server)
    }
}

// ============ Domains and orders ============

/// A registered (or being registered) domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    name: String,
    pub registrant: Option<Contact>,
    /// Id of the order that produced this domain. A back reference, not ownership.
    pub order_id: Option<String>,
    pub expiration: Option<String>,
    pub registration_status: Option<String>,
    pub lockable: bool,
    pub real_time: bool,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registrant: None,
            order_id: None,
            expiration: None,
            registration_status: None,
            lockable: false,
            real_time: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Canonical order lifecycle, independent of any registrar's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    InProcess,
    /// Finished successfully.
    Closed,
    Failed,
    Unknown,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProcess => write!(f, "in_process"),
            Self::Closed => write!(f, "closed"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A registrar order.
///
/// Immutable once built, except that purchased domains may be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: String,
    order_date: Option<String>,
    /// Raw order status as reported by the registrar.
    order_status: Option<String>,
    /// Raw order-detail status as reported by the registrar.
    detail_status: Option<String>,
    status: OrderStatus,
    domains: Vec<Domain>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        order_date: Option<String>,
        order_status: Option<String>,
        detail_status: Option<String>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            order_date,
            order_status,
            detail_status,
            status,
            domains: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn order_date(&self) -> Option<&str> {
        self.order_date.as_deref()
    }

    pub fn order_status(&self) -> Option<&str> {
        self.order_status.as_deref()
    }

    pub fn detail_status(&self) -> Option<&str> {
        self.detail_status.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// `true` exactly when the order finished successfully.
    pub fn is_complete(&self) -> bool {
        self.status == OrderStatus::Closed
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Append a domain and point its back reference at this order.
    pub fn add_domain(&mut self, mut domain: Domain) {
        domain.order_id = Some(self.id.clone());
        self.domains.push(domain);
    }
}

// ============ Purchase / renewal options ============

/// Caller-supplied options for a purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOptions {
    pub name_servers: Vec<NameServerEntry>,
    pub extended_attributes: Vec<ExtendedAttribute>,
    /// `None` lets the adapter use the TLD's minimum registration period.
    pub number_of_years: Option<u32>,
    /// IDN language code.
    pub language: Option<String>,
}

impl PurchaseOptions {
    pub fn has_name_servers(&self) -> bool {
        !self.name_servers.is_empty()
    }

    pub fn has_extended_attributes(&self) -> bool {
        !self.extended_attributes.is_empty()
    }

    #[must_use]
    pub fn name_server(mut self, entry: impl Into<NameServerEntry>) -> Self {
        self.name_servers.push(entry.into());
        self
    }

    #[must_use]
    pub fn extended_attribute(mut self, attribute: ExtendedAttribute) -> Self {
        self.extended_attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn years(mut self, number_of_years: u32) -> Self {
        self.number_of_years = Some(number_of_years);
        self
    }
}

/// Caller-supplied options for a renewal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalOptions {
    pub number_of_years: u32,
}

impl Default for RenewalOptions {
    fn default() -> Self {
        Self { number_of_years: 1 }
    }
}

// ============ Extended attributes ============

/// One registry-specific name/value pair sent at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAttribute {
    pub tld: String,
    pub name: String,
    pub value: String,
}

impl ExtendedAttribute {
    pub fn new(tld: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tld: tld.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Describes an extended attribute a TLD accepts or requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAttributeDescriptor {
    pub name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    /// Only relevant when a parent attribute has a particular value.
    pub child: bool,
    pub application: Option<String>,
    pub user_defined: bool,
    pub options: Vec<ExtendedAttributeOptionDescriptor>,
    pub apply_to_registrar: bool,
}

/// One allowed value of an [`ExtendedAttributeDescriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAttributeOptionDescriptor {
    pub title: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

// ============ Pricing ============

/// A price in minor currency units (cents). Parsed exactly, never through floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub minor_units: u64,
}

impl Price {
    /// Parse a decimal string such as `"8.95"`, `"10"` or `"12.5"`.
    ///
    /// More than two fractional digits, signs and non-digits are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let whole: u64 = whole.parse().ok()?;
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        Some(Self {
            minor_units: whole.checked_mul(100)?.checked_add(cents)?,
        })
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.minor_units / 100, self.minor_units % 100)
    }
}

// ============ Provider configuration ============

/// Identifies which registrar adapter to use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[cfg(feature = "enom")]
    Enom,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "enom")]
            Self::Enom => write!(f, "enom"),
            #[allow(unreachable_patterns)]
            _ => Ok(()),
        }
    }
}

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        provider: ProviderType,
        field: String,
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        provider: ProviderType,
        field: String,
        label: String,
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported registrars.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate an adapter.
///
/// ```json
/// { "provider": "enom", "credentials": { "url": "...", "username": "...", "password": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Enom reseller credentials. Requires feature `enom`.
    #[cfg(feature = "enom")]
    #[serde(rename = "enom")]
    Enom {
        /// Reseller API endpoint; the live endpoint when `None`.
        url: Option<String>,
        /// Reseller account login (`UID`).
        username: String,
        /// Reseller account password (`PW`).
        password: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat map, validating required fields.
    pub fn from_map(
        provider: &ProviderType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "enom")]
            ProviderType::Enom => {
                let url = map
                    .get("url")
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty());
                if let Some(url) = &url
                    && !(url.starts_with("https://") || url.starts_with("http://"))
                {
                    return Err(CredentialValidationError::InvalidFormat {
                        provider: provider.clone(),
                        field: "url".to_string(),
                        label: "API URL".to_string(),
                        reason: "must be an http(s) URL".to_string(),
                    });
                }
                Ok(Self::Enom {
                    url,
                    username: Self::get_required_field(provider, map, "username", "Login ID")?,
                    password: Self::get_required_field(provider, map, "password", "Password")?,
                })
            }
            #[allow(unreachable_patterns)]
            _ => Err(CredentialValidationError::InvalidFormat {
                provider: provider.clone(),
                field: "provider".to_string(),
                label: "Provider".to_string(),
                reason: format!(
                    "Provider '{provider}' is not supported or its feature is not enabled."
                ),
            }),
        }
    }

    fn get_required_field(
        provider: &ProviderType,
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a flat map for key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            #[cfg(feature = "enom")]
            Self::Enom {
                url,
                username,
                password,
            } => {
                let mut map: HashMap<String, String> = [
                    ("username".to_string(), username.clone()),
                    ("password".to_string(), password.clone()),
                ]
                .into();
                if let Some(url) = url {
                    map.insert("url".to_string(), url.clone());
                }
                map
            }
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "enom")]
            Self::Enom { .. } => ProviderType::Enom,
        }
    }
}
