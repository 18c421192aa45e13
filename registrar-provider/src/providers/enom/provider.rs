//! Enom `RegistrarProvider` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::{flag, normalize_domain_name, section, text};
use crate::traits::{ProviderErrorMapper, RegistrarProvider, WireParams};
use crate::types::{
    Contact, ContactRole, ContactSet, Domain, ExtendedAttribute, ExtendedAttributeDescriptor,
    NameServer, Order, Price, PurchaseOptions, RenewalOptions,
};

use super::types::{
    contact_from_response, contact_prefix, contact_to_params, encode_extended_attribute,
    extended_attributes_from_response, name_server_params, name_servers_from_response,
    order_from_response,
};
use super::http::RESERVED_KEYS;
use super::{
    ENOM_PROVIDER_NAME, EnomProvider, PRODUCT_TYPE_TRANSFER, RRP_AVAILABLE, RRP_SUCCESS,
    minimum_years_for,
};

/// Roles `update_contacts` writes, in request order.
const SHARED_CONTACT_ROLES: [ContactRole; 3] =
    [ContactRole::Tech, ContactRole::Admin, ContactRole::AuxBilling];

/// Roles `GetContacts` returns.
const ALL_CONTACT_ROLES: [ContactRole; 5] = [
    ContactRole::Registrant,
    ContactRole::AuxBilling,
    ContactRole::Tech,
    ContactRole::Admin,
    ContactRole::Billing,
];

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

impl EnomProvider {
    /// `value` unless it is blank.
    fn require(&self, command: &str, param: &str, value: String) -> Result<String> {
        if value.is_empty() {
            let err = self.invalid_parameter(param, "must not be empty");
            return Err(self.fail(command, err));
        }
        Ok(value)
    }

    /// Add encoded extended attributes to `params`.
    ///
    /// An attribute whose wire name is blank, a login/command key, or a key already
    /// in `params` (case-insensitive) is an [`crate::RegistrarError::InvalidParameter`].
    fn add_extended_attributes(
        &self,
        command: &str,
        params: &mut WireParams,
        attributes: &[ExtendedAttribute],
    ) -> Result<()> {
        for attribute in attributes {
            let (name, value) = encode_extended_attribute(attribute);
            let detail = if name.trim().is_empty() {
                Some("attribute name is empty".to_string())
            } else if RESERVED_KEYS
                .iter()
                .copied()
                .chain(params.keys().map(String::as_str))
                .any(|k| k.eq_ignore_ascii_case(&name))
            {
                Some(format!("'{name}' is already set by the {command} request"))
            } else {
                None
            };
            if let Some(detail) = detail {
                let err = self.invalid_parameter(attribute.name.as_str(), detail);
                return Err(self.fail(command, err));
            }
            params.insert(name, value);
        }
        Ok(())
    }

    /// `SLD`/`TLD` parameters for a domain name.
    async fn domain_params(&self, name: &str) -> Result<WireParams> {
        let (sld, tld) = self.parse(name).await?;
        Ok(WireParams::from([param("SLD", sld), param("TLD", tld)]))
    }

    /// Send one `Contacts` command for `role`.
    async fn update_contact_role(
        &self,
        domain: &Domain,
        role: ContactRole,
        contact: &Contact,
        extended_attributes: &[ExtendedAttribute],
    ) -> Result<()> {
        let mut params = self.domain_params(domain.name()).await?;
        params.insert("ContactType".to_string(), contact_prefix(role).to_string());
        params.extend(contact_to_params(contact, role));
        self.add_extended_attributes("Contacts", &mut params, extended_attributes)?;
        self.execute("Contacts", params, Some(domain.name())).await?;
        Ok(())
    }

    /// Re-read the contacts and return one role.
    async fn contact_for_role(&self, domain: &Domain, role: ContactRole) -> Result<Contact> {
        let contacts = self.contacts(domain).await?;
        contacts
            .get(role)
            .cloned()
            .ok_or_else(|| {
                let err = self.not_found(format!("{} contact of {}", role, domain.name()));
                self.fail("GetContacts", err)
            })
    }

    fn purchase_params(
        &self,
        sld: String,
        tld: String,
        registrant: &Contact,
        options: Option<&PurchaseOptions>,
    ) -> Result<WireParams> {
        let mut params = WireParams::new();

        // Enom wants every contact role on purchase; all are the registrant.
        for role in [
            ContactRole::Registrant,
            ContactRole::AuxBilling,
            ContactRole::Tech,
            ContactRole::Admin,
        ] {
            params.extend(contact_to_params(registrant, role));
        }

        match options.filter(|o| o.has_name_servers()) {
            Some(options) => {
                params.insert("IgnoreNSFail".to_string(), "Yes".to_string());
                params.extend(name_server_params(
                    options.name_servers.iter().map(|entry| entry.host_name()),
                ));
            }
            None => {
                params.insert("UseDNS".to_string(), "default".to_string());
            }
        }

        if let Some(language) = options.and_then(|o| o.language.as_ref()) {
            params.insert("IDNCode".to_string(), language.clone());
        }

        let years = options
            .and_then(|o| o.number_of_years)
            .unwrap_or_else(|| self.minimum_number_of_years(&tld));
        params.insert("NumYears".to_string(), years.to_string());
        params.insert("SLD".to_string(), sld);
        params.insert("TLD".to_string(), tld);

        if let Some(options) = options {
            self.add_extended_attributes("Purchase", &mut params, &options.extended_attributes)?;
        }
        Ok(params)
    }
}

#[async_trait]
impl RegistrarProvider for EnomProvider {
    fn id(&self) -> &'static str {
        ENOM_PROVIDER_NAME
    }

    async fn parse(&self, name: &str) -> Result<(String, String)> {
        let name = self.require("ParseDomain", "name", normalize_domain_name(name))?;

        if let Some(parts) = self.parse_cache.read().await.get(&name) {
            return Ok(parts.clone());
        }

        let response = self
            .execute(
                "ParseDomain",
                WireParams::from([param("PassedDomain", name.as_str())]),
                Some(&name),
            )
            .await?;

        let parsed = section(&response, "ParseDomain")
            .and_then(|p| Some((text(p, "SLD")?, text(p, "TLD")?)))
            .map(|(sld, tld)| (sld.to_ascii_lowercase(), tld.to_ascii_lowercase()))
            .ok_or_else(|| {
                let err = self.parse_error(format!("no SLD/TLD for {name}"));
                self.fail("ParseDomain", err)
            })?;

        self.parse_cache
            .write()
            .await
            .insert(name, parsed.clone());
        Ok(parsed)
    }

    async fn is_available(&self, name: &str) -> Result<bool> {
        let params = self.domain_params(name).await?;
        let response = self.execute("Check", params, Some(name)).await?;
        Ok(text(&response, "RRPCode").as_deref() == Some(RRP_AVAILABLE))
    }

    async fn find(&self, name: &str) -> Result<Option<Domain>> {
        let params = self.domain_params(name).await?;
        let response = self.execute("GetDomainInfo", params, Some(name)).await?;

        let Some(info) = section(&response, "GetDomainInfo") else {
            return Ok(None);
        };

        let mut domain = Domain::new(normalize_domain_name(name));
        if let Some(status) = section(info, "status") {
            domain.expiration = text(status, "expiration");
            domain.registration_status = text(status, "registrationstatus");
        }
        Ok(Some(domain))
    }

    async fn purchase(
        &self,
        name: &str,
        registrant: &Contact,
        options: Option<&PurchaseOptions>,
    ) -> Result<Order> {
        let name = normalize_domain_name(name);
        let (sld, tld) = self.parse(&name).await?;

        let params = self.purchase_params(sld, tld, registrant, options)?;

        let response = self.execute("Purchase", params, Some(&name)).await?;

        let Some(order_id) = text(&response, "OrderID") else {
            let reason =
                text(&response, "RRPText").unwrap_or_else(|| "no order created".to_string());
            return Err(self.fail("Purchase", self.rejected(name, reason)));
        };

        let mut domain = Domain::new(name);
        let mut purchased_registrant = registrant.clone();
        if let Some(party_id) = text(&response, "RegistrantPartyID") {
            purchased_registrant.identifier = Some(party_id);
        }
        domain.registrant = Some(purchased_registrant);
        domain.lockable = flag(&response, "IsLockable", "true");
        domain.real_time = flag(&response, "IsRealTimeTLD", "true");

        let mut order = self.order(&order_id).await?;
        order.add_domain(domain);
        Ok(order)
    }

    async fn renew(&self, name: &str, options: Option<&RenewalOptions>) -> Result<bool> {
        let years = options.map_or(1, |o| o.number_of_years);
        let mut params = self.domain_params(name).await?;
        params.insert("NumYears".to_string(), years.to_string());

        let response = self.execute("Extend", params, Some(name)).await?;
        Ok(flag(&response, "Extension", "successful"))
    }

    async fn order(&self, id: &str) -> Result<Order> {
        let response = self
            .execute(
                "GetOrderDetail",
                WireParams::from([param("OrderID", id)]),
                Some(id),
            )
            .await?;

        order_from_response(&response, id).ok_or_else(|| {
            let err = self.parse_error(format!("no Order for {id}"));
            self.fail("GetOrderDetail", err)
        })
    }

    async fn name_servers(&self, name: &str) -> Result<Vec<NameServer>> {
        let params = self.domain_params(name).await?;
        let response = self.execute("GetDNS", params, Some(name)).await?;
        Ok(name_servers_from_response(&response))
    }

    async fn set_name_servers(&self, name: &str, name_servers: &[String]) -> Result<Vec<String>> {
        let mut params = self.domain_params(name).await?;
        params.extend(name_server_params(name_servers.iter().map(String::as_str)));

        self.execute("ModifyNS", params, Some(name)).await?;
        Ok(name_servers.to_vec())
    }

    async fn find_name_server(&self, name: &str) -> Result<NameServer> {
        let name = self.require("CheckNSStatus", "name", normalize_domain_name(name))?;
        let response = self
            .execute(
                "CheckNSStatus",
                WireParams::from([param("CheckNSName", name.as_str())]),
                Some(&name),
            )
            .await?;

        if text(&response, "NsCheckSuccess").as_deref() != Some("1") {
            return Err(self.fail("CheckNSStatus", self.not_found(name)));
        }

        let status = section(&response, "CheckNsStatus");
        let host = status.and_then(|s| text(s, "name")).unwrap_or(name);
        Ok(NameServer {
            name: host,
            ip_address: status.and_then(|s| text(s, "ipaddress")),
        })
    }

    async fn register_name_server(&self, name_server: &NameServer) -> Result<NameServer> {
        let host = self.require(
            "RegisterNameServer",
            "name_server",
            normalize_domain_name(&name_server.name),
        )?;
        let params = WireParams::from([
            param("Add", "true"),
            param("NSName", host.as_str()),
            param("IP", name_server.ip_address.clone().unwrap_or_default()),
        ]);
        let response = self
            .execute("RegisterNameServer", params, Some(&host))
            .await?;

        if text(&response, "RRPCode").as_deref() != Some(RRP_SUCCESS) {
            let reason = text(&response, "RRPText")
                .unwrap_or_else(|| "name server not registered".to_string());
            let err = self.rejected(host, reason);
            return Err(self.fail("RegisterNameServer", err));
        }

        let registered = section(&response, "RegisterNameserver");
        Ok(NameServer {
            name: registered
                .and_then(|r| text(r, "NS"))
                .unwrap_or(host),
            ip_address: registered
                .and_then(|r| text(r, "IP"))
                .or_else(|| name_server.ip_address.clone()),
        })
    }

    async fn extended_attributes(&self, name: &str) -> Result<Vec<ExtendedAttributeDescriptor>> {
        let (_, tld) = self.parse(name).await?;
        let response = self
            .execute(
                "GetExtAttributes",
                WireParams::from([param("TLD", tld)]),
                Some(name),
            )
            .await?;
        Ok(extended_attributes_from_response(&response))
    }

    fn minimum_number_of_years(&self, tld: &str) -> u32 {
        minimum_years_for(tld)
    }

    async fn tld_retail_transfer_price(&self, tld: &str) -> Result<Price> {
        let tld = self.require(
            "PE_GetRetailPrice",
            "tld",
            tld.trim().trim_start_matches('.').to_ascii_lowercase(),
        )?;
        let params = WireParams::from([
            param("ProductType", PRODUCT_TYPE_TRANSFER),
            param("tld", tld.as_str()),
        ]);
        let response = self.execute("PE_GetRetailPrice", params, Some(&tld)).await?;

        let raw = section(&response, "productprice")
            .and_then(|p| text(p, "price"))
            .or_else(|| text(&response, "price"))
            .ok_or_else(|| {
                let err = self.parse_error(format!("no price for {tld}"));
                self.fail("PE_GetRetailPrice", err)
            })?;

        Price::parse(&raw).ok_or_else(|| {
            let err = self.parse_error(format!("invalid price '{raw}' for {tld}"));
            self.fail("PE_GetRetailPrice", err)
        })
    }

    async fn contacts(&self, domain: &Domain) -> Result<ContactSet> {
        let params = self.domain_params(domain.name()).await?;
        let response = self
            .execute("GetContacts", params, Some(domain.name()))
            .await?;

        let mut contacts = ContactSet::default();
        let Some(all) = section(&response, "GetContacts") else {
            return Ok(contacts);
        };
        for role in ALL_CONTACT_ROLES {
            if let Some(node) = section(all, contact_prefix(role)) {
                contacts.set(role, contact_from_response(node, role));
            }
        }
        Ok(contacts)
    }

    async fn update_registrant(
        &self,
        domain: &Domain,
        registrant: &Contact,
        extended_attributes: &[ExtendedAttribute],
    ) -> Result<Contact> {
        self.update_contact_role(domain, ContactRole::Registrant, registrant, extended_attributes)
            .await?;
        self.contact_for_role(domain, ContactRole::Registrant).await
    }

    async fn update_contacts(&self, domain: &Domain, contact: &Contact) -> Result<ContactSet> {
        for role in SHARED_CONTACT_ROLES {
            self.update_contact_role(domain, role, contact, &[])
                .await?;
        }
        self.contacts(domain).await
    }

    async fn update_technical_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.update_contact_role(domain, ContactRole::Tech, contact, &[])
            .await?;
        self.contact_for_role(domain, ContactRole::Tech).await
    }

    async fn update_administrative_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.update_contact_role(domain, ContactRole::Admin, contact, &[])
            .await?;
        self.contact_for_role(domain, ContactRole::Admin).await
    }

    async fn update_aux_billing_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.update_contact_role(domain, ContactRole::AuxBilling, contact, &[])
            .await?;
        self.contact_for_role(domain, ContactRole::AuxBilling).await
    }
}
