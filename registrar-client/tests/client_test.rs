//! RegistrarClient tests against a mock provider

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use registrar_client::{ClientError, RegistrarClient};
use registrar_provider::{
    Contact, ContactSet, Domain, ExtendedAttribute, ExtendedAttributeDescriptor, NameServer,
    Order, OrderStatus, Price, PurchaseOptions, RegistrarError, RegistrarProvider,
    RenewalOptions, Result,
};

/// Records the argument of every call; optionally fails every call.
#[derive(Default)]
struct MockProvider {
    calls: Mutex<Vec<(String, String)>>,
    fail_with: Option<RegistrarError>,
}

impl MockProvider {
    fn failing(err: RegistrarError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn record(&self, op: &str, arg: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((op.to_string(), arg.to_string()));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RegistrarProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn parse(&self, name: &str) -> Result<(String, String)> {
        self.record("parse", name)?;
        let (sld, tld) = name.split_once('.').unwrap_or((name, ""));
        Ok((sld.to_string(), tld.to_string()))
    }

    async fn is_available(&self, name: &str) -> Result<bool> {
        self.record("is_available", name)?;
        Ok(true)
    }

    async fn find(&self, name: &str) -> Result<Option<Domain>> {
        self.record("find", name)?;
        Ok(Some(Domain::new(name)))
    }

    async fn purchase(
        &self,
        name: &str,
        _registrant: &Contact,
        _options: Option<&PurchaseOptions>,
    ) -> Result<Order> {
        self.record("purchase", name)?;
        let mut order = Order::new("1", None, None, None, OrderStatus::Closed);
        order.add_domain(Domain::new(name));
        Ok(order)
    }

    async fn renew(&self, name: &str, _options: Option<&RenewalOptions>) -> Result<bool> {
        self.record("renew", name)?;
        Ok(true)
    }

    async fn order(&self, id: &str) -> Result<Order> {
        self.record("order", id)?;
        Ok(Order::new(id, None, None, None, OrderStatus::Open))
    }

    async fn name_servers(&self, name: &str) -> Result<Vec<NameServer>> {
        self.record("name_servers", name)?;
        Ok(vec![NameServer::new("ns1.example.net")])
    }

    async fn set_name_servers(&self, name: &str, name_servers: &[String]) -> Result<Vec<String>> {
        self.record("set_name_servers", &format!("{name}:{}", name_servers.join(",")))?;
        Ok(name_servers.to_vec())
    }

    async fn find_name_server(&self, name: &str) -> Result<NameServer> {
        self.record("find_name_server", name)?;
        Ok(NameServer::new(name))
    }

    async fn register_name_server(&self, name_server: &NameServer) -> Result<NameServer> {
        self.record("register_name_server", &name_server.name)?;
        Ok(name_server.clone())
    }

    async fn extended_attributes(&self, name: &str) -> Result<Vec<ExtendedAttributeDescriptor>> {
        self.record("extended_attributes", name)?;
        Ok(Vec::new())
    }

    fn minimum_number_of_years(&self, tld: &str) -> u32 {
        if tld == "tm" { 10 } else { 1 }
    }

    async fn tld_retail_transfer_price(&self, tld: &str) -> Result<Price> {
        self.record("tld_retail_transfer_price", tld)?;
        Ok(Price { minor_units: 895 })
    }

    async fn contacts(&self, domain: &Domain) -> Result<ContactSet> {
        self.record("contacts", domain.name())?;
        Ok(ContactSet::default())
    }

    async fn update_registrant(
        &self,
        domain: &Domain,
        registrant: &Contact,
        _extended_attributes: &[ExtendedAttribute],
    ) -> Result<Contact> {
        self.record("update_registrant", domain.name())?;
        Ok(registrant.clone())
    }

    async fn update_contacts(&self, domain: &Domain, _contact: &Contact) -> Result<ContactSet> {
        self.record("update_contacts", domain.name())?;
        Ok(ContactSet::default())
    }

    async fn update_technical_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.record("update_technical_contact", domain.name())?;
        Ok(contact.clone())
    }

    async fn update_administrative_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.record("update_administrative_contact", domain.name())?;
        Ok(contact.clone())
    }

    async fn update_aux_billing_contact(
        &self,
        domain: &Domain,
        contact: &Contact,
    ) -> Result<Contact> {
        self.record("update_aux_billing_contact", domain.name())?;
        Ok(contact.clone())
    }
}

fn client_with(provider: MockProvider) -> (RegistrarClient, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (RegistrarClient::new(provider.clone()), provider)
}

#[tokio::test]
async fn names_are_lower_cased_before_delegating() {
    let (client, provider) = client_with(MockProvider::default());

    assert!(matches!(client.is_available("Example.COM").await, Ok(true)));
    assert!(matches!(client.find("EXAMPLE.com.").await, Ok(Some(_))));
    assert!(client.renew(" Example.Com ", None).await.is_ok());
    assert!(client.extended_attributes("Example.US").await.is_ok());

    assert_eq!(
        provider.calls(),
        vec![
            ("is_available".to_string(), "example.com".to_string()),
            ("find".to_string(), "example.com".to_string()),
            ("renew".to_string(), "example.com".to_string()),
            ("extended_attributes".to_string(), "example.us".to_string()),
        ]
    );
}

#[tokio::test]
async fn purchase_forwards_normalized_name() {
    let (client, provider) = client_with(MockProvider::default());

    let order = client.purchase("Example.COM", &Contact::default(), None).await;
    assert!(
        matches!(&order, Ok(o) if o.is_complete() && o.domains()[0].name() == "example.com"),
        "unexpected result: {order:?}"
    );
    assert_eq!(provider.calls()[0].1, "example.com");
}

#[tokio::test]
async fn tld_arguments_are_lower_cased() {
    let (client, provider) = client_with(MockProvider::default());

    assert!(matches!(client.minimum_number_of_years("TM"), Ok(10)));
    assert!(matches!(client.minimum_number_of_years(".tm"), Ok(1)));
    let price = client.tld_retail_transfer_price("COM").await;
    assert!(matches!(price, Ok(p) if p.minor_units == 895));
    assert_eq!(
        provider.calls(),
        vec![("tld_retail_transfer_price".to_string(), "com".to_string())]
    );
}

#[tokio::test]
async fn check_name_servers_is_an_alias() {
    let (client, provider) = client_with(MockProvider::default());

    let direct = client.name_servers("Example.com").await;
    let alias = client.check_name_servers("Example.com").await;
    assert!(matches!((&direct, &alias), (Ok(a), Ok(b)) if a == b));
    assert_eq!(provider.calls().len(), 2);
    assert!(provider.calls().iter().all(|(op, _)| op == "name_servers"));
}

#[tokio::test]
async fn name_server_hosts_are_normalized() {
    let (client, provider) = client_with(MockProvider::default());

    let applied = client
        .set_name_servers(
            "Example.com",
            &["NS1.Example.NET".to_string(), "ns2.example.net.".to_string()],
        )
        .await;
    assert!(matches!(&applied, Ok(hosts) if hosts == &["ns1.example.net", "ns2.example.net"]));

    let host = NameServer::with_ip("NS1.Example.com", "192.0.2.1");
    let registered = client.register_name_server(&host).await;
    assert!(matches!(&registered, Ok(ns) if ns.name == "ns1.example.com" && ns.ip_address.as_deref() == Some("192.0.2.1")));

    assert_eq!(
        provider.calls()[0].1,
        "example.com:ns1.example.net,ns2.example.net"
    );
}

#[tokio::test]
async fn blank_name_never_reaches_provider() {
    let (client, provider) = client_with(MockProvider::default());

    let result = client.is_available("   ").await;
    assert!(
        matches!(&result, Err(e @ ClientError::InvalidArgument { .. }) if e.is_expected()),
        "unexpected result: {result:?}"
    );
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn provider_errors_are_wrapped() {
    let (client, _provider) = client_with(MockProvider::failing(RegistrarError::NotFound {
        provider: "mock".to_string(),
        resource: "ns9.example.com".to_string(),
    }));

    let result = client.find_name_server("NS9.example.com").await;
    assert!(
        matches!(
            &result,
            Err(e @ ClientError::Provider(RegistrarError::NotFound { .. })) if e.is_expected()
        ),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn contact_operations_delegate() {
    let (client, provider) = client_with(MockProvider::default());
    let domain = Domain::new("example.com");
    let contact = Contact {
        first_name: Some("Jane".to_string()),
        ..Contact::default()
    };

    assert!(client.contacts(&domain).await.is_ok());
    assert!(client.update_contacts(&domain, &contact).await.is_ok());
    let tech = client.update_technical_contact(&domain, &contact).await;
    assert!(matches!(&tech, Ok(c) if c.first_name.as_deref() == Some("Jane")));
    assert!(client.update_administrative_contact(&domain, &contact).await.is_ok());
    assert!(client.update_aux_billing_contact(&domain, &contact).await.is_ok());
    assert!(client.update_registrant(&domain, &contact, &[]).await.is_ok());

    let ops: Vec<String> = provider.calls().into_iter().map(|(op, _)| op).collect();
    assert_eq!(
        ops,
        vec![
            "contacts",
            "update_contacts",
            "update_technical_contact",
            "update_administrative_contact",
            "update_aux_billing_contact",
            "update_registrant",
        ]
    );
}
