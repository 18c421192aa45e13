//! Enom wire translation
//!
//! Canonical objects → request parameters, and response trees → canonical objects.

use serde_json::Value;

use crate::providers::common::{flag, one_or_many, raw_text, section, text};
use crate::traits::WireParams;
use crate::types::{
    Contact, ContactRole, ExtendedAttribute, ExtendedAttributeDescriptor,
    ExtendedAttributeOptionDescriptor, NameServer, Order, OrderStatus,
};

// ============ Contacts ============

/// Field-name prefix Enom uses for a contact role.
pub fn contact_prefix(role: ContactRole) -> &'static str {
    match role {
        ContactRole::Registrant => "Registrant",
        ContactRole::AuxBilling => "AuxBilling",
        ContactRole::Tech => "Tech",
        ContactRole::Admin => "Admin",
        ContactRole::Billing => "Billing",
    }
}

/// Wire suffixes paired with the contact field they carry.
fn contact_fields(contact: &Contact) -> [(&'static str, Option<&str>); 15] {
    [
        ("Address1", contact.address_1.as_deref()),
        ("Address2", contact.address_2.as_deref()),
        ("City", contact.city.as_deref()),
        ("Country", contact.country.as_deref()),
        ("EmailAddress", contact.email.as_deref()),
        ("Fax", contact.fax.as_deref()),
        ("FirstName", contact.first_name.as_deref()),
        ("LastName", contact.last_name.as_deref()),
        ("JobTitle", contact.job_title.as_deref()),
        ("OrganizationName", contact.organization_name.as_deref()),
        ("Phone", contact.phone.as_deref()),
        ("PhoneExt", contact.phone_ext.as_deref()),
        ("PostalCode", contact.postal_code.as_deref()),
        ("StateProvince", contact.state_province.as_deref()),
        ("StateProvinceChoice", contact.state_province_choice.as_deref()),
    ]
}

/// `{prefix}{Field}` parameters for every contact field. Absent fields are sent empty.
pub fn contact_to_params(contact: &Contact, role: ContactRole) -> WireParams {
    let prefix = contact_prefix(role);
    contact_fields(contact)
        .into_iter()
        .map(|(suffix, value)| {
            (
                format!("{prefix}{suffix}"),
                value.unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// Inverse of [`contact_to_params`], also reading `{prefix}PartyID` into the identifier.
pub fn contact_from_response(node: &Value, role: ContactRole) -> Contact {
    let prefix = contact_prefix(role);
    let field = |suffix: &str| raw_text(node, &format!("{prefix}{suffix}"));
    Contact {
        identifier: field("PartyID"),
        first_name: field("FirstName"),
        last_name: field("LastName"),
        organization_name: field("OrganizationName"),
        job_title: field("JobTitle"),
        address_1: field("Address1"),
        address_2: field("Address2"),
        city: field("City"),
        state_province: field("StateProvince"),
        state_province_choice: field("StateProvinceChoice"),
        country: field("Country"),
        postal_code: field("PostalCode"),
        phone: field("Phone"),
        phone_ext: field("PhoneExt"),
        fax: field("Fax"),
        email: field("EmailAddress"),
    }
}

// ============ Extended attributes ============

fn us_nexus_code(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "us citizen" => Some("C11"),
        "permanent resident" => Some("C12"),
        "us organization" | "us organisation" => Some("C21"),
        "foreign entity" => Some("C31"),
        "foreign office" => Some("C32"),
        _ => None,
    }
}

fn us_purpose_code(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "business" => Some("P1"),
        "non-profit" | "nonprofit" => Some("P2"),
        "personal" => Some("P3"),
        "educational" => Some("P4"),
        "government" => Some("P5"),
        _ => None,
    }
}

/// Wire name and value for one extended attribute.
///
/// Known enumerated attributes are translated to Enom's field names and registry
/// codes; anything else is sent exactly as given.
pub fn encode_extended_attribute(attribute: &ExtendedAttribute) -> (String, String) {
    let tld = attribute.tld.trim_start_matches('.').to_ascii_lowercase();
    let name = attribute.name.to_ascii_lowercase();
    let value = attribute.value.as_str();

    match (tld.as_str(), name.as_str()) {
        ("us", "nexus" | "us_nexus") => (
            "us_nexus".to_string(),
            us_nexus_code(value).unwrap_or(value).to_string(),
        ),
        ("us", "purpose" | "us_purpose") => (
            "us_purpose".to_string(),
            us_purpose_code(value).unwrap_or(value).to_string(),
        ),
        _ => (attribute.name.clone(), value.to_string()),
    }
}

/// Descriptors from a `GetExtAttributes` response. Empty when there is no `Attributes` section.
pub fn extended_attributes_from_response(response: &Value) -> Vec<ExtendedAttributeDescriptor> {
    let Some(attributes) = section(response, "Attributes") else {
        return Vec::new();
    };

    one_or_many(attributes.get("Attribute"))
        .into_iter()
        .map(|attribute| ExtendedAttributeDescriptor {
            name: text(attribute, "Name"),
            description: text(attribute, "Description"),
            required: flag(attribute, "Required", "1"),
            child: flag(attribute, "IsChild", "1"),
            application: text(attribute, "Application"),
            user_defined: flag(attribute, "UserDefined", "True"),
            apply_to_registrar: flag(attribute, "ApplyToRegistrar", "1"),
            options: section(attribute, "Options")
                .map(|options| {
                    one_or_many(options.get("Option"))
                        .into_iter()
                        .map(|option| ExtendedAttributeOptionDescriptor {
                            title: text(option, "Title"),
                            value: text(option, "Value"),
                            description: text(option, "Description"),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

// ============ Orders ============

/// Canonical status for an Enom order-detail `Status` / `OrderStatus` pair.
///
/// Both strings are matched case-insensitively and their roles are interchangeable.
pub fn derive_order_status(status: Option<&str>, order_status: Option<&str>) -> OrderStatus {
    let words: Vec<String> = [status, order_status]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();
    let any = |candidates: &[&str]| words.iter().any(|w| candidates.contains(&w.as_str()));

    if any(&["failed", "cancelled", "canceled", "rejected"]) {
        OrderStatus::Failed
    } else if any(&["successful"]) && any(&["complete", "completed", "closed"]) {
        OrderStatus::Closed
    } else if any(&["in process", "processing", "pending", "successful"]) {
        OrderStatus::InProcess
    } else if any(&["open"]) {
        OrderStatus::Open
    } else {
        OrderStatus::Unknown
    }
}

/// Build an [`Order`] from a `GetOrderDetail` response.
///
/// When several `OrderDetail` entries are present the last one decides the status.
/// Returns `None` when the response has no `Order` section.
pub fn order_from_response(response: &Value, requested_id: &str) -> Option<Order> {
    let order = section(response, "Order")?;
    let details = one_or_many(order.get("OrderDetail"));
    let latest = details.last();

    let detail_status = latest.and_then(|d| text(d, "Status"));
    let order_status = latest.and_then(|d| text(d, "OrderStatus"));
    let status = derive_order_status(detail_status.as_deref(), order_status.as_deref());

    Some(Order::new(
        text(order, "OrderID").unwrap_or_else(|| requested_id.to_string()),
        text(order, "OrderDate"),
        order_status,
        detail_status,
        status,
    ))
}

// ============ Name servers ============

/// Name servers listed in a `GetDNS` response.
pub fn name_servers_from_response(response: &Value) -> Vec<NameServer> {
    one_or_many(response.get("dns"))
        .into_iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(NameServer::new)
        .collect()
}

/// `NS1..NSn` parameters. An empty list is sent as a single empty `NS1`.
pub fn name_server_params<'a>(names: impl IntoIterator<Item = &'a str>) -> WireParams {
    let mut params: WireParams = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (format!("NS{}", i + 1), name.to_string()))
        .collect();
    if params.is_empty() {
        params.insert("NS1".to_string(), String::new());
    }
    params
}
