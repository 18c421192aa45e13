//! Shared test helpers

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::env;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use registrar_provider::{
    Contact, EnomProvider, ProviderCredentials, RegistrarError, RegistrarProvider, Result,
    Transport, WireParams, create_provider,
};
use serde_json::{Value, json};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it; fails the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it; fails the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const MOCK_ENDPOINT: &str = "https://mock.enom.test/interface.asp";

/// A successful Enom response: `body` plus `ErrCount=0`.
pub fn ok(body: Value) -> Value {
    let mut body = body;
    if let Value::Object(map) = &mut body {
        map.insert("ErrCount".to_string(), json!("0"));
    }
    body
}

/// A failed Enom response carrying `messages` as `Err1..ErrN`.
pub fn failure(messages: &[&str]) -> Value {
    let errors: serde_json::Map<String, Value> = messages
        .iter()
        .enumerate()
        .map(|(i, m)| (format!("Err{}", i + 1), json!(m)))
        .collect();
    json!({"ErrCount": messages.len().to_string(), "errors": errors})
}

/// `ParseDomain` response for `sld`.`tld`.
pub fn parsed(sld: &str, tld: &str) -> Value {
    ok(json!({"ParseDomain": {"SLD": sld, "TLD": tld}}))
}

/// Transport that records every request and answers from per-command queues.
///
/// The last queued response of a command is reused for further calls.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Value>>>,
    requests: Mutex<Vec<(String, WireParams)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response for `command`.
    pub fn respond(&self, command: &str, response: Value) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(command.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<(String, WireParams)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests sent for one command.
    pub fn requests_for(&self, command: &str) -> Vec<WireParams> {
        self.requests()
            .into_iter()
            .map(|(_, params)| params)
            .filter(|params| params.get("Command").map(String::as_str) == Some(command))
            .collect()
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.requests_for(command).len()
    }

    /// Commands in the order they were sent.
    pub fn commands(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|(_, params)| params.get("Command").cloned())
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, endpoint: &str, params: &WireParams) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((endpoint.to_string(), params.clone()));

        let command = params.get("Command").cloned().unwrap_or_default();
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let queue = responses.get_mut(&command);
        let response = match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        response.ok_or_else(|| RegistrarError::TransportEmptyResponse {
            provider: "mock".to_string(),
        })
    }
}

/// Enom provider wired to a fresh mock transport.
pub fn mock_provider() -> (EnomProvider, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let provider = EnomProvider::builder("resellid".to_string(), "resellpw".to_string())
        .environment(registrar_provider::EnomEnvironment::Custom(
            MOCK_ENDPOINT.to_string(),
        ))
        .transport(transport.clone())
        .build();
    (provider, transport)
}

/// A fully populated registrant.
pub fn registrant() -> Contact {
    Contact {
        identifier: None,
        first_name: Some("John".to_string()),
        last_name: Some("Doe".to_string()),
        organization_name: Some("Example Inc".to_string()),
        job_title: Some("Owner".to_string()),
        address_1: Some("1 SW 1st Street".to_string()),
        address_2: Some("Apt 305".to_string()),
        city: Some("Miami".to_string()),
        state_province: Some("Florida".to_string()),
        state_province_choice: Some("S".to_string()),
        country: Some("US".to_string()),
        postal_code: Some("33143".to_string()),
        phone: Some("+1.3055551212".to_string()),
        phone_ext: None,
        fax: None,
        email: Some("john.doe@example.com".to_string()),
    }
}

/// Live test context: provider plus a domain the reseller account owns.
pub struct TestContext {
    pub provider: Arc<dyn RegistrarProvider>,
    pub domain: String,
}

impl TestContext {
    /// Enom test context (defaults to the reseller test endpoint)
    pub fn enom() -> Option<Self> {
        let username = env::var("ENOM_USERNAME").ok()?;
        let password = env::var("ENOM_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let url = env::var("ENOM_URL")
            .unwrap_or_else(|_| "https://resellertest.enom.com/interface.asp".to_string());

        let credentials = ProviderCredentials::Enom {
            url: Some(url),
            username,
            password,
        };
        let provider = create_provider(credentials).ok()?;

        Some(Self { provider, domain })
    }
}
