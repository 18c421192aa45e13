//! HTTP transport
//!
//! Sends form-style GET requests and decodes the XML body into the response tree
//! adapters work with. Adapters never touch `reqwest` directly; they go through
//! the [`Transport`] trait so tests can substitute a recording transport.
//!
//! No retries happen here. Registrar commands such as `Purchase` are not
//! idempotent, and a retried purchase can register (and bill) a domain twice.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::{RegistrarError, Result};
use crate::providers::common::create_http_client;
use crate::traits::{Transport, WireParams};
use crate::utils::log_sanitizer::{redact_params, truncate_for_log};
use crate::utils::xml_tree::decode_document;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text.
    ///
    /// A status of 400 or above is a [`RegistrarError::NetworkError`].
    ///
    /// * `provider_name` - Provider name (for logging and errors)
    /// * `url_or_action` - URL or command name (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        url_or_action: &str,
    ) -> Result<String> {
        log::debug!("[{provider_name}] GET {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistrarError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                RegistrarError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        if status_code >= 400 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] HTTP error {status_code}");
            return Err(RegistrarError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| RegistrarError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }

    /// Decode an XML body into the root element's content tree.
    ///
    /// An empty body, or a root element without content, is a
    /// [`RegistrarError::TransportEmptyResponse`].
    pub fn parse_xml(response_text: &str, provider_name: &str) -> Result<Value> {
        match decode_document(response_text) {
            Ok(Some(value @ Value::Object(_))) => Ok(value),
            Ok(_) => Err(RegistrarError::TransportEmptyResponse {
                provider: provider_name.to_string(),
            }),
            Err(e) => {
                log::error!("[{provider_name}] XML parse failed: {e}");
                log::error!(
                    "[{provider_name}] Raw response: {}",
                    truncate_for_log(response_text)
                );
                Err(RegistrarError::ParseError {
                    provider: provider_name.to_string(),
                    detail: e,
                })
            }
        }
    }
}

/// [`Transport`] over HTTP GET with query-string parameters and XML responses.
pub struct HttpTransport {
    client: Client,
    provider_name: &'static str,
}

impl HttpTransport {
    /// Creates a transport with the default connect/request timeouts.
    pub fn new(provider_name: &'static str) -> Self {
        Self::with_client(create_http_client(), provider_name)
    }

    /// Creates a transport around an existing client (custom proxy, TLS, timeouts).
    pub fn with_client(client: Client, provider_name: &'static str) -> Self {
        Self {
            client,
            provider_name,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, endpoint: &str, params: &WireParams) -> Result<Value> {
        let request = self.client.get(endpoint).query(params);
        let action = format!("{endpoint}?{}", redact_params(params));

        let response_text =
            HttpUtils::execute_request(request, self.provider_name, &action).await?;

        Self::parse_response(&response_text, self.provider_name)
    }
}

impl HttpTransport {
    fn parse_response(response_text: &str, provider_name: &str) -> Result<Value> {
        if response_text.trim().is_empty() {
            return Err(RegistrarError::TransportEmptyResponse {
                provider: provider_name.to_string(),
            });
        }
        HttpUtils::parse_xml(response_text, provider_name)
    }
}
