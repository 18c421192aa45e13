//! Enom command execution

use serde_json::Value;

use crate::error::{RegistrarError, Result};
use crate::providers::common::text;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError, WireParams};

use super::EnomProvider;

/// Keys of the shared command query. Caller parameters never replace them.
pub(crate) const RESERVED_KEYS: [&str; 4] = ["UID", "PW", "ResponseType", "Command"];

/// Numeric suffix of an `ErrN` key, for ordering `Err2` before `Err10`.
fn error_index(key: &str) -> u32 {
    key.trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .unwrap_or(u32::MAX)
}

/// Error messages of a failed response, in `Err1..ErrN` order.
pub(crate) fn collect_errors(response: &Value) -> Vec<RawApiError> {
    let mut raw: Vec<(u32, RawApiError)> = match response.get("errors") {
        Some(Value::Object(errors)) => errors
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_str()
                    .map(|message| (error_index(key), RawApiError::with_code(key, message.trim())))
            })
            .collect(),
        Some(Value::String(message)) if !message.trim().is_empty() => {
            vec![(1, RawApiError::with_code("Err1", message.trim()))]
        }
        _ => Vec::new(),
    };
    raw.sort_by_key(|(index, _)| *index);

    if raw.is_empty() {
        let fallback = text(response, "RRPText").unwrap_or_else(|| "Unknown error".to_string());
        return vec![RawApiError {
            code: text(response, "RRPCode"),
            message: fallback,
        }];
    }
    raw.into_iter().map(|(_, e)| e).collect()
}

impl EnomProvider {
    /// Log a failed command (`warn` when expected, `error` otherwise) and return the error.
    pub(crate) fn fail(&self, command: &str, err: RegistrarError) -> RegistrarError {
        if err.is_expected() {
            log::warn!("[{}] {command}: {err}", self.provider_name());
        } else {
            log::error!("[{}] {command}: {err}", self.provider_name());
        }
        err
    }

    /// Login and format parameters shared by every command.
    fn base_query(&self, command: &str) -> WireParams {
        WireParams::from([
            (RESERVED_KEYS[0].to_string(), self.username.clone()),
            (RESERVED_KEYS[1].to_string(), self.password.clone()),
            (RESERVED_KEYS[2].to_string(), "XML".to_string()),
            (RESERVED_KEYS[3].to_string(), command.to_string()),
        ])
    }

    /// Execute one command and return the response tree.
    ///
    /// The login and command keys are applied last and always win over `params`.
    /// A non-zero `ErrCount` becomes a [`crate::RegistrarError::ProviderProtocolError`]
    /// carrying every error message.
    pub(crate) async fn execute(
        &self,
        command: &str,
        params: WireParams,
        subject: Option<&str>,
    ) -> Result<Value> {
        let mut query = params;
        query.extend(self.base_query(command));

        log::debug!("[{}] {command} {}", self.provider_name(), subject.unwrap_or(""));

        let response = self
            .transport
            .execute(&self.url, &query)
            .await
            .map_err(|e| self.fail(command, e))?;

        let Some(err_count) = text(&response, "ErrCount") else {
            let err = self.parse_error("response has no ErrCount");
            return Err(self.fail(command, err));
        };

        if err_count != "0" {
            let context = ErrorContext {
                command: Some(command.to_string()),
                subject: subject.map(str::to_string),
            };
            let err = self.map_errors(collect_errors(&response), context);
            return Err(self.fail(command, err));
        }

        Ok(response)
    }
}
