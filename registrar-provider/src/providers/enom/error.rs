//! Enom error mapping

use crate::error::{ProviderErrorEntry, RegistrarError};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{ENOM_PROVIDER_NAME, EnomProvider};

/// Enom reports failures as `ErrCount` plus `errors/Err1..ErrN`. The messages
/// carry no stable codes, so the whole collection becomes one protocol error.
impl ProviderErrorMapper for EnomProvider {
    fn provider_name(&self) -> &'static str {
        ENOM_PROVIDER_NAME
    }

    fn map_errors(&self, raw: Vec<RawApiError>, context: ErrorContext) -> RegistrarError {
        let message = raw
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        log::debug!(
            "[{}] {} failed for {}: {message}",
            self.provider_name(),
            context.command.as_deref().unwrap_or("<command>"),
            context.subject.as_deref().unwrap_or("<none>"),
        );

        RegistrarError::ProviderProtocolError {
            provider: self.provider_name().to_string(),
            message,
            errors: raw.into_iter().map(ProviderErrorEntry::from).collect(),
        }
    }
}
