//! Client error type

use thiserror::Error;

pub use registrar_provider::{CredentialValidationError, RegistrarError};

/// Client layer error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// A domain or host argument was blank
    #[error("Invalid argument '{param}': {detail}")]
    InvalidArgument { param: String, detail: String },

    /// Credential validation errors when building from a flat map
    #[error("{0}")]
    CredentialValidation(#[from] CredentialValidationError),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] RegistrarError),
}

impl ClientError {
    /// Whether it is expected behavior (bad input, missing resource, registrar refusal);
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidArgument { .. } | Self::CredentialValidation(_) => true,
            Self::Provider(e) => e.is_expected(),
        }
    }

    /// Log at the level [`Self::is_expected`] selects and hand the error back.
    pub(crate) fn logged(self) -> Self {
        if self.is_expected() {
            log::warn!("ClientError: {self}");
        } else {
            log::error!("ClientError: {self}");
        }
        self
    }
}

/// Client layer Result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_classification() {
        let rejected = ClientError::from(RegistrarError::RegistrationRejected {
            provider: "enom".to_string(),
            name: "example.com".to_string(),
            reason: "Domain name not available".to_string(),
        });
        assert!(rejected.is_expected());
        assert_eq!(
            rejected.to_string(),
            "[enom] Registration of 'example.com' rejected: Domain name not available"
        );

        let network = ClientError::from(RegistrarError::NetworkError {
            provider: "enom".to_string(),
            detail: "connection reset".to_string(),
        });
        assert!(!network.is_expected());
    }

    #[test]
    fn invalid_argument_is_expected() {
        let err = ClientError::InvalidArgument {
            param: "name".to_string(),
            detail: "must not be empty".to_string(),
        };
        assert!(err.is_expected());
        assert_eq!(err.to_string(), "Invalid argument 'name': must not be empty");
    }
}
