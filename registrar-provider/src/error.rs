use serde::{Deserialize, Serialize};

/// One error entry as reported by a registrar (`Err1`, `Err2`, ... in Enom responses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderErrorEntry {
    /// Registrar-side key or code for the entry, if any.
    pub code: Option<String>,
    /// Human-readable message supplied by the registrar.
    pub message: String,
}

/// Unified error type for all registrar adapter operations.
///
/// Each variant includes a `provider` field identifying which adapter produced the error.
/// All variants are serializable for structured error reporting.
///
/// # Retries
///
/// Nothing in this crate retries. Registrar operations (purchase in particular)
/// are not idempotent, so every failure is surfaced to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RegistrarError {
    /// The backend returned no parseable response body.
    TransportEmptyResponse {
        /// Provider that produced the error.
        provider: String,
    },

    /// The response was well formed but reported a non-zero error count.
    ProviderProtocolError {
        /// Provider that produced the error.
        provider: String,
        /// All provider messages joined with `", "`.
        message: String,
        /// The raw error collection, in response order.
        errors: Vec<ProviderErrorEntry>,
    },

    /// A name server or domain lookup found nothing.
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// What was looked up (host name or domain name).
        resource: String,
    },

    /// The registrar explicitly refused a purchase or name server registration.
    RegistrationRejected {
        /// Provider that produced the error.
        provider: String,
        /// Name that was being registered.
        name: String,
        /// Reason text supplied by the registrar.
        reason: String,
    },

    /// A request argument is invalid before anything is sent.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The response body could not be decoded, or a required field was missing.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl RegistrarError {
    /// Whether the error is an expected registry outcome rather than an infrastructure failure.
    ///
    /// Used for log levels: `true` logs at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ProviderProtocolError { .. }
                | Self::NotFound { .. }
                | Self::RegistrationRejected { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Provider identifier carried by every variant.
    pub fn provider(&self) -> &str {
        match self {
            Self::TransportEmptyResponse { provider }
            | Self::ProviderProtocolError { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::RegistrationRejected { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for RegistrarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransportEmptyResponse { provider } => {
                write!(f, "[{provider}] Response from registrar was empty")
            }
            Self::ProviderProtocolError {
                provider, message, ..
            } => {
                write!(f, "[{provider}] {message}")
            }
            Self::NotFound { provider, resource } => {
                write!(f, "[{provider}] '{resource}' not found")
            }
            Self::RegistrationRejected {
                provider,
                name,
                reason,
            } => {
                write!(f, "[{provider}] Registration of '{name}' rejected: {reason}")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for RegistrarError {}

/// Convenience type alias for `Result<T, RegistrarError>`.
pub type Result<T> = std::result::Result<T, RegistrarError>;
