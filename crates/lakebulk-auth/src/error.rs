//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while resolving credentials from a connection string.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A connection string segment could not be parsed as `key=value`.
    #[error("malformed connection string segment: {0:?}")]
    MalformedConnectionString(String),

    /// The string mentioned authentication but no `Authentication` key parsed.
    ///
    /// This is the degenerate case where the substring appears only inside
    /// a value (e.g. a password), so there is no entry to resolve.
    #[error("connection string contains 'authentication' but no Authentication key")]
    MissingAuthenticationEntry,

    /// Token acquisition failed for the selected method.
    #[error("failed to acquire token for {method}: {cause}")]
    CredentialAcquisition {
        /// Name of the authentication method that was being resolved.
        method: &'static str,
        /// Underlying provider failure.
        cause: String,
    },

    /// The provider does not implement the requested method.
    #[error("unsupported authentication method: {0}")]
    UnsupportedMethod(&'static str),

    /// Azure identity error.
    #[cfg(feature = "azure-identity")]
    #[error("Azure identity error: {0}")]
    AzureIdentity(String),
}
