//! Connection string preparation.
//!
//! This is the single externally observable contract of the crate: turn
//! a raw `(connection string, optional token)` pair into a sanitized
//! string plus the effective bearer token, resolving the `Authentication`
//! key through a [`TokenProvider`] when needed.

use crate::connection_string::ConnectionString;
use crate::error::AuthError;
use crate::method::AuthMethod;
use crate::provider::TokenProvider;

/// The outcome of preparing a connection string.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    /// Connection string with authentication-selection keys removed,
    /// safe to hand to the lower-level engine.
    pub connection_string: String,
    /// Bearer token to pass alongside the string, if one was resolved.
    ///
    /// When this is `Some`, the string is guaranteed not to contain an
    /// `Authentication` entry.
    pub token: Option<String>,
}

impl std::fmt::Debug for ResolvedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConnection")
            .field("connection_string", &self.connection_string)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Resolve the `Authentication` key of `connection_string` into a
/// sanitized string and an effective bearer token.
///
/// Fast path: a string that nowhere contains the substring
/// `authentication` (any case) is returned verbatim together with the
/// input token, without parsing.
///
/// Otherwise the string is parsed, the `Authentication` entry is removed,
/// and its value selects the credential strategy:
///
/// - `SqlPassword` returns the sanitized string with no token. Any
///   caller-supplied token is deliberately discarded; password auth must
///   never carry a stale bearer token.
/// - An unrecognized value returns the sanitized string and the input
///   token unchanged.
/// - The Active Directory methods await one token acquisition from
///   `provider`; managed identity additionally consumes a `User` /
///   `MsiClientId` entry as the client id.
///
/// Resolution happens fresh on every call; nothing is cached. On any
/// failure no partial result is produced.
///
/// # Errors
///
/// [`AuthError::MalformedConnectionString`] for an unparseable segment,
/// [`AuthError::MissingAuthenticationEntry`] when the substring matched
/// but no `Authentication` key exists, and
/// [`AuthError::CredentialAcquisition`] when the provider fails.
pub async fn prepare_connection_string<P: TokenProvider>(
    connection_string: &str,
    aad_token: Option<String>,
    provider: &P,
) -> Result<ResolvedConnection, AuthError> {
    if !connection_string.to_lowercase().contains("authentication") {
        return Ok(ResolvedConnection {
            connection_string: connection_string.to_string(),
            token: aad_token,
        });
    }

    let mut entries = ConnectionString::parse(connection_string)?;
    let idx = entries
        .position("authentication")
        .ok_or(AuthError::MissingAuthenticationEntry)?;
    let auth_entry = entries.remove(idx);

    let method = AuthMethod::resolve(&auth_entry.value, &mut entries);
    let token = match &method {
        AuthMethod::Password => None,
        AuthMethod::Unspecified => aad_token,
        _ => {
            let token = provider.acquire_token(&method).await.map_err(|e| {
                AuthError::CredentialAcquisition {
                    method: method.name(),
                    cause: e.to_string(),
                }
            })?;
            Some(token)
        }
    };

    Ok(ResolvedConnection {
        connection_string: entries.to_string(),
        token,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Provider that hands out a fixed token and counts acquisitions.
    struct FixedTokenProvider {
        token: &'static str,
        calls: AtomicUsize,
    }

    impl FixedTokenProvider {
        fn new(token: &'static str) -> Self {
            Self {
                token,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TokenProvider for FixedTokenProvider {
        async fn acquire_token(&self, _method: &AuthMethod) -> Result<String, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.token.to_string())
        }
    }

    struct FailingProvider;

    impl TokenProvider for FailingProvider {
        async fn acquire_token(&self, method: &AuthMethod) -> Result<String, AuthError> {
            Err(AuthError::CredentialAcquisition {
                method: method.name(),
                cause: "identity endpoint unreachable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn fast_path_returns_input_verbatim() {
        let provider = FixedTokenProvider::new("unused");
        let resolved = prepare_connection_string(
            "Server=x;Database=y",
            Some("tok".to_string()),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(resolved.connection_string, "Server=x;Database=y");
        assert_eq!(resolved.token.as_deref(), Some("tok"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn sql_password_strips_entry_and_discards_token() {
        let provider = FixedTokenProvider::new("unused");
        let resolved = prepare_connection_string(
            "Server=x;Authentication=SqlPassword;Database=y",
            Some("stale".to_string()),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(resolved.connection_string, "Server=x;Database=y");
        assert_eq!(resolved.token, None);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn default_method_acquires_token() {
        let provider = FixedTokenProvider::new("tok123");
        let resolved = prepare_connection_string(
            "Server=x;Authentication=ActiveDirectoryDefault",
            None,
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(resolved.connection_string, "Server=x");
        assert_eq!(resolved.token.as_deref(), Some("tok123"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn managed_identity_consumes_user_entry() {
        let provider = FixedTokenProvider::new("mi-token");
        let resolved = prepare_connection_string(
            "Authentication=ActiveDirectoryManagedIdentity;User=abc;Server=x",
            None,
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(resolved.connection_string, "Server=x");
        assert_eq!(resolved.token.as_deref(), Some("mi-token"));
    }

    #[tokio::test]
    async fn unrecognized_value_passes_token_through() {
        let provider = FixedTokenProvider::new("unused");
        let resolved = prepare_connection_string(
            "Server=x;Authentication=Bogus",
            Some("keep-me".to_string()),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(resolved.connection_string, "Server=x");
        assert_eq!(resolved.token.as_deref(), Some("keep-me"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn substring_in_value_only_is_an_error() {
        let provider = FixedTokenProvider::new("unused");
        let err = prepare_connection_string(
            "Server=x;Password=authentication1",
            None,
            &provider,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingAuthenticationEntry));
    }

    #[tokio::test]
    async fn provider_failure_aborts_preparation() {
        let err = prepare_connection_string(
            "Server=x;Authentication=ActiveDirectoryDefault",
            None,
            &FailingProvider,
        )
        .await
        .unwrap_err();
        match err {
            AuthError::CredentialAcquisition { method, cause } => {
                assert_eq!(method, "ActiveDirectoryDefault");
                assert!(cause.contains("identity endpoint unreachable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_segment_surfaces_before_resolution() {
        let provider = FixedTokenProvider::new("unused");
        let err = prepare_connection_string(
            "Server=x;Authentication=ActiveDirectoryDefault;oops",
            None,
            &provider,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::MalformedConnectionString(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn resolved_connection_debug_redacts_token() {
        let resolved = ResolvedConnection {
            connection_string: "Server=x".to_string(),
            token: Some("secret-token".to_string()),
        };
        let debug = format!("{resolved:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
