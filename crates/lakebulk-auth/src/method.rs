//! Authentication method resolution.

use crate::connection_string::ConnectionString;

/// The credential strategy selected by a connection string's
/// `Authentication` value.
///
/// Exactly one variant is selected per connection string. Values are
/// matched case-insensitively against the fixed ADO.NET vocabulary;
/// anything unknown resolves to [`AuthMethod::Unspecified`], which is a
/// defined pass-through rather than an error (SQL connection string
/// tooling tolerates keys it does not understand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// `ActiveDirectoryDefault` - token via the default credential chain.
    Default,
    /// `ActiveDirectoryMSI` / `ActiveDirectoryManagedIdentity` - token via
    /// platform managed identity, optionally disambiguated by a client id.
    ManagedIdentity {
        /// Client id of a user-assigned identity, taken from a `User` or
        /// `MsiClientId` entry when present.
        client_id: Option<String>,
    },
    /// `ActiveDirectoryInteractive` - token via an interactive browser flow.
    Interactive,
    /// `SqlPassword` - password authentication, no token involved.
    Password,
    /// Unrecognized value - no credential, entries pass through unchanged.
    Unspecified,
}

impl AuthMethod {
    /// Resolve an `Authentication` value against the remaining entries.
    ///
    /// The `Authentication` entry itself must already have been removed
    /// from `entries`. Managed-identity resolution additionally consumes
    /// the first `User` or `MsiClientId` entry as the client id, so it
    /// does not leak into the sanitized string.
    pub fn resolve(value: &str, entries: &mut ConnectionString) -> Self {
        let method = match value.to_lowercase().as_str() {
            "activedirectorydefault" => Self::Default,
            "activedirectorymsi" | "activedirectorymanagedidentity" => {
                let client_id = entries
                    .position_of_any(&["user", "msiclientid"])
                    .map(|idx| entries.remove(idx).value);
                Self::ManagedIdentity { client_id }
            }
            "activedirectoryinteractive" => Self::Interactive,
            "sqlpassword" => Self::Password,
            _ => Self::Unspecified,
        };
        tracing::debug!(value, method = method.name(), "resolved authentication method");
        method
    }

    /// Whether this method requires acquiring a bearer token.
    #[must_use]
    pub fn requests_token(&self) -> bool {
        matches!(
            self,
            Self::Default | Self::ManagedIdentity { .. } | Self::Interactive
        )
    }

    /// Stable method name for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "ActiveDirectoryDefault",
            Self::ManagedIdentity { .. } => "ActiveDirectoryManagedIdentity",
            Self::Interactive => "ActiveDirectoryInteractive",
            Self::Password => "SqlPassword",
            Self::Unspecified => "Unspecified",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn no_entries() -> ConnectionString {
        ConnectionString::default()
    }

    #[test]
    fn vocabulary_matches_are_case_insensitive() {
        assert_eq!(
            AuthMethod::resolve("activedirectorydefault", &mut no_entries()),
            AuthMethod::Default
        );
        assert_eq!(
            AuthMethod::resolve("ActiveDirectoryInteractive", &mut no_entries()),
            AuthMethod::Interactive
        );
        assert_eq!(
            AuthMethod::resolve("SQLPASSWORD", &mut no_entries()),
            AuthMethod::Password
        );
    }

    #[test]
    fn msi_aliases_both_resolve_to_managed_identity() {
        for value in ["ActiveDirectoryMSI", "ActiveDirectoryManagedIdentity"] {
            let method = AuthMethod::resolve(value, &mut no_entries());
            assert_eq!(method, AuthMethod::ManagedIdentity { client_id: None });
        }
    }

    #[test]
    fn managed_identity_consumes_user_entry() {
        let mut entries = ConnectionString::parse("Server=x;User=abc").unwrap();
        let method = AuthMethod::resolve("ActiveDirectoryManagedIdentity", &mut entries);
        assert_eq!(
            method,
            AuthMethod::ManagedIdentity {
                client_id: Some("abc".to_string())
            }
        );
        assert_eq!(entries.to_string(), "Server=x");
    }

    #[test]
    fn managed_identity_accepts_msiclientid_entry() {
        let mut entries = ConnectionString::parse("MsiClientId=id-1;Server=x").unwrap();
        let method = AuthMethod::resolve("ActiveDirectoryMSI", &mut entries);
        assert_eq!(
            method,
            AuthMethod::ManagedIdentity {
                client_id: Some("id-1".to_string())
            }
        );
        assert_eq!(entries.to_string(), "Server=x");
    }

    #[test]
    fn no_partial_matches() {
        assert_eq!(
            AuthMethod::resolve("ActiveDirectory", &mut no_entries()),
            AuthMethod::Unspecified
        );
        assert_eq!(
            AuthMethod::resolve("Bogus", &mut no_entries()),
            AuthMethod::Unspecified
        );
    }

    #[test]
    fn token_requirement_per_method() {
        assert!(AuthMethod::Default.requests_token());
        assert!(AuthMethod::Interactive.requests_token());
        assert!(AuthMethod::ManagedIdentity { client_id: None }.requests_token());
        assert!(!AuthMethod::Password.requests_token());
        assert!(!AuthMethod::Unspecified.requests_token());
    }
}
