//! Azure token provider backed by the `azure_identity` crate.
//!
//! Maps the connection-string authentication methods onto Azure SDK
//! credentials:
//!
//! - `ActiveDirectoryDefault` uses [`DeveloperToolsCredential`], which
//!   tries Azure CLI, Azure Developer CLI, and Azure PowerShell logins
//!   in order.
//! - `ActiveDirectoryMSI` / `ActiveDirectoryManagedIdentity` uses
//!   [`ManagedIdentityCredential`], with the user-assigned client id
//!   when one was present in the connection string.
//!
//! The Rust Azure SDK does not ship an interactive browser credential,
//! so `ActiveDirectoryInteractive` is reported as unsupported here;
//! applications needing that flow supply their own [`TokenProvider`].

use std::borrow::Cow;
use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_identity::{
    DeveloperToolsCredential, ManagedIdentityCredential, ManagedIdentityCredentialOptions,
    UserAssignedId,
};

use crate::error::AuthError;
use crate::method::AuthMethod;
use crate::provider::TokenProvider;

/// The Azure SQL Database scope for token requests.
const AZURE_SQL_SCOPE: &str = "https://database.windows.net/.default";

/// [`TokenProvider`] implementation using Azure SDK credentials.
///
/// Credentials are constructed fresh on every acquisition; tokens may
/// expire between bulk loads, and the SDK handles any caching worth
/// having. The provider itself carries no mutable state.
#[derive(Clone)]
pub struct AzureTokenProvider {
    scope: Cow<'static, str>,
}

impl AzureTokenProvider {
    /// Create a provider requesting tokens for the Azure SQL scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: Cow::Borrowed(AZURE_SQL_SCOPE),
        }
    }

    /// Override the token scope.
    ///
    /// The default is `https://database.windows.net/.default`, which is
    /// appropriate for Azure SQL Database and Synapse.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<Cow<'static, str>>) -> Self {
        self.scope = scope.into();
        self
    }

    fn credential_for(&self, method: &AuthMethod) -> Result<Arc<dyn TokenCredential>, AuthError> {
        match method {
            AuthMethod::Default => {
                let credential = DeveloperToolsCredential::new(None)
                    .map_err(|e| AuthError::AzureIdentity(e.to_string()))?;
                Ok(credential as Arc<dyn TokenCredential>)
            }
            AuthMethod::ManagedIdentity { client_id } => {
                let options = client_id.as_ref().map(|id| ManagedIdentityCredentialOptions {
                    user_assigned_id: Some(UserAssignedId::ClientId(id.clone())),
                    ..Default::default()
                });
                let credential = ManagedIdentityCredential::new(options)
                    .map_err(|e| AuthError::AzureIdentity(e.to_string()))?;
                Ok(credential as Arc<dyn TokenCredential>)
            }
            AuthMethod::Interactive => Err(AuthError::UnsupportedMethod(
                "ActiveDirectoryInteractive requires a caller-supplied TokenProvider",
            )),
            AuthMethod::Password | AuthMethod::Unspecified => {
                Err(AuthError::UnsupportedMethod(method.name()))
            }
        }
    }
}

impl Default for AzureTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AzureTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureTokenProvider")
            .field("scope", &self.scope)
            .finish()
    }
}

impl TokenProvider for AzureTokenProvider {
    async fn acquire_token(&self, method: &AuthMethod) -> Result<String, AuthError> {
        let credential = self.credential_for(method)?;
        tracing::debug!(method = method.name(), "requesting Azure AD token");
        let token = credential
            .get_token(&[&self.scope], None)
            .await
            .map_err(|e| AuthError::AzureIdentity(e.to_string()))?;
        Ok(token.token.secret().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn interactive_is_reported_unsupported() {
        let provider = AzureTokenProvider::new();
        let result = provider.credential_for(&AuthMethod::Interactive);
        assert!(matches!(result, Err(AuthError::UnsupportedMethod(_))));
    }

    #[test]
    fn password_never_reaches_a_credential() {
        let provider = AzureTokenProvider::new();
        let result = provider.credential_for(&AuthMethod::Password);
        assert!(matches!(result, Err(AuthError::UnsupportedMethod(_))));
    }

    #[test]
    fn scope_override() {
        let provider = AzureTokenProvider::new().with_scope("https://custom.scope/.default");
        assert_eq!(provider.scope, "https://custom.scope/.default");
    }

    // Live acquisition needs an Azure environment; run manually with
    // cargo test --features azure-identity -- --ignored
    #[tokio::test]
    #[ignore = "requires Azure managed identity environment"]
    async fn managed_identity_acquires_token() {
        let provider = AzureTokenProvider::new();
        let token = provider
            .acquire_token(&AuthMethod::ManagedIdentity { client_id: None })
            .await
            .expect("failed to get token");
        assert!(!token.is_empty());
    }
}
