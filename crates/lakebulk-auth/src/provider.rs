//! Token provider capability trait.

use crate::error::AuthError;
use crate::method::AuthMethod;

/// Capability for acquiring bearer tokens on behalf of a resolved
/// authentication method.
///
/// The connection-string preparer calls this exactly once per resolution
/// when the method requires a token; it never retries and never caches.
/// Caching, refresh, and backoff are the provider's (or the identity
/// SDK's) concern.
///
/// Implementations are supplied by the application layer, which keeps
/// this crate free of any mandatory identity-provider dependency. With
/// the `azure-identity` feature, [`crate::AzureTokenProvider`] offers a
/// ready-made implementation.
#[allow(async_fn_in_trait)]
pub trait TokenProvider: Send + Sync {
    /// Acquire a bearer token for `method`.
    ///
    /// Called only for methods where [`AuthMethod::requests_token`] is
    /// true; the client id for managed identity travels inside the
    /// method variant.
    async fn acquire_token(&self, method: &AuthMethod) -> Result<String, AuthError>;
}
