//! # lakebulk-auth
//!
//! Connection-string parsing and credential resolution for SQL Server
//! bulk loading.
//!
//! SQL Server connection strings can carry an `Authentication` key that
//! selects how the client should prove its identity. The lower-level TDS
//! engine does not understand that key; it expects either a plain
//! password-based connection string or a pre-acquired bearer token passed
//! alongside the string. This crate bridges the two worlds: it resolves
//! the `Authentication` key into a concrete credential strategy, acquires
//! a token when one is needed, and hands back a sanitized connection
//! string the engine can consume directly.
//!
//! ## Supported Authentication Values
//!
//! | Connection string value | Resolution |
//! |-------------------------|------------|
//! | `ActiveDirectoryDefault` | Token via default credential chain |
//! | `ActiveDirectoryMSI` / `ActiveDirectoryManagedIdentity` | Token via managed identity |
//! | `ActiveDirectoryInteractive` | Token via interactive browser flow |
//! | `SqlPassword` | Password auth, no token |
//! | anything else | Pass-through, no token requested |
//!
//! Token acquisition itself is abstracted behind [`TokenProvider`] so the
//! core stays free of any specific identity SDK. A ready-made
//! [`AzureTokenProvider`] backed by the `azure_identity` crate is
//! available behind the `azure-identity` feature.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lakebulk_auth::{AzureTokenProvider, prepare_connection_string};
//!
//! let provider = AzureTokenProvider::new();
//! let resolved = prepare_connection_string(
//!     "Server=myserver.database.windows.net;Authentication=ActiveDirectoryDefault;Database=lake",
//!     None,
//!     &provider,
//! )
//! .await?;
//!
//! // resolved.connection_string no longer contains the Authentication key,
//! // resolved.token carries the acquired bearer token.
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod connection_string;
pub mod error;
pub mod method;
pub mod prepare;
pub mod provider;

#[cfg(feature = "azure-identity")]
pub mod azure_identity_provider;

pub use connection_string::{ConnectionString, ConnectionStringEntry};
pub use error::AuthError;
pub use method::AuthMethod;
pub use prepare::{ResolvedConnection, prepare_connection_string};
pub use provider::TokenProvider;

#[cfg(feature = "azure-identity")]
pub use azure_identity_provider::AzureTokenProvider;
