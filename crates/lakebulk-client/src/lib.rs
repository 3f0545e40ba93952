//! # lakebulk-client
//!
//! Connection lifecycle and Arrow bulk-load orchestration for SQL Server.
//!
//! This crate sits between an application streaming columnar data and a
//! lower-level SQL Server engine. It resolves connection-string
//! authentication (via `lakebulk-auth`), owns the scoped [`Connection`]
//! resource, and exposes the two bulk-load entry points: one for an
//! HTTP-delivered Arrow stream, one for an in-process batch reader.
//!
//! The wire protocol and Arrow decoding are out of scope here; they live
//! behind the [`SqlEngine`] trait, which applications implement over
//! their TDS engine of choice.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lakebulk_auth::AzureTokenProvider;
//! use lakebulk_client::{BasicAuth, insert_from_http_stream};
//!
//! let provider = AzureTokenProvider::new();
//! let info = insert_from_http_stream(
//!     &engine,
//!     &provider,
//!     "Server=lake.database.windows.net;Authentication=ActiveDirectoryDefault;Database=dw",
//!     "dbo.events",
//!     "https://lakeapi.example.com/exports/events",
//!     &BasicAuth::new("svc-export", password),
//!     None,
//!     &[],
//! )
//! .await?;
//!
//! for field in &info.fields {
//!     println!("inserted column {} ({})", field.name, field.arrow_type);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod bulk;
pub mod connection;
pub mod engine;
pub mod error;

pub use bulk::{insert_from_batch_reader, insert_from_http_stream};
pub use connection::Connection;
pub use engine::{BasicAuth, BatchReader, BulkInfo, BulkInfoField, QueryResult, SqlEngine, SqlParam};
pub use error::Error;
pub use lakebulk_auth::{AuthError, AuthMethod, ResolvedConnection, TokenProvider};
