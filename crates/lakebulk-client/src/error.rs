//! Client error types.

use thiserror::Error;

/// Errors that can occur during connection and bulk-load operations.
///
/// Each variant identifies the phase that failed (resolve/acquire-token,
/// connect, execute, bulk-insert) so callers can distinguish
/// configuration errors from transient transport errors without
/// inspecting internals. No variant implies local recovery was attempted;
/// failures surface unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection string parsing or credential resolution failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] lakebulk_auth::AuthError),

    /// The engine could not establish a session.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Operation attempted on a closed connection.
    #[error("connection closed")]
    ConnectionClosed,

    /// SQL execution failed.
    #[error("query failed: {0}")]
    Query(String),

    /// The bulk-insert engine reported a failure.
    ///
    /// Whether any rows landed is determined by the engine's
    /// transactional behavior; this layer attempts no partial-insert
    /// recovery.
    #[error("bulk insert failed: {0}")]
    BulkInsert(String),
}
