//! Scoped connection resource.

use lakebulk_auth::{TokenProvider, prepare_connection_string};

use crate::engine::{QueryResult, SqlEngine, SqlParam};
use crate::error::Error;

/// An open SQL Server connection.
///
/// A `Connection` exclusively owns one engine session for its lifetime.
/// The session is a single logical channel: one statement at a time, no
/// internal locking. Callers needing concurrent work open distinct
/// connections.
///
/// The session handle is released exactly once, whether the connection
/// is closed explicitly or dropped on any exit path. Closing an
/// already-closed connection is a no-op; operations on a closed
/// connection fail with [`Error::ConnectionClosed`].
pub struct Connection<'e, E: SqlEngine> {
    engine: &'e E,
    session: Option<E::Session>,
}

impl<'e, E: SqlEngine> Connection<'e, E> {
    /// Resolve credentials and open a session.
    ///
    /// The connection string is prepared fresh on every call (tokens may
    /// expire between opens), then handed to the engine together with the
    /// resolved bearer token.
    ///
    /// # Errors
    ///
    /// Credential resolution failures surface as [`Error::Auth`]; engine
    /// transport or login failures as the engine's connection error.
    pub async fn open<P: TokenProvider>(
        engine: &'e E,
        provider: &P,
        connection_string: &str,
        aad_token: Option<String>,
    ) -> Result<Self, Error> {
        let resolved = prepare_connection_string(connection_string, aad_token, provider).await?;
        let session = engine
            .connect_session(&resolved.connection_string, resolved.token.as_deref())
            .await?;
        tracing::debug!("session opened");
        Ok(Self {
            engine,
            session: Some(session),
        })
    }

    /// Execute a statement, returning the affected-row count.
    pub async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<u64, Error> {
        let session = self.session.as_mut().ok_or(Error::ConnectionClosed)?;
        self.engine.execute(session, sql, params).await
    }

    /// Execute a statement and materialize its result set.
    pub async fn execute_with_result(
        &mut self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<QueryResult, Error> {
        let session = self.session.as_mut().ok_or(Error::ConnectionClosed)?;
        self.engine.execute_with_result(session, sql, params).await
    }

    /// Whether the connection still holds its session.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Release the underlying session.
    ///
    /// Idempotent; also invoked on drop.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            self.engine.release_session(session);
            tracing::debug!("session released");
        }
    }
}

impl<E: SqlEngine> Drop for Connection<'_, E> {
    fn drop(&mut self) {
        self.close();
    }
}
