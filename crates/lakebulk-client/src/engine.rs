//! External engine interface.
//!
//! The byte-level bulk-insert wire protocol and the Arrow stream decoding
//! live behind [`SqlEngine`]. This crate orchestrates credential
//! resolution and connection lifecycle around it; the engine owns the
//! transport, the TDS details, and the transactional behavior of a
//! failed load.

use arrow::array::RecordBatchReader;
use arrow::datatypes::Schema;
use serde::Serialize;

use crate::error::Error;

/// A boxed columnar batch source for the in-process bulk-load path.
pub type BatchReader = Box<dyn RecordBatchReader + Send>;

/// A SQL statement parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer value.
    I64(i64),
    /// 64-bit float value.
    F64(f64),
    /// String value.
    String(String),
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// A materialized result set from [`SqlEngine::execute_with_result`].
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column `(name, type)` pairs, in select order.
    pub columns: Vec<(String, String)>,
    /// Row values, one `Vec` per row.
    pub rows: Vec<Vec<SqlParam>>,
}

/// One column of the schema accepted by a bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkInfoField {
    /// Destination column name.
    pub name: String,
    /// Arrow type of the source data, rendered as text.
    pub arrow_type: String,
}

/// Schema description returned by a completed bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkInfo {
    /// The inserted columns in stream order.
    pub fields: Vec<BulkInfoField>,
}

impl From<&Schema> for BulkInfo {
    fn from(schema: &Schema) -> Self {
        Self {
            fields: schema
                .fields()
                .iter()
                .map(|f| BulkInfoField {
                    name: f.name().clone(),
                    arrow_type: f.data_type().to_string(),
                })
                .collect(),
        }
    }
}

/// HTTP basic-auth credentials for fetching a remote columnar stream.
#[derive(Clone)]
pub struct BasicAuth {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl BasicAuth {
    /// Create basic-auth credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The lower-level SQL Server engine this crate drives.
///
/// Implementations own the TDS session handling, SQL execution, and the
/// Arrow-decoding bulk-insert primitives. All connection strings passed
/// in are already sanitized: authentication-selection keys have been
/// resolved into the separate bearer `token` argument.
///
/// An empty `column_names` slice means "all destination columns in table
/// order"; a non-empty slice overrides the destination column
/// ordering/naming.
#[allow(async_fn_in_trait)]
pub trait SqlEngine: Send + Sync {
    /// An open session handle. Exclusively owned by one [`crate::Connection`].
    type Session: Send;

    /// Establish a session with the sanitized connection string and
    /// optional bearer token.
    async fn connect_session(
        &self,
        connection_string: &str,
        token: Option<&str>,
    ) -> Result<Self::Session, Error>;

    /// Release a session handle, closing its transport.
    fn release_session(&self, session: Self::Session);

    /// Execute a statement, returning the affected-row count.
    async fn execute(
        &self,
        session: &mut Self::Session,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<u64, Error>;

    /// Execute a statement and materialize its result set.
    async fn execute_with_result(
        &self,
        session: &mut Self::Session,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<QueryResult, Error>;

    /// Fetch the columnar stream at `url` and bulk-load it into `table_name`.
    async fn bulk_insert_from_url(
        &self,
        connection_string: &str,
        table_name: &str,
        column_names: &[String],
        url: &str,
        basic_auth: &BasicAuth,
        token: Option<&str>,
    ) -> Result<BulkInfo, Error>;

    /// Bulk-load batches from an in-process reader into `table_name`.
    async fn bulk_insert_from_reader(
        &self,
        connection_string: &str,
        table_name: &str,
        reader: BatchReader,
        column_names: &[String],
        token: Option<&str>,
    ) -> Result<BulkInfo, Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arrow::datatypes::{DataType, Field};

    use super::*;

    #[test]
    fn bulk_info_from_schema() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]);
        let info = BulkInfo::from(&schema);
        assert_eq!(info.fields.len(), 2);
        assert_eq!(info.fields[0].name, "id");
        assert_eq!(info.fields[0].arrow_type, "Int64");
        assert_eq!(info.fields[1].name, "name");
        assert_eq!(info.fields[1].arrow_type, "Utf8");
    }

    #[test]
    fn basic_auth_debug_redacts_password() {
        let auth = BasicAuth::new("svc", "hunter2");
        let debug = format!("{auth:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn sql_param_conversions() {
        assert_eq!(SqlParam::from(1i64), SqlParam::I64(1));
        assert_eq!(SqlParam::from(true), SqlParam::Bool(true));
        assert_eq!(SqlParam::from("x"), SqlParam::String("x".to_string()));
    }
}
