//! Bulk-load entry points.
//!
//! Both entry points follow the same two-step shape: resolve the
//! connection string's authentication method (one possible suspension
//! for token acquisition), then make exactly one call into the engine's
//! bulk-insert primitive. Failures surface unchanged; whether a failed
//! load left rows behind is the engine's transactional concern.

use lakebulk_auth::{TokenProvider, prepare_connection_string};

use crate::engine::{BasicAuth, BatchReader, BulkInfo, SqlEngine};
use crate::error::Error;

/// Bulk-load an HTTP-delivered columnar stream into `table_name`.
///
/// The engine fetches `source_url` (authenticated with `basic_auth`),
/// decodes the Arrow stream, and performs the load. An empty
/// `column_names` slice loads all destination columns in table order.
///
/// Returns the schema the engine inserted.
#[allow(clippy::too_many_arguments)]
pub async fn insert_from_http_stream<E: SqlEngine, P: TokenProvider>(
    engine: &E,
    provider: &P,
    connection_string: &str,
    table_name: &str,
    source_url: &str,
    basic_auth: &BasicAuth,
    aad_token: Option<String>,
    column_names: &[String],
) -> Result<BulkInfo, Error> {
    let resolved = prepare_connection_string(connection_string, aad_token, provider).await?;
    tracing::info!(table_name, source_url, "starting bulk load from http stream");
    let info = engine
        .bulk_insert_from_url(
            &resolved.connection_string,
            table_name,
            column_names,
            source_url,
            basic_auth,
            resolved.token.as_deref(),
        )
        .await?;
    tracing::info!(table_name, columns = info.fields.len(), "bulk load finished");
    Ok(info)
}

/// Bulk-load batches from an in-process reader into `table_name`.
///
/// Same contract as [`insert_from_http_stream`], with an already-open
/// columnar source instead of a remote stream.
pub async fn insert_from_batch_reader<E: SqlEngine, P: TokenProvider>(
    engine: &E,
    provider: &P,
    connection_string: &str,
    table_name: &str,
    reader: BatchReader,
    column_names: &[String],
    aad_token: Option<String>,
) -> Result<BulkInfo, Error> {
    let resolved = prepare_connection_string(connection_string, aad_token, provider).await?;
    tracing::info!(table_name, "starting bulk load from batch reader");
    let info = engine
        .bulk_insert_from_reader(
            &resolved.connection_string,
            table_name,
            reader,
            column_names,
            resolved.token.as_deref(),
        )
        .await?;
    tracing::info!(table_name, columns = info.fields.len(), "bulk load finished");
    Ok(info)
}
