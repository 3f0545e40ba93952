//! ADO.NET-style connection string codec.
//!
//! A connection string is a sequence of semicolon-delimited `key=value`
//! segments. Keys are case-insensitive; values are opaque and may
//! themselves contain `=` (base64 tokens, passwords), so segments are
//! split on the first `=` only.

use crate::error::AuthError;

/// A single `key=value` pair from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStringEntry {
    /// Key, with original casing preserved.
    pub key: String,
    /// Value, verbatim.
    pub value: String,
}

/// An ordered collection of connection string entries.
///
/// Parsing preserves the original entry order; serialization via
/// [`std::fmt::Display`] re-joins the remaining entries in that order,
/// so `parse` followed by `to_string` reproduces the input pairs when
/// nothing was removed.
#[derive(Debug, Clone, Default)]
pub struct ConnectionString {
    entries: Vec<ConnectionStringEntry>,
}

impl ConnectionString {
    /// Parse a semicolon-delimited connection string.
    ///
    /// Empty segments (e.g. a trailing `;`) are skipped. A non-empty
    /// segment without `=` is an error.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        let mut entries = Vec::new();
        for segment in s.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| AuthError::MalformedConnectionString(segment.to_string()))?;
            entries.push(ConnectionStringEntry {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// The parsed entries, in original order.
    #[must_use]
    pub fn entries(&self) -> &[ConnectionStringEntry] {
        &self.entries
    }

    /// Position of the first entry whose key matches `key`, ignoring case.
    ///
    /// Duplicate keys are tolerated; the first occurrence wins.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key.eq_ignore_ascii_case(key))
    }

    /// Position of the first entry whose key matches any of `keys`.
    #[must_use]
    pub fn position_of_any(&self, keys: &[&str]) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| keys.iter().any(|k| e.key.eq_ignore_ascii_case(k)))
    }

    /// Remove and return the entry at `index`.
    ///
    /// Removal is by position rather than by key so that, in the presence
    /// of duplicate keys, exactly the matched entry is removed.
    pub fn remove(&mut self, index: usize) -> ConnectionStringEntry {
        self.entries.remove(index)
    }
}

impl std::fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}={}", entry.key, entry.value)?;
        }
        Ok(())
    }
}
