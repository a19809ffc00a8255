//! Error types for snapshot capture.

use std::io;

use crate::addr::AddrError;
use crate::table::TableKind;

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while capturing a snapshot.
///
/// None of these are retried: the sampler is a point-in-time tool, so the
/// recovery policy is to fail the whole capture and let the caller decide
/// whether to invoke it again.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A kernel table file is missing or unreadable.
    #[error("reading {path}: {source}")]
    Io {
        /// The procfs path that failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An address token does not match the packed hex address:port shape.
    #[error("{kind} table: bad address token {token:?}: {source}")]
    Parse {
        /// The table the token came from.
        kind: TableKind,
        /// The offending token, verbatim.
        token: String,
        /// What was wrong with it.
        #[source]
        source: AddrError,
    },

    /// A table row has too few fields, or a non-address field is malformed.
    #[error("{kind} table: malformed row {fields:?}")]
    RecordFormat {
        /// The table the row came from.
        kind: TableKind,
        /// The whitespace-split fields of the row, verbatim.
        fields: Vec<String>,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a missing-table error (the kernel does not expose
    /// the file, e.g. IPv6 raw sockets disabled).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Get the table kind this error originated from, if any.
    pub fn table_kind(&self) -> Option<TableKind> {
        match self {
            Self::Parse { kind, .. } | Self::RecordFormat { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
