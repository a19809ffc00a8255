//! Snapshot data model.
//!
//! Records serialize as positional JSON arrays and the snapshot as an
//! object keyed by table kind:
//!
//! ```json
//! {
//!   "dev": [[1724832000.5, "lo"], [1724832000.5, "eth0"]],
//!   "tcpipv4": [[1724832000.5, "0", "127.0.0.1:8080", "0.0.0.0:0", "0A(LISTEN)"]]
//! }
//! ```

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeTuple, Serializer};

use crate::error::Result;
use crate::table::TableKind;

/// One decoded socket table row. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SocketRecord {
    /// Capture instant, UNIX seconds. Identical for every record of one
    /// snapshot.
    pub captured_at: f64,
    /// Table-local row identifier (the `sl` column, separator stripped).
    pub slot: String,
    /// Local endpoint, `"host:port"`.
    pub local: String,
    /// Remote endpoint, `"host:port"`.
    pub remote: String,
    /// Decoded connection state label.
    pub state: String,
}

impl Serialize for SocketRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(5)?;
        tup.serialize_element(&self.captured_at)?;
        tup.serialize_element(&self.slot)?;
        tup.serialize_element(&self.local)?;
        tup.serialize_element(&self.remote)?;
        tup.serialize_element(&self.state)?;
        tup.end()
    }
}

/// One row of the device table. Only the interface name is surfaced; the
/// byte/packet counters are not part of the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    /// Capture instant, UNIX seconds.
    pub captured_at: f64,
    /// Interface name (separator stripped).
    pub interface: String,
}

impl Serialize for DeviceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.captured_at)?;
        tup.serialize_element(&self.interface)?;
        tup.end()
    }
}

/// The records of one table, in source row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Records {
    /// Socket-style table rows.
    Sockets(Vec<SocketRecord>),
    /// Device table rows.
    Devices(Vec<DeviceRecord>),
}

impl Records {
    /// Number of records in this table.
    pub fn len(&self) -> usize {
        match self {
            Self::Sockets(v) => v.len(),
            Self::Devices(v) => v.len(),
        }
    }

    /// Check whether the table had no data rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete, timestamped result of one sampling pass.
///
/// Holds one entry per table kind actually captured, in capture order.
/// Serializes as a JSON object keyed by [`TableKind::key`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    tables: Vec<(TableKind, Records)>,
}

impl Snapshot {
    pub(crate) fn push(&mut self, kind: TableKind, records: Records) {
        self.tables.push((kind, records));
    }

    /// Iterate over captured tables in capture order.
    pub fn tables(&self) -> impl Iterator<Item = (TableKind, &Records)> {
        self.tables.iter().map(|(kind, records)| (*kind, records))
    }

    /// Get the records of one table, if it was captured.
    pub fn get(&self, kind: TableKind) -> Option<&Records> {
        self.tables
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, records)| records)
    }

    /// Get the socket records of one table, if it was captured and is a
    /// socket-style table.
    pub fn sockets(&self, kind: TableKind) -> Option<&[SocketRecord]> {
        match self.get(kind)? {
            Records::Sockets(v) => Some(v),
            Records::Devices(_) => None,
        }
    }

    /// Get the device records, if the device table was captured.
    pub fn devices(&self) -> Option<&[DeviceRecord]> {
        match self.get(TableKind::Dev)? {
            Records::Devices(v) => Some(v),
            Records::Sockets(_) => None,
        }
    }

    /// Number of captured tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check whether no tables were captured.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (kind, records) in &self.tables {
            map.serialize_entry(kind, records)?;
        }
        map.end()
    }
}
