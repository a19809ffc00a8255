//! Socket table enumeration and row reading.
//!
//! Each [`TableKind`] names one kernel table under `<proc root>/net/` and
//! knows its JSON key, file name, header height, and address family.
//! [`read`] opens the file and yields whitespace-split rows lazily: the
//! tables reflect live kernel state, so nothing is cached across calls and
//! the file handle is dropped with the iterator.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::Serialize;

use crate::addr::AddrFamily;
use crate::error::{Error, Result};

/// Identifies which socket/device table a record originated from.
///
/// Serializes to the snapshot key string (`"tcpipv4"` etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableKind {
    /// Network interfaces (`/proc/net/dev`).
    #[serde(rename = "dev")]
    Dev,
    /// TCP over IPv4 (`/proc/net/tcp`).
    #[serde(rename = "tcpipv4")]
    TcpV4,
    /// TCP over IPv6 (`/proc/net/tcp6`).
    #[serde(rename = "tcpipv6")]
    TcpV6,
    /// UDP over IPv4 (`/proc/net/udp`).
    #[serde(rename = "udpipv4")]
    UdpV4,
    /// UDP over IPv6 (`/proc/net/udp6`).
    #[serde(rename = "udpipv6")]
    UdpV6,
    /// ICMP over IPv4 (`/proc/net/icmp`).
    #[serde(rename = "icmpipv4")]
    IcmpV4,
    /// ICMP over IPv6 (`/proc/net/icmp6`).
    #[serde(rename = "icmpipv6")]
    IcmpV6,
    /// Raw sockets over IPv4 (`/proc/net/raw`).
    #[serde(rename = "rawipv4")]
    RawV4,
    /// Raw sockets over IPv6 (`/proc/net/raw6`).
    #[serde(rename = "rawipv6")]
    RawV6,
}

impl TableKind {
    /// All table kinds, in capture order: devices first, then each
    /// protocol with IPv4 before IPv6.
    pub const ALL: [TableKind; 9] = [
        Self::Dev,
        Self::TcpV4,
        Self::TcpV6,
        Self::UdpV4,
        Self::UdpV6,
        Self::RawV4,
        Self::RawV6,
        Self::IcmpV4,
        Self::IcmpV6,
    ];

    /// Get the snapshot key string.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::TcpV4 => "tcpipv4",
            Self::TcpV6 => "tcpipv6",
            Self::UdpV4 => "udpipv4",
            Self::UdpV6 => "udpipv6",
            Self::IcmpV4 => "icmpipv4",
            Self::IcmpV6 => "icmpipv6",
            Self::RawV4 => "rawipv4",
            Self::RawV6 => "rawipv6",
        }
    }

    /// Get the file name under `<proc root>/net/`.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::TcpV4 => "tcp",
            Self::TcpV6 => "tcp6",
            Self::UdpV4 => "udp",
            Self::UdpV6 => "udp6",
            Self::IcmpV4 => "icmp",
            Self::IcmpV6 => "icmp6",
            Self::RawV4 => "raw",
            Self::RawV6 => "raw6",
        }
    }

    /// Number of header lines to skip. The device table carries a
    /// two-line banner; every socket table has a single column header.
    pub fn header_lines(&self) -> usize {
        match self {
            Self::Dev => 2,
            _ => 1,
        }
    }

    /// Address family of the endpoint tokens, `None` for the device table.
    pub fn family(&self) -> Option<AddrFamily> {
        match self {
            Self::Dev => None,
            Self::TcpV4 | Self::UdpV4 | Self::IcmpV4 | Self::RawV4 => Some(AddrFamily::V4),
            Self::TcpV6 | Self::UdpV6 | Self::IcmpV6 | Self::RawV6 => Some(AddrFamily::V6),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Lazy, single-pass iterator over the data rows of one table.
///
/// Yields each non-header line split on whitespace. The underlying file is
/// closed when the iterator is dropped.
#[derive(Debug)]
pub struct Rows {
    path: String,
    lines: Lines<BufReader<File>>,
}

impl Rows {
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(source)) => Err(Error::Io {
                path: self.path.clone(),
                source,
            }),
            None => Ok(None),
        }
    }
}

impl Iterator for Rows {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line
                .split_whitespace()
                .map(str::to_owned)
                .collect())),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open one table and position past its header lines.
///
/// A file shorter than its header is treated as an empty table. Open and
/// read failures surface as [`Error::Io`] naming the path.
pub fn read(proc_root: &Path, kind: TableKind) -> Result<Rows> {
    let path = proc_root.join("net").join(kind.file_name());
    let path_str = path.display().to_string();
    let file = File::open(&path).map_err(|source| Error::Io {
        path: path_str.clone(),
        source,
    })?;

    let mut rows = Rows {
        path: path_str,
        lines: BufReader::new(file).lines(),
    };
    for _ in 0..kind.header_lines() {
        if rows.next_line()?.is_none() {
            break;
        }
    }
    Ok(rows)
}
