//! Raw row parsing.
//!
//! One parser covers every socket-style table; the address family comes
//! from the [`TableKind`] rather than per-table code paths. Layout of a
//! socket row, whitespace-split:
//!
//! ```text
//! field[0]  slot id with trailing ':'   ("0:")
//! field[1]  local endpoint token        ("0100007F:1F90")
//! field[2]  remote endpoint token       ("00000000:0000")
//! field[3]  state code, hex             ("0A")
//! ```
//!
//! Trailing fields (queues, timers, uid, inode, ...) are ignored.

use crate::error::{Error, Result};
use crate::record::{DeviceRecord, SocketRecord};
use crate::state::SocketState;
use crate::table::TableKind;

/// Socket rows carry at least slot, local, remote, and state.
const SOCKET_FIELDS: usize = 4;

/// Parse one socket table row.
///
/// Fails with [`Error::RecordFormat`] on a short row or a non-hex state
/// code, and with [`Error::Parse`] on a malformed address token. Either
/// failure aborts the capture; a silently garbled record is worse than a
/// loud one.
pub fn parse_socket(kind: TableKind, fields: &[String], captured_at: f64) -> Result<SocketRecord> {
    let family = kind
        .family()
        .ok_or_else(|| record_format(kind, fields))?;

    if fields.len() < SOCKET_FIELDS {
        return Err(record_format(kind, fields));
    }

    let decode = |token: &str| -> Result<String> {
        family.decode(token).map_err(|source| Error::Parse {
            kind,
            token: token.to_string(),
            source,
        })
    };

    let code = u32::from_str_radix(&fields[3], 16).map_err(|_| record_format(kind, fields))?;

    Ok(SocketRecord {
        captured_at,
        slot: slot_id(&fields[0]).to_string(),
        local: decode(&fields[1])?,
        remote: decode(&fields[2])?,
        state: SocketState::from_code(code).label(),
    })
}

/// Parse one device table row. Only the interface name is kept.
pub fn parse_device(fields: &[String], captured_at: f64) -> Result<DeviceRecord> {
    let name = fields
        .first()
        .ok_or_else(|| record_format(TableKind::Dev, fields))?;

    Ok(DeviceRecord {
        captured_at,
        interface: slot_id(name).to_string(),
    })
}

/// Strip the `:` separator from a slot/interface field. With large
/// counters `/proc/net/dev` glues the first stat onto the name
/// (`"eth0:12345"`), so everything from the first `:` goes.
fn slot_id(field: &str) -> &str {
    field.split_once(':').map(|(id, _)| id).unwrap_or(field)
}

fn record_format(kind: TableKind, fields: &[String]) -> Error {
    Error::RecordFormat {
        kind,
        fields: fields.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_socket_v4() {
        let row = fields(&["0:", "0100007F:1F90", "00000000:0000", "0A", "00000000:00000000"]);
        let rec = parse_socket(TableKind::TcpV4, &row, 42.5).unwrap();
        assert_eq!(rec.captured_at, 42.5);
        assert_eq!(rec.slot, "0");
        assert_eq!(rec.local, "127.0.0.1:8080");
        assert_eq!(rec.remote, "0.0.0.0:0");
        assert_eq!(rec.state, "0A(LISTEN)");
    }

    #[test]
    fn test_parse_socket_v6() {
        let row = fields(&[
            "3:",
            "00000000000000000000000000000001:0050",
            "00000000000000000000000000000000:0000",
            "01",
        ]);
        let rec = parse_socket(TableKind::TcpV6, &row, 1.0).unwrap();
        assert_eq!(rec.slot, "3");
        assert_eq!(rec.local, "0000:0000:0000:0000:0000:0000:0000:0001:80");
        assert_eq!(rec.state, "01(ESTABLISHED)");
    }

    #[test]
    fn test_unknown_state_is_not_an_error() {
        let row = fields(&["0:", "00000000:0000", "00000000:0000", "FF"]);
        let rec = parse_socket(TableKind::UdpV4, &row, 0.0).unwrap();
        assert_eq!(rec.state, "255(UNDEFINED)");
    }

    #[test]
    fn test_short_row() {
        let row = fields(&["0:", "0100007F:1F90"]);
        let err = parse_socket(TableKind::TcpV4, &row, 0.0).unwrap_err();
        assert!(matches!(err, Error::RecordFormat { kind: TableKind::TcpV4, .. }));
    }

    #[test]
    fn test_bad_state_code() {
        let row = fields(&["0:", "00000000:0000", "00000000:0000", "zz"]);
        let err = parse_socket(TableKind::RawV4, &row, 0.0).unwrap_err();
        assert!(matches!(err, Error::RecordFormat { .. }));
    }

    #[test]
    fn test_bad_address_token() {
        let row = fields(&["0:", "12:34", "00000000:0000", "01"]);
        let err = parse_socket(TableKind::TcpV4, &row, 0.0).unwrap_err();
        match err {
            Error::Parse { kind, token, .. } => {
                assert_eq!(kind, TableKind::TcpV4);
                assert_eq!(token, "12:34");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_device() {
        let row = fields(&["eth0:", "1234", "5"]);
        let rec = parse_device(&row, 9.25).unwrap();
        assert_eq!(rec.interface, "eth0");
        assert_eq!(rec.captured_at, 9.25);
    }

    #[test]
    fn test_parse_device_glued_counter() {
        let row = fields(&["eth0:123456789", "5"]);
        let rec = parse_device(&row, 0.0).unwrap();
        assert_eq!(rec.interface, "eth0");
    }

    #[test]
    fn test_parse_device_empty_row() {
        let err = parse_device(&[], 0.0).unwrap_err();
        assert!(matches!(err, Error::RecordFormat { kind: TableKind::Dev, .. }));
    }
}
