//! Packed hex address decoding.
//!
//! Socket tables under `/proc/net` encode endpoints as fixed-width
//! hexadecimal `address:port` tokens: 8 hex chars for IPv4, 32 for IPv6,
//! with a hex 16-bit port. IPv4 bytes are stored little-endian relative to
//! the dotted-decimal presentation, so the stored byte order is reversed
//! before printing. IPv6 groups are taken in stored order.

/// Error type for address decoding.
#[derive(Debug, thiserror::Error)]
pub enum AddrError {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("expected {expected} hex chars in address, got {got}")]
    Width { expected: usize, got: usize },

    #[error("non-hex character in address")]
    NonHex,

    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

pub type Result<T> = std::result::Result<T, AddrError>;

/// Address family of a socket table, selecting the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrFamily {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

impl AddrFamily {
    /// Decode a packed `address:port` token for this family.
    pub fn decode(&self, token: &str) -> Result<String> {
        match self {
            Self::V4 => decode_v4(token),
            Self::V6 => decode_v6(token),
        }
    }
}

/// Decode a packed IPv4 `address:port` token into `"A.B.C.D:port"`.
///
/// # Example
///
/// ```
/// use socktab::addr::decode_v4;
///
/// assert_eq!(decode_v4("0100007F:1F90").unwrap(), "127.0.0.1:8080");
/// assert_eq!(decode_v4("00000000:0016").unwrap(), "0.0.0.0:22");
/// ```
pub fn decode_v4(token: &str) -> Result<String> {
    let (addr, port) = split_token(token, 8)?;
    let port = decode_port(port)?;

    // Stored order is DD CC BB AA for presentation AA.BB.CC.DD; walk the
    // hex pairs back to front.
    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let pos = (3 - i) * 2;
        *octet = u8::from_str_radix(&addr[pos..pos + 2], 16).map_err(|_| AddrError::NonHex)?;
    }

    Ok(format!(
        "{}.{}.{}.{}:{}",
        octets[0], octets[1], octets[2], octets[3], port
    ))
}

/// Decode a packed IPv6 `address:port` token into the 8-group colon form
/// `"g1:g2:g3:g4:g5:g6:g7:g8:port"`.
///
/// Groups keep their stored order and are lower-cased; the address is not
/// compressed (`::`), matching the raw table layout group for group.
///
/// # Example
///
/// ```
/// use socktab::addr::decode_v6;
///
/// assert_eq!(
///     decode_v6("00000000000000000000000000000001:0050").unwrap(),
///     "0000:0000:0000:0000:0000:0000:0000:0001:80",
/// );
/// ```
pub fn decode_v6(token: &str) -> Result<String> {
    let (addr, port) = split_token(token, 32)?;
    let port = decode_port(port)?;

    let mut out = String::with_capacity(addr.len() + 8 + 6);
    for group in 0..8 {
        out.push_str(&addr[group * 4..group * 4 + 4].to_ascii_lowercase());
        out.push(':');
    }
    out.push_str(&port.to_string());

    Ok(out)
}

/// Split a token into its address and port halves, validating the fixed
/// address width up front rather than relying on slicing to fail later.
fn split_token(token: &str, addr_width: usize) -> Result<(&str, &str)> {
    let (addr, port) = token.split_once(':').ok_or(AddrError::MissingSeparator)?;
    if addr.len() != addr_width {
        return Err(AddrError::Width {
            expected: addr_width,
            got: addr.len(),
        });
    }
    if !addr.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddrError::NonHex);
    }
    Ok((addr, port))
}

fn decode_port(port: &str) -> Result<u16> {
    u16::from_str_radix(port, 16).map_err(|_| AddrError::InvalidPort(port.to_string()))
}
