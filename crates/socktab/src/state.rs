//! Connection state decoding.

/// TCP-style connection states as reported in the `st` column of the
/// kernel socket tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketState {
    /// Connection established.
    Established,
    /// SYN sent, waiting for matching SYN.
    SynSent,
    /// SYN received, waiting for ACK.
    SynRecv,
    /// FIN sent, waiting for FIN or FIN-ACK.
    FinWait1,
    /// FIN received, waiting for FIN.
    FinWait2,
    /// In TIME-WAIT state.
    TimeWait,
    /// Socket is closed.
    Close,
    /// FIN received, close pending.
    CloseWait,
    /// Close wait acknowledged, waiting for FIN.
    LastAck,
    /// Socket is listening.
    Listen,
    /// Both sides sent FIN simultaneously.
    Closing,
    /// Any code outside 1..=11, kept verbatim. Future kernel states must
    /// not abort a sampling pass.
    Undefined(u32),
}

impl SocketState {
    /// Parse from the numeric state code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Established,
            2 => Self::SynSent,
            3 => Self::SynRecv,
            4 => Self::FinWait1,
            5 => Self::FinWait2,
            6 => Self::TimeWait,
            7 => Self::Close,
            8 => Self::CloseWait,
            9 => Self::LastAck,
            10 => Self::Listen,
            11 => Self::Closing,
            other => Self::Undefined(other),
        }
    }

    /// Get the numeric code.
    pub fn code(&self) -> u32 {
        match self {
            Self::Established => 1,
            Self::SynSent => 2,
            Self::SynRecv => 3,
            Self::FinWait1 => 4,
            Self::FinWait2 => 5,
            Self::TimeWait => 6,
            Self::Close => 7,
            Self::CloseWait => 8,
            Self::LastAck => 9,
            Self::Listen => 10,
            Self::Closing => 11,
            Self::Undefined(code) => *code,
        }
    }

    /// Get the state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Established => "ESTABLISHED",
            Self::SynSent => "SYN_SENT",
            Self::SynRecv => "SYN_RECV",
            Self::FinWait1 => "FIN_WAIT1",
            Self::FinWait2 => "FIN_WAIT2",
            Self::TimeWait => "TIME_WAIT",
            Self::Close => "CLOSE",
            Self::CloseWait => "CLOSE_WAIT",
            Self::LastAck => "LAST_ACK",
            Self::Listen => "LISTEN",
            Self::Closing => "CLOSING",
            Self::Undefined(_) => "UNDEFINED",
        }
    }

    /// Canonical label: two upper-case hex digits plus the name, e.g.
    /// `"01(ESTABLISHED)"` or `"0A(LISTEN)"`. Unknown codes print their
    /// decimal value instead: `"99(UNDEFINED)"`.
    pub fn label(&self) -> String {
        match self {
            Self::Undefined(code) => format!("{}({})", code, self.name()),
            known => format!("{:02X}({})", known.code(), known.name()),
        }
    }
}
