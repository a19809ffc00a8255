//! Point-in-time socket table snapshots from `/proc/net`.
//!
//! This crate reads the kernel's plain-text socket tables (TCP, UDP, ICMP,
//! raw, plus the device list) and decodes their packed hexadecimal fields
//! into a single timestamped, JSON-serializable [`Snapshot`]. It is a
//! one-shot sampler: every [`Sampler::capture`] call opens the procfs files,
//! consumes them fully, and returns an owned result with no state carried
//! between calls.
//!
//! # Example
//!
//! ```no_run
//! use socktab::Sampler;
//!
//! fn main() -> socktab::Result<()> {
//!     let snapshot = Sampler::new().capture()?;
//!     println!("{}", snapshot.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod addr;
pub mod error;
pub mod parser;
pub mod record;
pub mod snapshot;
pub mod state;
pub mod table;

// Re-export common types at crate root for convenience
pub use error::{Error, Result};
pub use record::{DeviceRecord, Records, Snapshot, SocketRecord};
pub use snapshot::{MissingTablePolicy, Sampler};
pub use state::SocketState;
pub use table::TableKind;
