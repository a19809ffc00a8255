//! Snapshot capture.
//!
//! [`Sampler::capture`] stamps one capture time, walks every table kind in
//! a fixed order, and returns a fully-owned [`Snapshot`]. There is no
//! shared or global state: concurrent captures are simply independent
//! snapshots with independent timestamps.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::error::Result;
use crate::parser;
use crate::record::{Records, Snapshot};
use crate::table::{self, TableKind};

/// What to do when a table file does not exist on this kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTablePolicy {
    /// Abort the whole capture, keeping a snapshot either complete or
    /// absent.
    #[default]
    Fail,
    /// Omit the table kind from the snapshot. Useful on kernels with
    /// address families compiled out (e.g. no IPv6 raw sockets). Parse
    /// failures still abort regardless of policy.
    Skip,
}

/// One-shot sampler for the kernel socket tables.
///
/// # Example
///
/// ```no_run
/// use socktab::{MissingTablePolicy, Sampler};
///
/// let sampler = Sampler::new().missing_tables(MissingTablePolicy::Skip);
/// let snapshot = sampler.capture()?;
/// # Ok::<(), socktab::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sampler {
    proc_root: PathBuf,
    missing_tables: MissingTablePolicy,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// Sampler over the host procfs at `/proc`.
    pub fn new() -> Self {
        Self::with_proc_root("/proc")
    }

    /// Sampler over an alternate proc root (a bind mount, a test fixture).
    /// Tables are expected under `<root>/net/`.
    pub fn with_proc_root(root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: root.into(),
            missing_tables: MissingTablePolicy::Fail,
        }
    }

    /// Set the missing-table policy.
    pub fn missing_tables(mut self, policy: MissingTablePolicy) -> Self {
        self.missing_tables = policy;
        self
    }

    /// Capture one snapshot across all table kinds.
    ///
    /// Tables are read sequentially in a fixed order, each opened and
    /// fully consumed within this call. Any error aborts the capture,
    /// except a missing table under [`MissingTablePolicy::Skip`].
    pub fn capture(&self) -> Result<Snapshot> {
        let captured_at = unix_now();
        let mut snapshot = Snapshot::default();

        for kind in TableKind::ALL {
            match self.capture_table(kind, captured_at) {
                Ok(records) => {
                    debug!(table = %kind, records = records.len(), "captured table");
                    snapshot.push(kind, records);
                }
                Err(err)
                    if self.missing_tables == MissingTablePolicy::Skip
                        && err.is_not_found() =>
                {
                    warn!(table = %kind, "table not exposed by this kernel, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(snapshot)
    }

    fn capture_table(&self, kind: TableKind, captured_at: f64) -> Result<Records> {
        let rows = table::read(&self.proc_root, kind)?;

        if kind.family().is_some() {
            let mut records = Vec::new();
            for row in rows {
                records.push(parser::parse_socket(kind, &row?, captured_at)?);
            }
            Ok(Records::Sockets(records))
        } else {
            let mut records = Vec::new();
            for row in rows {
                records.push(parser::parse_device(&row?, captured_at)?);
            }
            Ok(Records::Devices(records))
        }
    }
}

/// Current UNIX time in fractional seconds.
fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64()
}
