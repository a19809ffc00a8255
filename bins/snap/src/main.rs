//! socktab command - one-shot socket table snapshot.
//!
//! Captures the kernel socket tables once and prints the JSON snapshot to
//! stdout. Diagnostics go to stderr via tracing.

use std::path::PathBuf;

use clap::Parser;
use socktab::{MissingTablePolicy, Sampler};

#[derive(Parser)]
#[command(name = "socktab", version, about = "Socket table snapshot utility")]
struct Cli {
    /// Pretty-print the JSON output.
    #[arg(short, long)]
    pretty: bool,

    /// Omit tables this kernel does not expose instead of failing.
    #[arg(long)]
    skip_missing: bool,

    /// Read tables under an alternate proc root (default /proc).
    #[arg(long, value_name = "DIR")]
    proc_root: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut sampler = match cli.proc_root {
        Some(root) => Sampler::with_proc_root(root),
        None => Sampler::new(),
    };
    if cli.skip_missing {
        sampler = sampler.missing_tables(MissingTablePolicy::Skip);
    }

    let snapshot = sampler.capture()?;

    let json = if cli.pretty {
        snapshot.to_json_pretty()?
    } else {
        snapshot.to_json()?
    };
    println!("{json}");

    Ok(())
}
