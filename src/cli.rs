//! CLI argument definitions using clap derive macros.

use std::net::IpAddr;

use clap::Parser;

use wedl_core::config::{DEFAULT_BASE_URL, DEFAULT_PORT};
use wedl_core::resolver::ResolverHttpTimeouts;

/// HTTP API that resolves WeTransfer links.
///
/// POST a link to /wetransfer to get the file base64-encoded, or to /info to
/// get its name, size and direct download URL.
#[derive(Parser, Debug)]
#[command(name = "wedl-api")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to bind the API server to
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to run the API server on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Resolver connect timeout in seconds (1-300)
    #[arg(long, default_value_t = ResolverHttpTimeouts::default().connect_timeout_secs, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// Resolver idle read timeout in seconds (1-3600)
    #[arg(long, default_value_t = ResolverHttpTimeouts::default().read_timeout_secs, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Refuse to buffer files larger than this many bytes (unbounded when unset)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_file_bytes: Option<u64>,

    /// WeTransfer base URL used for download API calls
    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}
