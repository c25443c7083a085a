//! Resolved file bodies and the names they are served under.
//!
//! This module owns the pieces that sit between a successful resolution and
//! a response:
//!
//! - [`FileBody`] - the scoped byte stream a resolver returns
//! - [`FileBody::read_to_end`] - full in-memory buffering, optionally capped
//! - [`encode_base64`] - wire encoding for the `fileBinary` field
//! - [`resolve_filename`] - resolver name, then URL-derived name, then `"download"`
//!
//! # Example
//!
//! ```no_run
//! use wedl_core::download::{FileBody, encode_base64, resolve_filename};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let body = FileBody::from_bytes(&b"%PDF-1.4"[..]);
//! let data = body.read_to_end(None).await?;
//! let name = resolve_filename("", "https://download.test/files/report.pdf");
//! println!("{name}: {}", encode_base64(&data));
//! # Ok(())
//! # }
//! ```

mod body;
mod error;
pub mod filename;

pub use body::{ByteStream, FileBody, encode_base64};
pub use error::ReadError;
pub use filename::{DEFAULT_FILENAME, filename_from_url, parse_content_disposition, resolve_filename};
