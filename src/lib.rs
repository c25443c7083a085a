//! wedl Core Library
//!
//! This library backs an HTTP API that takes a WeTransfer link (optionally
//! password-protected) and returns either the file itself, base64-encoded in
//! a JSON envelope, or just its metadata.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Request dispatcher: routes, validation, response assembly
//! - [`resolver`] - Link resolution behind the [`Resolver`] trait
//! - [`download`] - Resolved file bodies, buffering, and filename fallback
//! - [`config`] - Server configuration assembled at startup

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod download;
pub mod resolver;
mod user_agent;

// Re-export commonly used types
pub use api::{ApiError, ApiServer};
pub use config::ServerConfig;
pub use download::{FileBody, ReadError};
pub use resolver::{Resolution, ResolveError, ResolvedFile, Resolver, WeTransferResolver};
