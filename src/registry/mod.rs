//! Registry adapters for fetching Go release information
//!
//! This module provides:
//! - HTTP client shared foundation
//! - go.dev release index adapter

mod client;
mod go_dev;

pub use client::HttpClient;
pub use go_dev::{GoDevRegistry, Release, ReleaseFile, GO_DEV_URL};
