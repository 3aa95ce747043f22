//! goupdate - Go toolchain version checker library
//!
//! This library provides the core functionality for:
//! - Extracting a Go version from go.mod, Dockerfiles and config files
//! - Resolving the current version from a file or a direct value
//! - Comparing it with the latest go.dev release
//! - Interactively downloading the newer toolchain archive

pub mod checker;
pub mod cli;
pub mod download;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod resolver;
pub mod version;
