//! SSH host key verification against known_hosts trust stores
//!
//! This module exposes the core functionality for use in integration tests
//! and the `hostkey-check` binary.

pub mod config;
pub mod error;
pub mod logging;
pub mod ssh;

pub(crate) mod security_log;
