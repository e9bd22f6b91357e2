use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host key trust policy for one connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustPolicy {
    /// Strict checking against the known_hosts files at these locations
    Verify(Vec<PathBuf>),
    /// Accept any host key without checking.
    ///
    /// This disables the only protection against host impersonation. It is
    /// meant for throwaway test environments and is logged on every use.
    AllowAny,
}

/// Policy selector as written in config files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Verify,
    AllowAny,
}
