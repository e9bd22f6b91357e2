//! Security event logging for audit trails.
//!
//! Host key decisions are logged with `target: "security"` so they can be
//! filtered separately from ordinary diagnostics.
//!
//! # Example
//!
//! Show security events only:
//! ```bash
//! RUST_LOG=security=info hostkey-check example.com 22 ssh-ed25519 AAAA...
//! ```

use tracing::{info, warn};

use crate::error::{HostKeyRejection, LineError};

/// Log a host key that matched a trusted known_hosts entry.
pub fn log_host_key_verified(host: &str, port: u16, key_type: &str) {
    info!(
        target: "security",
        event = "host_key_verified",
        host = %host,
        port = port,
        key_type = %key_type,
        "Host key verified against known_hosts"
    );
}

/// Log a rejected host key.
///
/// A changed key is logged at a higher severity than an unknown host.
pub fn log_host_key_rejected(host: &str, port: u16, rejection: &HostKeyRejection) {
    match rejection {
        HostKeyRejection::NoTrustedEntry { key_type, .. } => {
            info!(
                target: "security",
                event = "host_key_unknown",
                host = %host,
                port = port,
                key_type = %key_type,
                "Host key rejected: host not in known_hosts"
            );
        }
        HostKeyRejection::KeyMismatch {
            key_type,
            known_entries,
            ..
        } => {
            warn!(
                target: "security",
                event = "host_key_changed",
                host = %host,
                port = port,
                key_type = %key_type,
                known_entries = known_entries,
                "HOST KEY CHANGED - potential man-in-the-middle attack"
            );
        }
    }
}

/// Log acceptance of a host key with verification disabled.
pub fn log_policy_bypass(host: &str, port: u16, key_type: &str) {
    warn!(
        target: "security",
        event = "host_key_policy_bypass",
        host = %host,
        port = port,
        key_type = %key_type,
        "Host key accepted WITHOUT verification (trust policy allows any key)"
    );
}

/// Log a known_hosts line that could not be parsed and was skipped.
pub fn log_known_hosts_line_skipped(source: &str, line: usize, error: &LineError) {
    warn!(
        target: "security",
        event = "known_hosts_line_skipped",
        source = %source,
        line = line,
        error = %error,
        "Skipping unparseable known_hosts line"
    );
}
