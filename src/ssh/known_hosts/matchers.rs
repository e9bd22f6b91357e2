use std::fmt;

use crate::error::LineError;

use super::hash::{self, DIGEST_LEN, SALT_LEN};

/// Port that known_hosts entries leave out of the host field
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Host-matching predicate from the first field of a known_hosts line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// `host` or `[host]:port`, compared byte-for-byte
    Literal { text: String },
    /// `|1|salt|digest`
    Hashed {
        salt: [u8; SALT_LEN],
        digest: [u8; DIGEST_LEN],
    },
}

impl HostPattern {
    /// Parse the host field of a known_hosts line.
    ///
    /// Anything starting with `|` is treated as a hashed field and must use
    /// hash version 1. A field names exactly one host: comma-separated lists
    /// (as written with `CheckHostIP`) are rejected rather than loaded as a
    /// literal that could never match.
    pub fn parse(field: &str) -> Result<Self, LineError> {
        if field.starts_with('|') {
            let (salt, digest) = hash::parse_field(field)?;
            return Ok(HostPattern::Hashed { salt, digest });
        }
        if field.contains(',') {
            return Err(LineError::HostList(field.to_string()));
        }
        Ok(HostPattern::Literal {
            text: field.to_string(),
        })
    }

    /// Literal pattern in the form OpenSSH writes for this endpoint
    pub fn literal(host: &str, port: u16) -> Self {
        let text = if port == DEFAULT_SSH_PORT {
            host.to_string()
        } else {
            hash::bracketed(host, port)
        };
        HostPattern::Literal { text }
    }

    /// Hashed pattern for this endpoint with a freshly generated salt
    pub fn hashed(host: &str, port: u16) -> Self {
        let salt = hash::generate_salt();
        let digest = hash::encode(host, port, &salt);
        HostPattern::Hashed { salt, digest }
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, HostPattern::Hashed { .. })
    }

    /// Does this pattern name `(host, port)`?
    ///
    /// Both `[host]:port` and, on the default port, the bare `host` are
    /// accepted.
    pub fn matches(&self, host: &str, port: u16) -> bool {
        match self {
            HostPattern::Literal { text } => {
                (port == DEFAULT_SSH_PORT && text == host) || *text == hash::bracketed(host, port)
            }
            HostPattern::Hashed { salt, digest } => {
                hash::matches(host, port, salt, digest)
                    || (port == DEFAULT_SSH_PORT && hash::matches_name(host, salt, digest))
            }
        }
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPattern::Literal { text } => f.write_str(text),
            HostPattern::Hashed { salt, digest } => f.write_str(&hash::format_field(salt, digest)),
        }
    }
}
