//! Host key algorithm registry.
//!
//! Every algorithm the verifier understands is listed here with the canonical
//! name used both in known_hosts lines and in the key-type field sent during
//! the handshake. Supporting a new algorithm means adding a variant and a
//! row to [`KeyType::ALL`].

use std::fmt;
use std::str::FromStr;

/// Supported host key algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Dsa,
    Rsa,
    EcdsaNistp256,
    EcdsaNistp384,
    EcdsaNistp521,
    Ed25519,
}

impl KeyType {
    /// Every registered algorithm, in preference order
    pub const ALL: [KeyType; 6] = [
        KeyType::Ed25519,
        KeyType::EcdsaNistp256,
        KeyType::EcdsaNistp384,
        KeyType::EcdsaNistp521,
        KeyType::Rsa,
        KeyType::Dsa,
    ];

    /// Canonical wire-format name
    pub fn name(self) -> &'static str {
        match self {
            KeyType::Dsa => "ssh-dss",
            KeyType::Rsa => "ssh-rsa",
            KeyType::EcdsaNistp256 => "ecdsa-sha2-nistp256",
            KeyType::EcdsaNistp384 => "ecdsa-sha2-nistp384",
            KeyType::EcdsaNistp521 => "ecdsa-sha2-nistp521",
            KeyType::Ed25519 => "ssh-ed25519",
        }
    }

    /// Look up an algorithm by its canonical name.
    ///
    /// Matching is exact: `SSH-RSA` is not `ssh-rsa`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key_type| key_type.name() == name)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a key type name is not in the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported host key type: {0}")]
pub struct UnknownKeyType(pub String);

impl FromStr for KeyType {
    type Err = UnknownKeyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownKeyType(s.to_string()))
    }
}
