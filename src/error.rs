use std::path::PathBuf;
use thiserror::Error;

use crate::ssh::key_type::UnknownKeyType;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while building a known_hosts store
#[derive(Error, Debug)]
pub enum KnownHostsError {
    /// A configured source could not be read at all. No partial store is built.
    #[error("Failed to read known_hosts source '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
}

/// Reasons a single known_hosts line was skipped.
///
/// These never abort a load; they are logged and kept on the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected host pattern, key type and key data, found {0} field(s)")]
    FieldCount(usize),

    #[error("unsupported marker '@{0}'")]
    Marker(String),

    #[error("host lists are not supported: '{0}'")]
    HostList(String),

    #[error(transparent)]
    UnknownKeyType(#[from] UnknownKeyType),

    #[error("key data is not valid base64")]
    InvalidKeyData,

    #[error("unsupported host hash version '{0}'")]
    UnsupportedHashVersion(String),

    #[error("malformed hashed host field")]
    MalformedHash,

    #[error("hashed host has {salt}-byte salt and {digest}-byte digest, expected 20 each")]
    InvalidHashLength { salt: usize, digest: usize },
}

/// Why a presented host key was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostKeyRejection {
    /// No known_hosts entry exists for this host at all
    #[error(
        "Host key for {host}:{port} rejected: no trusted {key_type} key on record for this host \
         (host is not in known_hosts)"
    )]
    NoTrustedEntry {
        host: String,
        port: u16,
        key_type: String,
    },

    /// Host is known but presented a different key (potential MITM!)
    #[error(
        "REMOTE HOST IDENTIFICATION HAS CHANGED for {host}:{port}: presented {key_type} key \
         does not match any of the {known_entries} trusted key(s) on record"
    )]
    KeyMismatch {
        host: String,
        port: u16,
        key_type: String,
        known_entries: usize,
    },
}

/// SSH-related errors
#[derive(Error, Debug)]
pub enum SshError {
    #[error("Host key verification failed: {0}")]
    HostKeyRejected(#[from] HostKeyRejection),

    #[error("Host key trust store unavailable: {0}")]
    TrustStore(#[from] KnownHostsError),

    #[error("Host key verification failed: {0}")]
    HostKeyVerification(String),

    #[error("russh error: {0}")]
    Russh(String),
}

impl From<russh::Error> for SshError {
    fn from(err: russh::Error) -> Self {
        SshError::Russh(err.to_string())
    }
}
