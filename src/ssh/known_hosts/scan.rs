use std::fmt;
use std::sync::Arc;

use data_encoding::BASE64;

use crate::error::LineError;
use crate::security_log;
use crate::ssh::key_type::KeyType;

use super::matchers::HostPattern;

/// Where an entry was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOrigin {
    pub source: Arc<str>,
    /// 1-based line number
    pub line: usize,
}

/// One trusted `(host pattern, key type, key)` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHostsEntry {
    pattern: HostPattern,
    key_type: KeyType,
    key: Vec<u8>,
    origin: Option<EntryOrigin>,
}

impl KnownHostsEntry {
    pub fn new(pattern: HostPattern, key_type: KeyType, key: Vec<u8>) -> Self {
        Self {
            pattern,
            key_type,
            key,
            origin: None,
        }
    }

    pub fn pattern(&self) -> &HostPattern {
        &self.pattern
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Wire-encoded public key blob
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn origin(&self) -> Option<&EntryOrigin> {
        self.origin.as_ref()
    }

    /// Byte-exact comparison against a presented key
    pub fn trusts(&self, key_type: KeyType, key: &[u8]) -> bool {
        self.key_type == key_type && self.key == key
    }
}

impl fmt::Display for KnownHostsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.pattern,
            self.key_type,
            BASE64.encode(&self.key)
        )
    }
}

/// A line that was skipped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub source: Arc<str>,
    pub line: usize,
    pub error: LineError,
}

#[derive(Debug, Default)]
pub(crate) struct HostKeyScan {
    pub(crate) entries: Vec<KnownHostsEntry>,
    pub(crate) skipped: Vec<SkippedLine>,
}

pub(crate) fn scan_known_hosts(source: &Arc<str>, content: &str) -> HostKeyScan {
    let mut scan = HostKeyScan::default();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        match parse_line(line) {
            Ok(Some((pattern, key_type, key))) => scan.entries.push(KnownHostsEntry {
                pattern,
                key_type,
                key,
                origin: Some(EntryOrigin {
                    source: source.clone(),
                    line: line_number,
                }),
            }),
            Ok(None) => {}
            Err(error) => {
                security_log::log_known_hosts_line_skipped(source, line_number, &error);
                scan.skipped.push(SkippedLine {
                    source: source.clone(),
                    line: line_number,
                    error,
                });
            }
        }
    }

    scan
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub(crate) fn parse_line(line: &str) -> Result<Option<(HostPattern, KeyType, Vec<u8>)>, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    if let Some(stripped) = trimmed.strip_prefix('@') {
        let marker = stripped.split_whitespace().next().unwrap_or_default();
        return Err(LineError::Marker(marker.to_string()));
    }

    let mut parts = trimmed.split_whitespace();
    // Anything after the key field is a free-form comment
    let (Some(hosts_field), Some(key_type), Some(key_data)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(LineError::FieldCount(trimmed.split_whitespace().count()));
    };

    let pattern = HostPattern::parse(hosts_field)?;
    let key_type = key_type.parse::<KeyType>()?;
    let key = BASE64
        .decode(key_data.as_bytes())
        .map_err(|_| LineError::InvalidKeyData)?;

    Ok(Some((pattern, key_type, key)))
}
