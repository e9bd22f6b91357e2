//! Salted host name hashing (`|1|salt|digest`).
//!
//! The digest is HMAC-SHA1 over the literal host name string, keyed with a
//! 20-byte salt chosen when the entry was written. Verification only reads
//! existing salts; [`generate_salt`] is for authoring new entries.

use data_encoding::BASE64;
use hmac::digest::Key;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;

use crate::error::LineError;

/// Prefix of a version 1 hashed host field
pub const HASH_MARKER: &str = "|1|";
pub const SALT_LEN: usize = 20;
pub const DIGEST_LEN: usize = 20;

type HmacSha1 = Hmac<Sha1>;

/// `[host]:port`, the bracketed form used when hashing
pub fn bracketed(host: &str, port: u16) -> String {
    format!("[{}]:{}", host, port)
}

/// Hash `[host]:port` with the given salt.
pub fn encode(host: &str, port: u16, salt: &[u8; SALT_LEN]) -> [u8; DIGEST_LEN] {
    encode_name(&bracketed(host, port), salt)
}

/// Check a stored digest against `[host]:port`.
pub fn matches(host: &str, port: u16, salt: &[u8], digest: &[u8]) -> bool {
    matches_name(&bracketed(host, port), salt, digest)
}

pub(crate) fn encode_name(name: &str, salt: &[u8; SALT_LEN]) -> [u8; DIGEST_LEN] {
    // Salt is shorter than the SHA-1 block, so HMAC zero-pads it
    let mut key = Key::<HmacSha1>::default();
    key[..SALT_LEN].copy_from_slice(salt);
    let mut mac = <HmacSha1 as Mac>::new(&key);
    mac.update(name.as_bytes());
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

pub(crate) fn matches_name(name: &str, salt: &[u8], digest: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha1::new_from_slice(salt) else {
        return false;
    };
    mac.update(name.as_bytes());
    // Full-length, constant-time comparison
    mac.verify_slice(digest).is_ok()
}

/// Fresh random salt for a newly authored entry
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Parse a `|<version>|<salt>|<digest>` host field.
pub(crate) fn parse_field(field: &str) -> Result<([u8; SALT_LEN], [u8; DIGEST_LEN]), LineError> {
    let mut parts = field.split('|');
    // Leading empty segment before the first '|'
    if parts.next() != Some("") {
        return Err(LineError::MalformedHash);
    }
    let version = parts.next().ok_or(LineError::MalformedHash)?;
    if version != "1" {
        return Err(LineError::UnsupportedHashVersion(version.to_string()));
    }

    let (Some(salt), Some(digest), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(LineError::MalformedHash);
    };

    let salt = BASE64
        .decode(salt.as_bytes())
        .map_err(|_| LineError::MalformedHash)?;
    let digest = BASE64
        .decode(digest.as_bytes())
        .map_err(|_| LineError::MalformedHash)?;

    match (
        <[u8; SALT_LEN]>::try_from(salt.as_slice()),
        <[u8; DIGEST_LEN]>::try_from(digest.as_slice()),
    ) {
        (Ok(salt), Ok(digest)) => Ok((salt, digest)),
        _ => Err(LineError::InvalidHashLength {
            salt: salt.len(),
            digest: digest.len(),
        }),
    }
}

pub(crate) fn format_field(salt: &[u8], digest: &[u8]) -> String {
    format!("{}{}|{}", HASH_MARKER, BASE64.encode(salt), BASE64.encode(digest))
}
