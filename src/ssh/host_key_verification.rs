//! Host key verification decision.
//!
//! A [`HostKeyVerifier`] is built once per resolved [`TrustPolicy`] and then
//! answers, for each handshake, whether the presented key is trusted. It does
//! no I/O while verifying: every known_hosts source was read when the store
//! was built.

use std::sync::Arc;

use crate::error::{HostKeyRejection, KnownHostsError};
use crate::security_log;

use super::key_type::KeyType;
use super::known_hosts::KnownHostsStore;
use super::policy::TrustPolicy;

/// How a host key came to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// A trusted known_hosts entry matched type and bytes exactly
    Verified,
    /// Nothing was checked because the policy is `AllowAny`
    PolicyBypass,
}

/// Result of one verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Accepted(Acceptance),
    Rejected(HostKeyRejection),
}

impl VerificationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerificationOutcome::Accepted(_))
    }

    pub fn into_result(self) -> Result<Acceptance, HostKeyRejection> {
        match self {
            VerificationOutcome::Accepted(acceptance) => Ok(acceptance),
            VerificationOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Strict(Arc<KnownHostsStore>),
    AllowAny,
}

/// Decides whether a presented host key is trusted
#[derive(Debug, Clone)]
pub struct HostKeyVerifier {
    mode: Mode,
}

impl HostKeyVerifier {
    /// Strict checking against `store`
    pub fn strict(store: Arc<KnownHostsStore>) -> Self {
        Self {
            mode: Mode::Strict(store),
        }
    }

    /// Accept every key. See [`TrustPolicy::AllowAny`].
    pub fn allow_any() -> Self {
        Self {
            mode: Mode::AllowAny,
        }
    }

    /// Build the verifier for an already resolved policy.
    ///
    /// `AllowAny` never reads the configured files, so a missing file is not
    /// an error under that policy.
    pub fn from_policy(policy: &TrustPolicy) -> Result<Self, KnownHostsError> {
        match policy {
            TrustPolicy::AllowAny => Ok(Self::allow_any()),
            TrustPolicy::Verify(paths) => {
                let store = KnownHostsStore::load(paths)?;
                Ok(Self::strict(Arc::new(store)))
            }
        }
    }

    /// The store checked against, `None` under `AllowAny`
    pub fn store(&self) -> Option<&Arc<KnownHostsStore>> {
        match &self.mode {
            Mode::Strict(store) => Some(store),
            Mode::AllowAny => None,
        }
    }

    /// Verify the key presented by `host:port`.
    ///
    /// `key_type` is the algorithm name from the handshake, `key` the raw
    /// wire-encoded public key.
    pub fn verify(&self, host: &str, port: u16, key_type: &str, key: &[u8]) -> VerificationOutcome {
        let store = match &self.mode {
            Mode::AllowAny => {
                security_log::log_policy_bypass(host, port, key_type);
                return VerificationOutcome::Accepted(Acceptance::PolicyBypass);
            }
            Mode::Strict(store) => store,
        };

        let outcome = check_store(store, host, port, key_type, key);
        match &outcome {
            VerificationOutcome::Accepted(_) => {
                security_log::log_host_key_verified(host, port, key_type)
            }
            VerificationOutcome::Rejected(rejection) => {
                security_log::log_host_key_rejected(host, port, rejection)
            }
        }
        outcome
    }
}

fn check_store(
    store: &KnownHostsStore,
    host: &str,
    port: u16,
    key_type: &str,
    key: &[u8],
) -> VerificationOutcome {
    let candidates = store.find(host, port);
    let known_entries = candidates.clone().count();

    if known_entries == 0 {
        return VerificationOutcome::Rejected(HostKeyRejection::NoTrustedEntry {
            host: host.to_string(),
            port,
            key_type: key_type.to_string(),
        });
    }

    // An unregistered algorithm name can never equal a parsed entry's type
    let trusted = KeyType::from_name(key_type)
        .is_some_and(|presented| candidates.into_iter().any(|entry| entry.trusts(presented, key)));

    if trusted {
        VerificationOutcome::Accepted(Acceptance::Verified)
    } else {
        VerificationOutcome::Rejected(HostKeyRejection::KeyMismatch {
            host: host.to_string(),
            port,
            key_type: key_type.to_string(),
            known_entries,
        })
    }
}
