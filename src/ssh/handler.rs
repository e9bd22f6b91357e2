use std::future::Future;
use std::sync::Arc;

use russh::client::Handler;
use russh::keys::PublicKey;

use crate::error::SshError;

use super::host_key_verification::{HostKeyVerifier, VerificationOutcome};
use super::policy::TrustPolicy;

/// russh client handler that gates the handshake on host key verification
pub struct ClientHandler {
    host: String,
    port: u16,
    verifier: Arc<HostKeyVerifier>,
}

impl ClientHandler {
    pub fn new(host: String, port: u16, verifier: Arc<HostKeyVerifier>) -> Self {
        Self {
            host,
            port,
            verifier,
        }
    }

    /// Handler for one target, loading the trust store the policy names.
    ///
    /// Fails with [`SshError::TrustStore`] when a known_hosts file cannot be
    /// read, before any connection is attempted.
    pub fn from_policy(host: String, port: u16, policy: &TrustPolicy) -> Result<Self, SshError> {
        let verifier = HostKeyVerifier::from_policy(policy)?;
        Ok(Self::new(host, port, Arc::new(verifier)))
    }

    /// Verify a presented key without going through the handshake
    pub fn verify_key(&self, key: &PublicKey) -> Result<VerificationOutcome, SshError> {
        let key_type = key.algorithm();
        let key_bytes = key.to_bytes().map_err(|e| {
            SshError::HostKeyVerification(format!("Failed to encode server host key: {}", e))
        })?;
        Ok(self
            .verifier
            .verify(&self.host, self.port, key_type.as_str(), &key_bytes))
    }
}

impl Handler for ClientHandler {
    type Error = SshError;

    fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        let outcome = self.verify_key(server_public_key);
        let host = self.host.clone();
        let port = self.port;

        async move {
            match outcome? {
                VerificationOutcome::Accepted(acceptance) => {
                    tracing::debug!("Host key accepted for {}:{} ({:?})", host, port, acceptance);
                    Ok(true)
                }
                // Abort the handshake with the reason attached
                VerificationOutcome::Rejected(rejection) => Err(rejection.into()),
            }
        }
    }
}
