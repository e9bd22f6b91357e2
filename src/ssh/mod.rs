//! SSH host key verification.
//!
//! Provides the known_hosts trust store, the verification decision and the
//! russh handler that applies it during the handshake.

pub mod handler;
pub mod host_key_verification;
pub mod key_type;
pub mod known_hosts;
pub mod policy;

pub use handler::ClientHandler;
pub use host_key_verification::{Acceptance, HostKeyVerifier, VerificationOutcome};
pub use key_type::KeyType;
pub use known_hosts::{HostPattern, KnownHostsEntry, KnownHostsStore};
pub use policy::TrustPolicy;
