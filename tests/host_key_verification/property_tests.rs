//! Properties that must hold for every entry, key and source layout

use std::sync::Arc;

use hostkey_guard::error::HostKeyRejection;
use hostkey_guard::ssh::known_hosts::{KnownHostsStore, MemorySource};
use hostkey_guard::ssh::{Acceptance, HostKeyVerifier, VerificationOutcome};

use super::fixtures::*;

fn sample_known_hosts() -> String {
    format!(
        "example.com ssh-rsa {RSA_KEY}\n\
         [example.com]:2222 ecdsa-sha2-nistp256 {ECDSA_KEY}\n\
         {HASHED_DEFAULT_PORT} ssh-rsa {RSA_KEY}\n\
         {HASHED_PORT_2222} ssh-rsa {RSA_KEY}\n\
         [10.0.0.7]:22 ssh-ed25519 {ED25519_KEY}\n\
         ::1 ecdsa-sha2-nistp384 {ECDSA_384_KEY}\n"
    )
}

/// Endpoints that each sample entry is expected to match
fn endpoints() -> Vec<(&'static str, u16)> {
    vec![
        ("example.com", 22),
        ("example.com", 2222),
        ("10.0.0.7", 22),
        ("::1", 22),
    ]
}

#[test]
fn every_entry_accepts_its_own_key() {
    let store = Arc::new(
        KnownHostsStore::load([MemorySource::new("sample", sample_known_hosts())]).expect("load"),
    );
    let verifier = HostKeyVerifier::strict(store.clone());

    let mut checked = 0;
    for entry in store.entries() {
        for (host, port) in endpoints() {
            if !entry.pattern().matches(host, port) {
                continue;
            }
            checked += 1;
            assert_eq!(
                verifier.verify(host, port, entry.key_type().name(), entry.key()),
                VerificationOutcome::Accepted(Acceptance::Verified),
                "entry {} should accept its key for {}:{}",
                entry,
                host,
                port
            );
        }
    }
    assert_eq!(checked, store.len());
}

#[test]
fn flipping_any_key_byte_is_a_mismatch() {
    let mut fixture = KnownHostsFixture::new();
    fixture.add_file(&format!("[example.com]:2222 ssh-ed25519 {ED25519_KEY}\n"));
    let verifier = fixture.verifier();
    let key = decode(ED25519_KEY);

    for index in 0..key.len() {
        let mut tampered = key.clone();
        tampered[index] ^= 0x01;
        assert!(
            matches!(
                verifier.verify("example.com", 2222, "ssh-ed25519", &tampered),
                VerificationOutcome::Rejected(HostKeyRejection::KeyMismatch { .. })
            ),
            "flipped byte {} was not rejected",
            index
        );
    }
}

#[test]
fn truncated_or_extended_key_is_a_mismatch() {
    let mut fixture = KnownHostsFixture::new();
    fixture.add_file(&format!("example.com ssh-rsa {RSA_KEY}\n"));
    let verifier = fixture.verifier();
    let key = decode(RSA_KEY);

    let mut extended = key.clone();
    extended.push(0);
    for presented in [&key[..key.len() - 1], &extended[..], &[][..]] {
        assert!(matches!(
            verifier.verify("example.com", 22, "ssh-rsa", presented),
            VerificationOutcome::Rejected(HostKeyRejection::KeyMismatch { .. })
        ));
    }
}

#[test]
fn allow_any_accepts_regardless_of_input() {
    let verifier = HostKeyVerifier::allow_any();
    for (host, port) in endpoints() {
        for key in [RSA_KEY, ECDSA_KEY, ED25519_KEY] {
            assert_eq!(
                verifier.verify(host, port, "ssh-rsa", &decode(key)),
                VerificationOutcome::Accepted(Acceptance::PolicyBypass)
            );
        }
    }
}

#[test]
fn splitting_sources_does_not_change_outcomes() {
    let lines: Vec<String> = sample_known_hosts().lines().map(str::to_string).collect();

    let mut single = KnownHostsFixture::new();
    single.add_file(&sample_known_hosts());
    let reference = single.verifier();

    // Three files: lines distributed round-robin
    let mut split = KnownHostsFixture::new();
    for file in 0..3 {
        let contents: String = lines
            .iter()
            .skip(file)
            .step_by(3)
            .map(|line| format!("{line}\n"))
            .collect();
        split.add_file(&contents);
    }

    let presented = [
        ("ssh-rsa", RSA_KEY),
        ("ecdsa-sha2-nistp256", ECDSA_KEY),
        ("ecdsa-sha2-nistp256", ECDSA_KEY_2),
        ("ecdsa-sha2-nistp384", ECDSA_384_KEY),
        ("ssh-ed25519", ED25519_KEY),
    ];
    let mut targets = endpoints();
    targets.push(("unknown.example.com", 22));
    targets.push(("example.com", 2200));

    for order in permutations(3) {
        let verifier = split.verifier_for(&order);
        for &(host, port) in &targets {
            for (key_type, key) in presented {
                assert_eq!(
                    verifier.verify(host, port, key_type, &decode(key)),
                    reference.verify(host, port, key_type, &decode(key)),
                    "order {:?} disagrees for {}:{} {}",
                    order,
                    host,
                    port,
                    key_type
                );
            }
        }
    }
}

#[test]
fn repeated_calls_return_the_same_outcome() {
    let mut fixture = KnownHostsFixture::new();
    fixture.add_file(&sample_known_hosts());
    let verifier = fixture.verifier();

    for (host, port) in endpoints() {
        let first = verifier.verify(host, port, "ssh-rsa", &decode(RSA_KEY));
        for _ in 0..3 {
            assert_eq!(verifier.verify(host, port, "ssh-rsa", &decode(RSA_KEY)), first);
        }
    }
}

#[test]
fn verifier_is_shared_across_threads() {
    let mut fixture = KnownHostsFixture::new();
    fixture.add_file(&sample_known_hosts());
    let verifier = Arc::new(fixture.verifier());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let verifier = verifier.clone();
            std::thread::spawn(move || {
                verifier
                    .verify("example.com", 2222, "ecdsa-sha2-nistp256", &decode(ECDSA_KEY))
                    .is_accepted()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread panicked"));
    }
}
