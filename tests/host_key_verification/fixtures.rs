//! known_hosts fixtures backed by a temporary directory

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use data_encoding::BASE64;
use tempfile::TempDir;

use hostkey_guard::ssh::known_hosts::KnownHostsStore;
use hostkey_guard::ssh::{HostKeyVerifier, TrustPolicy};

pub const RSA_KEY: &str = "AAAAB3NzaC1yc2EAAAADAQABAAAAgQDBtWNE7V6vgrxgXlPCSJgDbfX+OY/DXZMMrqa0WXW12sfD9gZpZgRhcJbOyr9cSkGG1CyRoXbhzrGWOCXfPS5RD1KNtBeVZ7dFZJdDNaVq3P38Tfn5JHjm4Zr3oVmjYMaKM/ALd+O1UW/zip7XoDjw7MXXBCewxzWwv6Msf87VOw==";
pub const ECDSA_KEY: &str = "AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBK4KWpi75yFHGe4//kZmJIc7+6v+V+2BWcNwxXva2Ok8/rDJvWPq/5dUPwgE75xHqGVaPJfQnwTrLfRnBnYO8xY=";
pub const ECDSA_KEY_2: &str = "AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBIpfNQBu9W0/Njx8VzZBvDb+F2ByenoUyOTh5vlAiBsGfos4th9Mk38URX2FS1x9GJ6Vdt3/a6z3rKcsrgyPkJU=";
pub const ECDSA_384_KEY: &str = "AAAAE2VjZHNhLXNoYTItbmlzdHAzODQAAAAIbmlzdHAzODQAAABhBGYRTT0gCMR19qrdVFeRUTvTeiXY8+WTLhikDbzuTLU1F1km+JF/GmhpyEbk2CiPeFosoa8vVkysVs/aXN7ezSTHnkddAptAOpAkRBmZ0HVQtET8jfdNXneVjdmn87w4lg==";
pub const ED25519_KEY: &str = "AAAAC3NzaC1lZDI1NTE5AAAAIHTSIW6ohB8SBYhFYLN5ABDYptVWxtWXwk39dvmGM4RX";

/// `ssh-keygen -H` output for `example.com` (port 22) with [`RSA_KEY`]
pub const HASHED_DEFAULT_PORT: &str = "|1|EdROw8Ei3NQPlX2JHaEUoXBHCMU=|yvODNnh4IXy94o2M7hVeP4BhGWo=";
/// `ssh-keygen -H` output for `[example.com]:2222` with [`RSA_KEY`]
pub const HASHED_PORT_2222: &str = "|1|xjeKAjSZPfA9tzEpcObZtGRxhFg=|y+DI7QklT9yGLOpi2f4+7q39oww=";

pub fn decode(key: &str) -> Vec<u8> {
    BASE64.decode(key.as_bytes()).expect("decode fixture key")
}

/// Isolated directory holding any number of known_hosts files
pub struct KnownHostsFixture {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl KnownHostsFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            files: Vec::new(),
        }
    }

    /// Write one known_hosts file and remember its path
    pub fn add_file(&mut self, contents: &str) -> PathBuf {
        let path = self
            .dir
            .path()
            .join(format!("known_hosts_{}", self.files.len()));
        fs::write(&path, contents).expect("write known_hosts");
        self.files.push(path.clone());
        path
    }

    pub fn policy(&self) -> TrustPolicy {
        TrustPolicy::Verify(self.files.clone())
    }

    pub fn store(&self) -> KnownHostsStore {
        KnownHostsStore::load(&self.files).expect("load known_hosts")
    }

    pub fn verifier(&self) -> HostKeyVerifier {
        HostKeyVerifier::from_policy(&self.policy()).expect("build verifier")
    }

    /// Verifier over the given files in the given order
    pub fn verifier_for(&self, order: &[usize]) -> HostKeyVerifier {
        let files: Vec<&PathBuf> = order.iter().map(|&i| &self.files[i]).collect();
        let store = KnownHostsStore::load(files).expect("load known_hosts");
        HostKeyVerifier::strict(Arc::new(store))
    }
}

impl Default for KnownHostsFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Every ordering of `0..n`
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn permute(prefix: &mut Vec<usize>, rest: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if rest.is_empty() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..rest.len() {
            let item = rest.remove(i);
            prefix.push(item);
            permute(prefix, rest, out);
            prefix.pop();
            rest.insert(i, item);
        }
    }

    let mut out = Vec::new();
    permute(&mut Vec::new(), &mut (0..n).collect(), &mut out);
    out
}
