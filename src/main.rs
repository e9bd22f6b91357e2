use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use data_encoding::BASE64;

use hostkey_guard::config::{AppConfig, paths};
use hostkey_guard::ssh::{Acceptance, HostKeyVerifier, VerificationOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "hostkey-check",
    version,
    about = "Check an SSH server host key against the trusted known_hosts entries",
    long_about = "Check an SSH server host key against the trusted known_hosts entries

The trust policy for the target is resolved from the configuration file. Exits 0 when the key is accepted, 1 when it is rejected and 2 when the configuration or a known_hosts file cannot be read."
)]
struct Cli {
    #[arg(help = "Host name or address of the server")]
    host: String,

    #[arg(help = "TCP port the server listens on")]
    port: u16,

    #[arg(help = "Host key algorithm name, e.g. \"ssh-ed25519\"")]
    key_type: String,

    #[arg(help = "Host key blob in base64, as found in known_hosts")]
    key: String,

    #[arg(
        env = "HOSTKEY_GUARD_CONFIG",
        help = "The path to a configuration file to use instead of the default one",
        long,
        short
    )]
    config: Option<PathBuf>,
}

impl Cli {
    fn decode_key(&self) -> anyhow::Result<Vec<u8>> {
        BASE64
            .decode(self.key.as_bytes())
            .context("host key is not valid base64")
    }
}

fn run(args: Cli) -> anyhow::Result<bool> {
    let key = args.decode_key()?;

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let policy = config.host_keys.resolve(&args.host, args.port);
    let verifier = HostKeyVerifier::from_policy(&policy)?;

    match verifier.verify(&args.host, args.port, &args.key_type, &key) {
        VerificationOutcome::Accepted(Acceptance::Verified) => {
            println!("{}:{}: host key verified", args.host, args.port);
            Ok(true)
        }
        VerificationOutcome::Accepted(Acceptance::PolicyBypass) => {
            println!(
                "{}:{}: host key accepted WITHOUT verification (policy allows any key)",
                args.host, args.port
            );
            Ok(true)
        }
        VerificationOutcome::Rejected(rejection) => {
            eprintln!("{}", rejection);
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = paths::ensure_log_dir().ok();
    let _guard = hostkey_guard::logging::init_logging(log_dir);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
