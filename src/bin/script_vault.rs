// src/bin/script_vault.rs
//! script-vault CLI: generate keys, seal scripts, run sealed scripts

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use script_vault::{encrypt_file, generate_key, load_config, run, run_file, PayloadSource};

#[derive(Parser)]
#[command(name = "script-vault")]
#[command(version)]
#[command(about = "Keep scripts encrypted at rest and decrypt them only to run them")]
#[command(after_help = "EXAMPLES:
  script-vault generate-key            Print a new key for SCRIPT_VAULT_HEX_KEY
  script-vault encrypt deploy.sh       Seal deploy.sh in place
  ./deploy.sh                          Run it (the stub calls `script-vault run`)
  script-vault run - < payload.hex     Run a bare payload read from stdin
  script-vault run-file deploy.sh      Same, without relying on the stub")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a fresh random key, hex-encoded
    GenerateKey,

    /// Encrypt files in place
    Encrypt {
        /// Files to seal
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Decrypt and execute a hex payload
    Run {
        /// Hex-encoded envelope, `-` to read it from stdin, or `@PATH` to read it from a file
        payload: String,
    },

    /// Decrypt and execute a sealed file
    RunFile {
        /// Sealed file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match execute(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("script-vault: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = load_config().context("failed to load configuration")?;

    match cli.command {
        Commands::GenerateKey => {
            println!("{}", generate_key().expose_secret());
        }
        Commands::Encrypt { paths } => {
            let keys = config.key_provider();
            let template = config.template();
            for path in &paths {
                encrypt_file(path, &keys, &template)
                    .with_context(|| format!("failed to encrypt {}", path.display()))?;
                info!(path = %path.display(), "encrypted");
            }
        }
        Commands::Run { payload } => {
            let hex = PayloadSource::parse(&payload)
                .read()
                .context("failed to read payload")?;
            run(hex.expose_secret(), &config.key_provider(), &mut config.executor())?;
        }
        Commands::RunFile { path } => {
            run_file(
                &path,
                &config.key_provider(),
                &config.template(),
                &mut config.executor(),
            )
            .with_context(|| format!("failed to run {}", path.display()))?;
        }
    }
    Ok(())
}
