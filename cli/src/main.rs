//! revertkit CLI — decode EVM failure objects from the terminal.
//!
//! Usage:
//! ```bash
//! # Decode bare revert data against human-readable errors
//! revertkit decode --data 0xcf479181... --error "InsufficientBalance(uint256 available, uint256 required)"
//!
//! # Decode a provider error object (file or stdin) against a JSON ABI
//! revertkit decode --failure error.json --abi Vault.json --json
//! cast call ... 2>&1 | revertkit decode --failure - --abi Vault.json
//!
//! # Print selectors
//! revertkit selector "InsufficientBalance(uint256,uint256)" "Paused()"
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revertkit_core::{encode_selector, selector_hex, ErrorFragment, ErrorRecord, Interface};
use revertkit_evm::{DecoderConfig, EvmErrorDecoder};
use serde_json::Value;
use tracing::{debug, warn};

mod logging;

use logging::{init_tracing, LogConfig};

/// Interface name given to errors passed with `--error`.
const INLINE_INTERFACE: &str = "inline";

#[derive(Parser)]
#[command(name = "revertkit", about = "Decode EVM failure objects into error records", version)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a failure object or bare revert data
    Decode {
        /// Failure object JSON file, or `-` for stdin
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        failure: Option<String>,
        /// Bare revert data (0x-prefixed hex)
        #[arg(long)]
        data: Option<String>,
        /// JSON ABI file; the interface is named after the file stem (repeatable)
        #[arg(long)]
        abi: Vec<PathBuf>,
        /// Human-readable error declaration (repeatable)
        #[arg(long = "error")]
        errors: Vec<String>,
        /// Decoder configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the 4-byte selector of each error signature
    Selector {
        #[arg(required = true)]
        signatures: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogConfig {
        level: cli.log_level,
        json: cli.log_json,
    });

    match cli.command {
        Commands::Decode { failure, data, abi, errors, config, json } => {
            cmd_decode(failure.as_deref(), data.as_deref(), &abi, &errors, config.as_deref(), json)
        }
        Commands::Selector { signatures } => cmd_selector(&signatures),
    }
}

fn cmd_decode(
    failure: Option<&str>,
    data: Option<&str>,
    abi_paths: &[PathBuf],
    errors: &[String],
    config_path: Option<&Path>,
    as_json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            DecoderConfig::from_json(&raw)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => DecoderConfig::default(),
    };

    let interfaces = load_interfaces(abi_paths, errors)?;
    debug!(
        interfaces = interfaces.len(),
        errors = interfaces.iter().map(Interface::len).sum::<usize>(),
        "loaded interfaces"
    );
    let failure = match (failure, data) {
        (Some(source), _) => read_failure(source)?,
        (None, Some(hex)) => serde_json::json!({ "data": hex }),
        (None, None) => anyhow::bail!("one of --failure or --data is required"),
    };

    let decoder = EvmErrorDecoder::with_config(config);
    let record = decoder.decode(&failure, &interfaces).context("decode failed")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn load_interfaces(abi_paths: &[PathBuf], errors: &[String]) -> Result<Vec<Interface>> {
    let mut interfaces = Vec::with_capacity(abi_paths.len() + 1);
    for path in abi_paths {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read ABI file '{}'", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let iface = Interface::from_abi_json(name, &raw)
            .with_context(|| format!("parse ABI file '{}'", path.display()))?;
        interfaces.push(iface);
    }
    if !errors.is_empty() {
        interfaces.push(Interface::parse(INLINE_INTERFACE, errors).context("parse --error")?);
    }
    for iface in &interfaces {
        for fragment in iface.errors() {
            if let Some(param) = fragment.params().iter().find(|p| !p.ty().is_supported()) {
                warn!(
                    interface = iface.name(),
                    error = fragment.signature(),
                    ty = %param.ty(),
                    "parameter type cannot be decoded; matching payloads will fail"
                );
            }
        }
    }
    Ok(interfaces)
}

fn read_failure(source: &str) -> Result<Value> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read failure object from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("read failure file '{source}'"))?
    };
    serde_json::from_str(&raw).context("failure object is not valid JSON")
}

fn print_record(record: &ErrorRecord<'_>) {
    println!("{record}");
    println!("  Code:      {}", record.code());
    if let Some(fragment) = record.fragment() {
        if let Some(iface) = record.interface() {
            println!("  Interface: {}", iface.name());
        }
        println!("  Signature: {}", fragment.signature());
        println!("  Selector:  {}", encode_selector(fragment.selector()));
        for (index, param) in fragment.params().iter().enumerate() {
            let value = record.args().at(index).map(ToString::to_string).unwrap_or_default();
            let label = if param.name().is_empty() { "_" } else { param.name() };
            println!("  [{index}] {label} ({}): {value}", param.ty());
        }
    } else if !record.context().is_empty() {
        println!("  Context:   {}", record.context());
    }
}

fn cmd_selector(signatures: &[String]) -> Result<()> {
    for sig in signatures {
        let fragment =
            ErrorFragment::parse(sig).with_context(|| format!("invalid signature '{sig}'"))?;
        println!("{}  {}", selector_hex(fragment.signature()), fragment.signature());
    }
    Ok(())
}
