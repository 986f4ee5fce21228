//! ChainTx CLI: decode MultiversX transaction payloads from the terminal.
//!
//! # Commands
//! ```text
//! chaintx decode      --sender <addr> --receiver <addr> [--value <dec>] [--data <base64>] [--json]
//! chaintx decode-file --file <txs.json> [--error-mode skip|collect|throw] [--chunk-size <N>] [--json]
//! chaintx info
//! ```

use anyhow::{Context, Result};
use chaintx_core::{ErrorMode, RawTransaction, TransactionDecoder, TransactionMetadata};
use chaintx_multiversx::{batch, MultiversxDecoder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod config;
mod logging;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "chaintx",
    about = "ChainTx CLI: MultiversX transaction payload decoder",
    long_about = "
ChainTx CLI: turn the base64 data field of a MultiversX transaction into
readable metadata. Recognises ESDTTransfer, ESDTNFTTransfer and
MultiESDTNFTTransfer payloads, including the contract call they pay for.

ENVIRONMENT VARIABLES:
  RUST_LOG    Overrides the log filter from the config file
",
    version
)]
struct Cli {
    /// JSON config file with `log` and `decoder` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single transaction
    Decode {
        /// Sender address (bech32)
        #[arg(long)]
        sender: String,
        /// Receiver address (bech32)
        #[arg(long)]
        receiver: String,
        /// Native value as a decimal string
        #[arg(long, default_value = "0")]
        value: String,
        /// Base64 payload
        #[arg(long, default_value = "")]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a JSON array of transactions
    #[command(name = "decode-file")]
    DecodeFile {
        /// Path to a JSON file holding `[{sender, receiver, value, data}, ...]`
        #[arg(short, long)]
        file: PathBuf,
        /// How to treat transactions that fail to decode: skip | collect | throw
        #[arg(long, default_value = "skip")]
        error_mode: ErrorMode,
        /// Decode in parallel chunks of this size instead of one batch
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show ChainTx build and capability info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.apply_verbose(cli.verbose);
    logging::init_tracing(&config.log);
    debug!(?config, "configuration loaded");

    let decoder =
        MultiversxDecoder::with_config(&config.decoder).context("invalid decoder config")?;

    match cli.command {
        Commands::Decode {
            sender,
            receiver,
            value,
            data,
            json,
        } => cmd_decode(&decoder, RawTransaction::new(sender, receiver, value, data), json),

        Commands::DecodeFile {
            file,
            error_mode,
            chunk_size,
            json,
        } => cmd_decode_file(&decoder, &file, error_mode, chunk_size, json),

        Commands::Info => cmd_info(&decoder),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_decode(decoder: &MultiversxDecoder, tx: RawTransaction, as_json: bool) -> Result<()> {
    let meta = decoder.decode(&tx).context("decode failed")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
    } else {
        print_metadata(&meta);
    }
    Ok(())
}

fn cmd_decode_file(
    decoder: &MultiversxDecoder,
    file: &std::path::Path,
    mode: ErrorMode,
    chunk_size: Option<usize>,
    as_json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read '{}'", file.display()))?;
    let txs: Vec<RawTransaction> = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a JSON array of transactions", file.display()))?;

    let (decoded, errors): (Vec<(usize, TransactionMetadata)>, Vec<(usize, String)>) =
        match chunk_size {
            Some(size) => {
                let (decoded, errs) = batch::chunked_decode(decoder, &txs, size);
                let errors = match mode {
                    ErrorMode::Throw => {
                        if let Some((idx, err)) = errs.into_iter().next() {
                            return Err(err)
                                .context(format!("transaction {idx} failed to decode"));
                        }
                        Vec::new()
                    }
                    ErrorMode::Collect => {
                        errs.into_iter().map(|(i, e)| (i, e.to_string())).collect()
                    }
                    ErrorMode::Skip => Vec::new(),
                };
                (decoded, errors)
            }
            None => {
                let out = decoder.decode_batch(&txs, mode)?;
                let errors = out
                    .errors
                    .into_iter()
                    .map(|(i, e)| (i, e.to_string()))
                    .collect();
                (out.decoded, errors)
            }
        };

    if as_json {
        let decoded: Vec<_> = decoded
            .iter()
            .map(|(index, meta)| serde_json::json!({ "index": index, "metadata": meta }))
            .collect();
        let errors: Vec<_> = errors
            .iter()
            .map(|(index, error)| serde_json::json!({ "index": index, "error": error }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "total": txs.len(),
                "decoded": decoded,
                "errors": errors,
            }))?
        );
    } else {
        for (index, meta) in &decoded {
            println!("[{index}] {meta}");
        }
        for (index, error) in &errors {
            println!("[{index}] error: {error}");
        }
        println!();
        println!(
            "Decoded {} of {} transactions ({} errors reported)",
            decoded.len(),
            txs.len(),
            errors.len()
        );
    }
    Ok(())
}

fn print_metadata(meta: &TransactionMetadata) {
    println!("Summary:   {meta}");
    println!("Kind:      {}", meta.kind);
    println!("Sender:    {}", meta.sender);
    println!("Receiver:  {}", meta.receiver);
    println!("Value:     {}", meta.value);
    if let Some(name) = &meta.function_name {
        println!("Function:  {name}");
    }
    if let Some(args) = &meta.function_args {
        println!("Args:      [{}]", args.join(", "));
    }
    if meta.has_transfers() {
        println!("Transfers:");
        for t in meta.transfers() {
            println!("  {} {}", t.value, t.identifier().unwrap_or("?"));
        }
    }
}

fn cmd_info(decoder: &MultiversxDecoder) -> Result<()> {
    println!("ChainTx v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  ✓ Contract call parsing     (function@hex-args payloads)");
    println!("  ✓ ESDTTransfer              (fungible tokens)");
    println!("  ✓ ESDTNFTTransfer           (NFT / SFT / meta-ESDT)");
    println!("  ✓ MultiESDTNFTTransfer      (multi-token, mixed fungible and NFT)");
    println!("  ✓ Nested call extraction    (endpoint paid by a transfer)");
    println!("  ✓ Parallel batch decode     (Rayon)");
    println!();
    println!("Supported chains:             MultiversX");
    println!("Address prefix:               {}", decoder.address_encoder().hrp());
    Ok(())
}
