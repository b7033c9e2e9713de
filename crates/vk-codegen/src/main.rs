//! vk-codegen CLI - generate a Solana Groth16 verifier from snarkjs artifacts
//!
//! Reads `verification_key.json` and writes `verifier.rs`, a module for a
//! Solana program that embeds the key as a `groth16-solana` constant and
//! exposes `verify_proof(data)`. Optionally serializes a proof and its public
//! signals into Rust test constants.

mod config;
mod error;
mod generate;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use groth16_codec::Target;
use serde::Deserialize;
use std::path::PathBuf;

/// Generate a Solana Groth16 verifier from snarkjs artifacts
#[derive(Parser, Debug)]
#[command(name = "vk-codegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the circuit wasm file (consumed by the external prover)
    pub wasm_file: PathBuf,

    /// Path to the circuit_final.zkey file (consumed by the external prover)
    pub zkey_file: PathBuf,

    /// Path to the circuit input.json
    pub input_json: PathBuf,

    /// Path to the snarkjs verification_key.json
    pub verification_key_json: PathBuf,

    /// Directory to write into (defaults to the current directory)
    pub output_dir: Option<PathBuf>,

    /// snarkjs proof.json to serialize into proof.rs
    #[arg(long)]
    pub proof: Option<PathBuf>,

    /// snarkjs public.json matching --proof
    #[arg(long)]
    pub public: Option<PathBuf>,

    /// Serialize the proof compressed (128 bytes)
    #[arg(long)]
    pub compressed: bool,

    /// Reject field elements wider than 256 bits instead of truncating
    #[arg(long, env = "VK_CODEGEN_STRICT")]
    pub strict: bool,

    /// What to generate from the verification key
    #[arg(long, value_enum)]
    pub target: Option<TargetArg>,

    /// Expected number of IC points; generation fails on mismatch
    #[arg(long)]
    pub public_inputs: Option<usize>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetArg {
    /// Full verifier module
    Verifier,
    /// Only the verifying-key constant
    Constant,
    /// Raw key bytes
    Binary,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Verifier => Target::Verifier,
            TargetArg::Constant => Target::Constant,
            TargetArg::Binary => Target::Binary,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = config::Config::load(&cli).and_then(|config| generate::run(&config, &cli));

    // Handle errors nicely
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
