//! knapsack-offchain: run the off-chain knapsack unit from the command line
//!
//! ## Commands
//!
//! - **run**: fetch items from a contract, solve, print the 32-byte result
//! - **solve**: solve a local item file without touching the network
//! - **encode-request**: print the calldata for one page request
//! - **decode-page**: decode a raw `eth_call` result into its two arrays
//! - **encode-page**: encode a local item file into the page layout
//!
//! ## Example Usage
//!
//! ```bash
//! # Run against Sepolia (INFURA_API_KEY is read from the environment)
//! knapsack-offchain run 0x5FbDB2315678afecb367f032d93F642f64180aa3 500
//!
//! # Simulate offline
//! knapsack-offchain solve --items items.json --capacity 500
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod knapsack_cli;

use knapsack_cli::{
    run::RunCmd,
    tools::{DecodePageCmd, EncodePageCmd, EncodeRequestCmd, SolveCmd},
};

#[derive(Parser)]
#[command(
    name = "knapsack-offchain",
    author,
    version,
    about = "Off-chain 0/1 knapsack compute unit",
    long_about = "Reads (value, weight) items from a contract through raw eth_call pages,\n\
                  solves a bounded 0/1 knapsack, and prints the optimum as a uint256 word."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of the bare result
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging on stderr (one line per fetched page)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch items from a contract and solve
    Run(RunCmd),

    /// Solve a local item file
    Solve(SolveCmd),

    /// Print calldata for one page request
    EncodeRequest(EncodeRequestCmd),

    /// Decode a raw page result
    DecodePage(DecodePageCmd),

    /// Encode a local item file as a page result
    EncodePage(EncodePageCmd),
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
    } = Cli::parse();

    knapsack_offchain::logging::init_tracing(verbose)?;

    match command {
        Commands::Run(cmd) => cmd.execute(json),
        Commands::Solve(cmd) => cmd.execute(json),
        Commands::EncodeRequest(cmd) => cmd.execute(json),
        Commands::DecodePage(cmd) => cmd.execute(),
        Commands::EncodePage(cmd) => cmd.execute(json),
    }
}
