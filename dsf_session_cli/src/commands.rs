use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dsf_session")]
#[command(about = "Scholarship dApp session walkthrough against a simulated chain")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.example.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Simulate a host without a wallet extension
    #[arg(long)]
    pub no_wallet: bool,

    /// Connect as the contract owner instead of a regular account
    #[arg(long)]
    pub as_owner: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect the wallet and print the session view
    Status,

    /// Apply for a scholarship
    Apply {
        name: String,
        age: String,
        course: String,
    },

    /// Donate native currency to the fund
    Donate { amount: String },
}
