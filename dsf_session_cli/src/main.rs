mod commands;
mod sim;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use log::info;

use commands::{Cli, Commands};
use dsf_session_core::{ActionDispatcher, ContractClient, Settings, WalletProvider};
use sim::{SimulatedChain, SimulatedWallet, ToastNotifier, OWNER_ADDRESS, USER_ADDRESS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Err(error) = run(cli).await {
        eprintln!("{} {}", "ERROR:".red(), error);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), String> {
    let config_path = cli.config.to_string_lossy();
    let settings = Settings::from_file(&config_path).map_err(|e| e.to_string())?;
    info!("Using contract {}", settings.contract_address);

    let signer_address = if cli.as_owner {
        OWNER_ADDRESS
    } else {
        USER_ADDRESS
    };
    let provider: Option<Arc<dyn WalletProvider>> = if cli.no_wallet {
        None
    } else {
        Some(Arc::new(SimulatedWallet::new(signer_address)))
    };
    let contract: Arc<dyn ContractClient> = Arc::new(SimulatedChain::new(signer_address));

    let mut dispatcher =
        ActionDispatcher::new(provider, contract, Arc::new(ToastNotifier), settings);

    dispatcher.connect().await.map_err(|e| e.to_string())?;

    let result = match &cli.command {
        Commands::Status => Ok(()),
        Commands::Apply { name, age, course } => dispatcher
            .apply_for_scholarship(name, age, course)
            .await
            .map(|receipt| info!("Application confirmed in {}", receipt.handle.0)),
        Commands::Donate { amount } => dispatcher
            .donate(amount)
            .await
            .map(|receipt| info!("Donation confirmed in {}", receipt.handle.0)),
    };

    let view = dispatcher.view();
    println!(
        "{}",
        serde_json::to_string_pretty(&view).map_err(|e| e.to_string())?
    );

    dispatcher.disconnect();
    result.map_err(|e| e.to_string())
}
