// In-process stand-ins for the wallet extension and the chain
// Handles and confirmation latency are simulated so the walkthrough
// exercises the full session lifecycle without a network.

use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;
use log::debug;
use rand::Rng;

use dsf_session_core::{
    CallSpec, ContractClient, Notifier, NotifyLevel, Receipt, SessionResult, TxHandle,
    WalletProvider,
};

pub const OWNER_ADDRESS: &str = "0x8f3b2a41c05dd2a49f3c60710aa2371b2c9e55d1";
pub const USER_ADDRESS: &str = "0x51e4daba9a9674b85c76c6ae6d6911c42c090c7f";

pub struct SimulatedWallet {
    address: String,
}

impl SimulatedWallet {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    async fn request_accounts(&self) -> SessionResult<Vec<String>> {
        // Stand-in for the extension's account prompt.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(vec![self.address.clone()])
    }

    async fn sign_and_send(&self, call: &CallSpec) -> SessionResult<TxHandle> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let raw: u128 = rand::thread_rng().gen();
        let handle = TxHandle(format!("0x{:032x}", raw));
        debug!("signed {} call as {}: {}", call.method, self.address, handle.0);
        Ok(handle)
    }
}

pub struct SimulatedChain {
    wallet: SimulatedWallet,
    confirm_latency: Duration,
}

impl SimulatedChain {
    pub fn new(signer_address: &str) -> Self {
        Self {
            wallet: SimulatedWallet::new(signer_address),
            confirm_latency: Duration::from_millis(200),
        }
    }
}

#[async_trait]
impl ContractClient for SimulatedChain {
    async fn read_privileged_account(&self) -> SessionResult<String> {
        Ok(OWNER_ADDRESS.to_string())
    }

    async fn call(&self, call: &CallSpec) -> SessionResult<TxHandle> {
        // Writes route through the connected signer, as the real
        // contract binding would.
        self.wallet.sign_and_send(call).await
    }

    async fn wait_for_confirmation(&self, handle: &TxHandle) -> SessionResult<Receipt> {
        tokio::time::sleep(self.confirm_latency).await;
        Ok(Receipt {
            handle: handle.clone(),
            confirmed_at: chrono::Utc::now(),
        })
    }
}

/// Terminal toast rail.
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => println!("{} {}", "[info]".blue(), message),
            NotifyLevel::Success => println!("{} {}", "[ok]".green(), message),
            NotifyLevel::Error => println!("{} {}", "[error]".red(), message),
        }
    }
}
