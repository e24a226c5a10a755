use log::{debug, info};
use serde::Serialize;

use crate::error::{SessionError, SessionResult};
use crate::providers::{ContractClient, WalletProvider};

/// Wallet connection state owned by the dispatcher for the lifetime of
/// the process. An empty address is the not-connected sentinel, so the
/// connection flag is derived rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    address: String,
    is_privileged_caller: bool,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(&self) -> bool {
        !self.address.is_empty()
    }

    /// Lowercase hex address, or empty when not connected.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the connected account is the contract's designated owner.
    /// Only meaningful while connected; computed once per connection.
    pub fn is_privileged_caller(&self) -> bool {
        self.is_privileged_caller
    }

    /// Connect through the host's wallet provider capability.
    ///
    /// Requests account access (which may prompt the user), stores the
    /// first returned account, then reads the privileged account from
    /// the contract to compute the caller flag. Fails with
    /// `ProviderUnavailable` when the host has no provider,
    /// `UserRejected` when the user declines the prompt, and
    /// `Network` when the privileged-account read fails.
    pub async fn connect(
        &mut self,
        provider: Option<&dyn WalletProvider>,
        contract: &dyn ContractClient,
    ) -> SessionResult<&Self> {
        let provider = provider.ok_or(SessionError::ProviderUnavailable)?;

        let accounts = provider.request_accounts().await?;
        let address = accounts
            .into_iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| SessionError::Unknown("provider returned no accounts".to_string()))?
            .to_lowercase();

        let owner = contract
            .read_privileged_account()
            .await
            .map_err(|e| match e {
                SessionError::Network(_) => e,
                other => SessionError::Network(other.to_string()),
            })?;

        self.address = address;
        self.is_privileged_caller = self.address.eq_ignore_ascii_case(owner.trim());
        info!(
            "Wallet connected: {} (privileged: {})",
            self.address, self.is_privileged_caller
        );
        Ok(&*self)
    }

    /// Pure local reset; no network interaction, idempotent.
    pub fn disconnect(&mut self) {
        debug!("Wallet disconnected: {}", self.address);
        self.address.clear();
        self.is_privileged_caller = false;
    }
}
