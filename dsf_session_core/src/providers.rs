// External collaborator abstractions
// Implementations live outside this crate: a browser wallet bridge in a
// real deployment, a simulated chain in the CLI, hand-rolled mocks in tests.

use async_trait::async_trait;

use crate::error::SessionResult;
use crate::models::{CallSpec, Receipt, TxHandle};

/// Wallet provider capability: manages the user's keys and prompts.
///
/// Both operations may suspend for an unbounded time while the user
/// decides; a declined prompt surfaces as `SessionError::UserRejected`.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for its accounts, prompting the user if needed.
    async fn request_accounts(&self) -> SessionResult<Vec<String>>;

    /// Sign the described contract write and broadcast it.
    async fn sign_and_send(&self, call: &CallSpec) -> SessionResult<TxHandle>;
}

/// Contract read/write capability over the deployed scholarship contract.
#[async_trait]
pub trait ContractClient: Send + Sync {
    /// Read the contract's designated owner account.
    async fn read_privileged_account(&self) -> SessionResult<String>;

    /// Submit a write through the connected signer.
    async fn call(&self, call: &CallSpec) -> SessionResult<TxHandle>;

    /// Await network confirmation of a submitted write.
    async fn wait_for_confirmation(&self, handle: &TxHandle) -> SessionResult<Receipt>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// Fire-and-forget notification sink (the UI's toast rail).
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}
