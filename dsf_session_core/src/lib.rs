// DSF Session Core Library
// Wallet-session and transaction-lifecycle logic for the scholarship dApp

pub mod dispatcher;
pub mod error;
pub mod models;
pub mod providers;
pub mod session;
pub mod settings;
pub mod tracker;
pub mod view;

// Re-exports
pub use dispatcher::ActionDispatcher;
pub use error::{SessionError, SessionResult};
pub use models::*;
pub use providers::*;
pub use session::WalletSession;
pub use settings::Settings;
pub use tracker::TransactionTracker;
pub use view::*;
