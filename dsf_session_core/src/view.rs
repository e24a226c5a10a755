use serde::Serialize;

use crate::models::{TransactionRecord, TxKind, TxState};
use crate::session::WalletSession;

/// Renderable snapshot derived from the session and the tracked record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub connected: bool,
    pub display_address: String,
    pub is_privileged_caller: bool,
    pub transaction: Option<TransactionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub kind: TxKind,
    pub state: TxState,
    pub error: Option<String>,
}

impl ViewState {
    /// Project read-only view state.
    ///
    /// A disconnected wallet stops projecting the transaction: the
    /// record still reaches its terminal state internally, but the UI
    /// is detached from the outcome.
    pub fn project(session: &WalletSession, record: &TransactionRecord) -> Self {
        let transaction = if session.connected() {
            record.kind.map(|kind| TransactionView {
                kind,
                state: record.state,
                error: record.error.as_ref().map(|e| e.to_string()),
            })
        } else {
            None
        };
        Self {
            connected: session.connected(),
            display_address: shorten_address(session.address()),
            is_privileged_caller: session.is_privileged_caller(),
            transaction,
        }
    }
}

/// Shorten an address for display, e.g. `0x1234...5678`.
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
