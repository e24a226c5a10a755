use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::models::{Receipt, TransactionRecord, TxPayload, TxState};
use crate::providers::ContractClient;
use crate::session::WalletSession;

/// Tracks the single write operation currently in flight.
///
/// The record sits behind a mutex so the projection layer can snapshot
/// it while `submit` is suspended at an await point. The host is
/// single-threaded-cooperative; the lock is never held across an await.
pub struct TransactionTracker {
    record: Mutex<TransactionRecord>,
}

impl Default for TransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self {
            record: Mutex::new(TransactionRecord::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TransactionRecord> {
        self.record.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current record state for projection.
    pub fn snapshot(&self) -> TransactionRecord {
        self.lock().clone()
    }

    /// Drive one write operation through its full lifecycle:
    /// `Idle -> Submitting -> PendingConfirmation -> Confirmed | Failed`.
    ///
    /// Preconditions are checked before any transition, so a rejected
    /// call leaves the record untouched: the session must be connected,
    /// no other record may be in flight, and the payload must validate.
    /// After submission every failure lands on the record as `Failed`
    /// with its error detail and is also returned to the caller;
    /// exactly one terminal state is reached per submission.
    ///
    /// `confirm_timeout` bounds the confirmation wait; when it elapses
    /// the record fails with `Timeout`. `None` waits indefinitely.
    pub async fn submit(
        &self,
        payload: TxPayload,
        session: &WalletSession,
        contract: &dyn ContractClient,
        contract_address: &str,
        confirm_timeout: Option<Duration>,
    ) -> SessionResult<Receipt> {
        if !session.connected() {
            return Err(SessionError::NotConnected);
        }

        let call = {
            let mut record = self.lock();
            if record.state.is_in_flight() {
                return Err(SessionError::TransactionInProgress);
            }
            let call = payload.to_call_spec(contract_address)?;
            // Terminal leftovers from a previous submission are replaced here.
            *record = TransactionRecord::started(payload);
            call
        };
        // If this future is dropped at an await point the record must
        // still reach a terminal state instead of wedging the tracker.
        let _guard = FlightGuard { tracker: self };

        info!("Submitting {} call to {}", call.method, call.contract);
        let handle = match contract.call(&call).await {
            Ok(handle) => handle,
            Err(e) => return Err(self.fail(wrap_unexpected(e))),
        };

        debug!("Signer accepted {}: handle {}", call.method, handle.0);
        {
            let mut record = self.lock();
            record.state = TxState::PendingConfirmation;
            record.handle = Some(handle.clone());
        }

        let wait = contract.wait_for_confirmation(&handle);
        let outcome = match confirm_timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => Err(SessionError::Timeout),
            },
            None => wait.await,
        };

        match outcome {
            Ok(receipt) => {
                self.lock().state = TxState::Confirmed;
                info!("Transaction {} confirmed", receipt.handle.0);
                Ok(receipt)
            }
            Err(e) => Err(self.fail(wrap_unexpected(e))),
        }
    }

    /// Dismiss a finished record, returning the tracker to `Idle`.
    ///
    /// An in-flight record is left untouched: the submitted write cannot
    /// be cancelled and must still reach a terminal state.
    pub fn reset(&self) {
        let mut record = self.lock();
        if record.state.is_in_flight() {
            warn!("reset ignored: a transaction is still in flight");
            return;
        }
        *record = TransactionRecord::default();
    }

    fn fail(&self, error: SessionError) -> SessionError {
        warn!("Transaction failed: {}", error);
        let mut record = self.lock();
        record.state = TxState::Failed;
        record.error = Some(error.clone());
        error
    }
}

/// Fails the record if the driving `submit` future is dropped while it
/// is still in flight. A no-op once a terminal state was reached.
struct FlightGuard<'a> {
    tracker: &'a TransactionTracker,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut record = self.tracker.lock();
        if record.state.is_in_flight() {
            warn!("Submission dropped mid-flight; marking record failed");
            record.state = TxState::Failed;
            record.error = Some(SessionError::Unknown(
                "submission dropped before completion".to_string(),
            ));
        }
    }
}

/// Collaborator errors outside the expected submission taxonomy are
/// wrapped so the record always carries a meaningful terminal error.
fn wrap_unexpected(error: SessionError) -> SessionError {
    match error {
        SessionError::UserRejected
        | SessionError::Network(_)
        | SessionError::Timeout
        | SessionError::Unknown(_) => error,
        other => SessionError::Unknown(other.to_string()),
    }
}
