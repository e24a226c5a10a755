// Domain actions over the transaction tracker
// The contract owns all business rules; the dispatcher only normalizes
// input, routes submissions, and mirrors outcomes to the notifier sink.

use std::sync::Arc;

use crate::error::{SessionError, SessionResult};
use crate::models::{Receipt, TxPayload};
use crate::providers::{ContractClient, Notifier, NotifyLevel, WalletProvider};
use crate::session::WalletSession;
use crate::settings::Settings;
use crate::tracker::TransactionTracker;
use crate::view::ViewState;

/// Owns the session and tracker for the lifetime of the client and
/// exposes the two domain actions plus the connection lifecycle.
pub struct ActionDispatcher {
    provider: Option<Arc<dyn WalletProvider>>,
    contract: Arc<dyn ContractClient>,
    notifier: Arc<dyn Notifier>,
    settings: Settings,
    session: WalletSession,
    tracker: TransactionTracker,
}

impl ActionDispatcher {
    /// `provider` is `None` when the host environment carries no wallet
    /// capability; `connect` then fails with `ProviderUnavailable`.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        contract: Arc<dyn ContractClient>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        Self {
            provider,
            contract,
            notifier,
            settings,
            session: WalletSession::new(),
            tracker: TransactionTracker::new(),
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ViewState {
        ViewState::project(&self.session, &self.tracker.snapshot())
    }

    pub async fn connect(&mut self) -> SessionResult<()> {
        let result = self
            .session
            .connect(self.provider.as_deref(), self.contract.as_ref())
            .await;
        match result {
            Ok(_) => {
                self.notifier.notify(NotifyLevel::Success, "Wallet Connected");
                Ok(())
            }
            Err(SessionError::ProviderUnavailable) => {
                self.notifier.notify(NotifyLevel::Error, "Please install wallet");
                Err(SessionError::ProviderUnavailable)
            }
            Err(e) => {
                self.notifier
                    .notify(NotifyLevel::Error, &format!("Connection failed: {}", e));
                Err(e)
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.session.disconnect();
        self.notifier.notify(NotifyLevel::Info, "Wallet Disconnected");
    }

    pub async fn apply_for_scholarship(
        &self,
        name: &str,
        age: &str,
        course: &str,
    ) -> SessionResult<Receipt> {
        let payload = TxPayload::Apply {
            name: name.trim().to_string(),
            age: age.trim().to_string(),
            course: course.trim().to_string(),
        };
        self.submit(payload, "Application submitted!", "Application failed")
            .await
    }

    pub async fn donate(&self, amount: &str) -> SessionResult<Receipt> {
        let payload = TxPayload::Donate {
            amount: amount.trim().to_string(),
        };
        self.submit(payload, "Donation successful!", "Donation failed")
            .await
    }

    /// Dismiss the finished transaction notification.
    pub fn dismiss(&self) {
        self.tracker.reset();
    }

    async fn submit(
        &self,
        payload: TxPayload,
        success_message: &str,
        failure_prefix: &str,
    ) -> SessionResult<Receipt> {
        let result = self
            .tracker
            .submit(
                payload,
                &self.session,
                self.contract.as_ref(),
                &self.settings.contract_address,
                self.settings.confirm_timeout(),
            )
            .await;
        match &result {
            Ok(_) => self.notifier.notify(NotifyLevel::Success, success_message),
            Err(e) => self
                .notifier
                .notify(NotifyLevel::Error, &format!("{}: {}", failure_prefix, e)),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallSpec, TxHandle, TxKind, TxState};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockProvider;

    #[async_trait]
    impl WalletProvider for MockProvider {
        async fn request_accounts(&self) -> SessionResult<Vec<String>> {
            Ok(vec!["0xAAA111".to_string()])
        }

        async fn sign_and_send(&self, _call: &CallSpec) -> SessionResult<TxHandle> {
            Ok(TxHandle("0xhandle".to_string()))
        }
    }

    /// Records every CallSpec it receives; confirmation always succeeds.
    struct RecordingContract {
        owner: String,
        calls: Mutex<Vec<CallSpec>>,
    }

    #[async_trait]
    impl ContractClient for RecordingContract {
        async fn read_privileged_account(&self) -> SessionResult<String> {
            Ok(self.owner.clone())
        }

        async fn call(&self, call: &CallSpec) -> SessionResult<TxHandle> {
            self.calls.lock().unwrap().push(call.clone());
            Ok(TxHandle("0xhandle".to_string()))
        }

        async fn wait_for_confirmation(&self, handle: &TxHandle) -> SessionResult<Receipt> {
            Ok(Receipt {
                handle: handle.clone(),
                confirmed_at: chrono::Utc::now(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(NotifyLevel, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NotifyLevel, message: &str) {
            self.messages.lock().unwrap().push((level, message.to_string()));
        }
    }

    fn settings() -> Settings {
        Settings {
            contract_address: "0x40Cd0edd7dAe6Ec3e7C8e6614b165EBC025aF443".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            confirm_timeout_secs: None,
        }
    }

    fn dispatcher_parts() -> (
        ActionDispatcher,
        Arc<RecordingContract>,
        Arc<RecordingNotifier>,
    ) {
        let contract = Arc::new(RecordingContract {
            owner: "0xaaa111".to_string(),
            calls: Mutex::new(Vec::new()),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = ActionDispatcher::new(
            Some(Arc::new(MockProvider)),
            contract.clone(),
            notifier.clone(),
            settings(),
        );
        (dispatcher, contract, notifier)
    }

    #[tokio::test]
    async fn connect_and_disconnect_emit_toasts() {
        let (mut dispatcher, _contract, notifier) = dispatcher_parts();

        dispatcher.connect().await.unwrap();
        assert!(dispatcher.session().connected());
        assert!(dispatcher.session().is_privileged_caller());

        dispatcher.disconnect();
        assert!(!dispatcher.session().connected());

        let messages = notifier.messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![
                (NotifyLevel::Success, "Wallet Connected".to_string()),
                (NotifyLevel::Info, "Wallet Disconnected".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn missing_provider_prompts_wallet_install() {
        let contract = Arc::new(RecordingContract {
            owner: "0xaaa111".to_string(),
            calls: Mutex::new(Vec::new()),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let mut dispatcher =
            ActionDispatcher::new(None, contract, notifier.clone(), settings());

        let err = dispatcher.connect().await.unwrap_err();
        assert_eq!(err, SessionError::ProviderUnavailable);
        assert_eq!(
            *notifier.messages.lock().unwrap(),
            vec![(NotifyLevel::Error, "Please install wallet".to_string())]
        );
    }

    #[tokio::test]
    async fn apply_normalizes_input_before_submission() {
        let (mut dispatcher, contract, _notifier) = dispatcher_parts();
        dispatcher.connect().await.unwrap();

        dispatcher
            .apply_for_scholarship("  Jo  ", " 20 ", "  CS ")
            .await
            .unwrap();

        let calls = contract.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "applyForScholarship");
        assert_eq!(calls[0].args, serde_json::json!(["Jo", 20, "CS"]));
        assert_eq!(calls[0].contract, settings().contract_address);
    }

    #[tokio::test]
    async fn donate_reports_success_and_projects_confirmed_state() {
        let (mut dispatcher, _contract, notifier) = dispatcher_parts();
        dispatcher.connect().await.unwrap();

        dispatcher.donate(" 1.5 ").await.unwrap();

        let view = dispatcher.view();
        assert!(view.connected);
        assert_eq!(view.display_address, "0xaaa111");
        let tx = view.transaction.expect("transaction should project");
        assert_eq!(tx.kind, TxKind::Donate);
        assert_eq!(tx.state, TxState::Confirmed);
        assert!(tx.error.is_none());

        let messages = notifier.messages.lock().unwrap();
        assert!(messages
            .iter()
            .any(|(level, m)| *level == NotifyLevel::Success && m == "Donation successful!"));
    }

    #[tokio::test]
    async fn invalid_donation_reports_failure_toast() {
        let (mut dispatcher, contract, notifier) = dispatcher_parts();
        dispatcher.connect().await.unwrap();

        let err = dispatcher.donate("zero").await.unwrap_err();
        assert_eq!(err, SessionError::InvalidInput(vec!["amount".to_string()]));
        assert!(contract.calls.lock().unwrap().is_empty());

        let messages = notifier.messages.lock().unwrap();
        assert!(messages
            .iter()
            .any(|(level, m)| *level == NotifyLevel::Error && m.starts_with("Donation failed:")));
    }

    #[tokio::test]
    async fn dismiss_clears_the_finished_transaction() {
        let (mut dispatcher, _contract, _notifier) = dispatcher_parts();
        dispatcher.connect().await.unwrap();

        dispatcher.donate("1.5").await.unwrap();
        assert!(dispatcher.view().transaction.is_some());

        dispatcher.dismiss();
        assert!(dispatcher.view().transaction.is_none());
    }

    #[tokio::test]
    async fn disconnect_detaches_the_projection() {
        let (mut dispatcher, _contract, _notifier) = dispatcher_parts();
        dispatcher.connect().await.unwrap();
        dispatcher.donate("1.5").await.unwrap();

        dispatcher.disconnect();
        let view = dispatcher.view();
        assert!(!view.connected);
        assert!(view.transaction.is_none());
    }
}
