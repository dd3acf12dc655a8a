//! Extraction session
//!
//! Owns the credential-bound client slot, the target record, and the display
//! state; runs one extraction cycle per settled text value and publishes a
//! snapshot for the view after every mutation. Cycles run sequentially: a
//! later settled value is not read until the current cycle resolves, so
//! responses can never apply out of order.

use crate::applier::apply_response;
use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::extractor::FormExtractor;
use formfill_domain::traits::ChatProvider;
use formfill_domain::{TargetRecord, UiState};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// Lifecycle of the credential-bound client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// No credentials have been submitted yet
    Uninitialized,
    /// A client is installed and ready for extraction calls
    Ready,
}

/// Explicitly owned slot for the credential-bound provider.
///
/// Replaces the module-global client handle of a naive implementation with a
/// value whose lifecycle is `Uninitialized → Ready → (replaced)`. Written
/// only via credential commands; read only by extraction.
#[derive(Debug)]
pub struct ClientSlot<P> {
    inner: Option<P>,
}

impl<P> Default for ClientSlot<P> {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl<P> ClientSlot<P> {
    /// Install a provider, replacing any prior one wholesale.
    pub fn install(&mut self, provider: P) {
        self.inner = Some(provider);
    }

    /// Remove the installed provider, if any.
    pub fn clear(&mut self) {
        self.inner = None;
    }

    /// Borrow the installed provider.
    pub fn get(&self) -> Option<&P> {
        self.inner.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClientState {
        if self.inner.is_some() {
            ClientState::Ready
        } else {
            ClientState::Uninitialized
        }
    }
}

/// Blocking user-facing notices.
///
/// Credential and missing-client failures surface through this; transport and
/// malformed-response failures never do (they only reach the diagnostic log).
pub trait Notifier {
    /// Surface a blocking notice to the user.
    fn alert(&self, message: &str);
}

/// Resolution of one extraction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Response parsed and merged into the record
    Applied,
    /// Blank input or missing client; nothing sent
    Skipped,
    /// Transport error, empty response, or malformed body; record untouched
    Failed,
}

/// Point-in-time view of the session, published after each mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    /// Last settled source text
    pub source_text: String,

    /// Current target record
    pub record: TargetRecord,

    /// Current display hint
    pub hint: Option<String>,

    /// True while a cycle is in flight
    pub loading: bool,

    /// Monotonically increasing change counter
    pub revision: u64,
}

/// Commands the front end can send to a running session.
#[derive(Debug)]
pub enum SessionCommand<P> {
    /// Install a freshly credential-bound client, replacing any prior one
    InstallClient(P),
    /// Drop the installed client (credential construction failed)
    ClearClient,
}

/// One user's extraction session.
pub struct FormSession<P, N> {
    slot: ClientSlot<P>,
    extractor: FormExtractor,
    record: TargetRecord,
    ui: UiState,
    notifier: N,
    snapshot_tx: watch::Sender<FormSnapshot>,
    source_text: String,
    revision: u64,
}

impl<P, N> FormSession<P, N>
where
    P: ChatProvider + Sync,
    P::Error: std::fmt::Display,
    N: Notifier,
{
    /// Create a session and the snapshot channel the view subscribes to.
    pub fn new(config: ExtractorConfig, notifier: N) -> (Self, watch::Receiver<FormSnapshot>) {
        let ui = UiState::initial();
        let initial = FormSnapshot {
            source_text: String::new(),
            record: TargetRecord::default(),
            hint: ui.hint.clone(),
            loading: false,
            revision: 0,
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let session = Self {
            slot: ClientSlot::default(),
            extractor: FormExtractor::new(config),
            record: TargetRecord::default(),
            ui,
            notifier,
            snapshot_tx,
            source_text: String::new(),
            revision: 0,
        };

        (session, snapshot_rx)
    }

    /// Install a credential-bound client, replacing any prior one.
    pub fn install_client(&mut self, provider: P) {
        self.slot.install(provider);
        info!("API client installed");
        self.publish();
    }

    /// Drop the installed client.
    pub fn clear_client(&mut self) {
        self.slot.clear();
        self.publish();
    }

    /// Current client lifecycle state.
    pub fn client_state(&self) -> ClientState {
        self.slot.state()
    }

    /// The record as filled in so far.
    pub fn record(&self) -> &TargetRecord {
        &self.record
    }

    /// The current display hint.
    pub fn hint(&self) -> Option<&str> {
        self.ui.hint.as_deref()
    }

    /// Run one extraction cycle for a settled text value.
    pub async fn handle_settled_text(&mut self, text: &str) -> CycleOutcome {
        self.source_text = text.to_string();
        self.ui.loading = true;
        self.publish();

        let outcome = match self.extractor.extract(self.slot.get(), text).await {
            Ok(None) => CycleOutcome::Skipped,
            Ok(Some(raw)) => match apply_response(&raw, &mut self.record, &mut self.ui) {
                Ok(()) => CycleOutcome::Applied,
                // Already logged by the applier; degrades silently.
                Err(_) => CycleOutcome::Failed,
            },
            Err(ExtractionError::NoClient) => {
                self.notifier.alert("Please enter an OpenAI API key");
                CycleOutcome::Skipped
            }
            Err(err) => {
                warn!("Extraction failed: {}", err);
                CycleOutcome::Failed
            }
        };

        self.ui.loading = false;
        self.publish();
        outcome
    }

    /// Drive the session until the settled-text stream closes (teardown).
    ///
    /// Settled text values are consumed one at a time; each cycle resolves
    /// before the next value is read. Commands are favored over settled text
    /// so a credential change applies before the next cycle.
    pub async fn run(
        mut self,
        mut settled: mpsc::UnboundedReceiver<String>,
        mut commands: mpsc::UnboundedReceiver<SessionCommand<P>>,
    ) {
        let mut commands_open = true;
        loop {
            tokio::select! {
                biased;
                command = commands.recv(), if commands_open => match command {
                    Some(SessionCommand::InstallClient(provider)) => self.install_client(provider),
                    Some(SessionCommand::ClearClient) => self.clear_client(),
                    None => commands_open = false,
                },
                text = settled.recv() => match text {
                    Some(text) => {
                        self.handle_settled_text(&text).await;
                    }
                    None => break,
                },
            }
        }
    }

    /// Notify the view. Explicit, not automatic: the view only redraws when
    /// told the state changed.
    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = FormSnapshot {
            source_text: self.source_text.clone(),
            record: self.record.clone(),
            hint: self.ui.hint.clone(),
            loading: self.ui.loading,
            revision: self.revision,
        };
        let _ = self.snapshot_tx.send(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::INITIAL_HINT;
    use formfill_llm::MockProvider;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub(crate) struct RecordingNotifier {
        alerts: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        pub(crate) fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    fn session() -> (
        FormSession<MockProvider, RecordingNotifier>,
        watch::Receiver<FormSnapshot>,
        RecordingNotifier,
    ) {
        let notifier = RecordingNotifier::default();
        let (session, snapshots) =
            FormSession::new(ExtractorConfig::default(), notifier.clone());
        (session, snapshots, notifier)
    }

    #[test]
    fn test_client_slot_lifecycle() {
        let mut slot: ClientSlot<MockProvider> = ClientSlot::default();
        assert_eq!(slot.state(), ClientState::Uninitialized);

        slot.install(MockProvider::new("{}"));
        assert_eq!(slot.state(), ClientState::Ready);

        slot.install(MockProvider::new("replacement"));
        assert_eq!(slot.state(), ClientState::Ready);

        slot.clear();
        assert_eq!(slot.state(), ClientState::Uninitialized);
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_initial_snapshot() {
        let (_session, snapshots, _notifier) = session();
        let snapshot = snapshots.borrow().clone();

        assert_eq!(snapshot.hint.as_deref(), Some(INITIAL_HINT));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.record, TargetRecord::default());
    }

    #[tokio::test]
    async fn test_cycle_without_client_alerts_and_skips() {
        let (mut session, _snapshots, notifier) = session();

        let outcome = session.handle_settled_text("Jane Doe").await;

        assert_eq!(outcome, CycleOutcome::Skipped);
        assert_eq!(notifier.alerts(), vec!["Please enter an OpenAI API key"]);
        assert_eq!(session.record(), &TargetRecord::default());
    }

    #[tokio::test]
    async fn test_cycle_with_blank_text_skips_silently() {
        let (mut session, _snapshots, notifier) = session();
        let provider = MockProvider::new("{}");
        session.install_client(provider.clone());

        let outcome = session.handle_settled_text("   ").await;

        assert_eq!(outcome, CycleOutcome::Skipped);
        assert!(notifier.alerts().is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_applied_cycle_updates_record_and_snapshot() {
        let (mut session, snapshots, _notifier) = session();
        session.install_client(MockProvider::new(
            r#"{"values":{"name":{"first":"Jane"}}, "hint":"Add your last name.", "ready":false}"#,
        ));

        let outcome = session.handle_settled_text("I'm Jane").await;

        assert_eq!(outcome, CycleOutcome::Applied);
        assert_eq!(session.record().name.first, "Jane");
        assert_eq!(session.hint(), Some("ℹ️ Add your last name."));

        let snapshot = snapshots.borrow().clone();
        assert_eq!(snapshot.record.name.first, "Jane");
        assert_eq!(snapshot.source_text, "I'm Jane");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_silently() {
        let (mut session, _snapshots, notifier) = session();
        session.install_client(MockProvider::failing("connection reset"));

        let outcome = session.handle_settled_text("Jane Doe").await;

        assert_eq!(outcome, CycleOutcome::Failed);
        assert!(notifier.alerts().is_empty());
        assert_eq!(session.record(), &TargetRecord::default());
        assert_eq!(session.hint(), Some(INITIAL_HINT));
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_silently() {
        let (mut session, _snapshots, notifier) = session();
        session.install_client(MockProvider::new("not json"));

        let outcome = session.handle_settled_text("Jane Doe").await;

        assert_eq!(outcome, CycleOutcome::Failed);
        assert!(notifier.alerts().is_empty());
        assert_eq!(session.hint(), Some(INITIAL_HINT));
    }

    #[tokio::test]
    async fn test_each_publish_bumps_revision() {
        let (mut session, snapshots, _notifier) = session();
        session.install_client(MockProvider::new("{}"));
        let before = snapshots.borrow().revision;

        session.handle_settled_text("Jane").await;

        // One publish entering the cycle, one resolving it.
        assert_eq!(snapshots.borrow().revision, before + 2);
    }

    #[tokio::test]
    async fn test_run_consumes_settled_values_sequentially() {
        let (session, snapshots, _notifier) = session();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(session.run(settled_rx, command_rx));

        command_tx
            .send(SessionCommand::InstallClient(MockProvider::new(
                r#"{"values":{"name":{"first":"Jane"}}, "ready":false}"#,
            )))
            .unwrap();
        settled_tx.send("I'm Jane".to_string()).unwrap();

        drop(settled_tx);
        drop(command_tx);
        task.await.unwrap();

        assert_eq!(snapshots.borrow().record.name.first, "Jane");
    }
}
