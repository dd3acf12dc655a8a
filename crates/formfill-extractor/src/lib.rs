//! Formfill Extractor
//!
//! Turns debounced free-text changes into structured form updates using a
//! hosted chat-completion provider.
//!
//! # Overview
//!
//! The pipeline is deliberately small: a quiet-window debouncer settles the
//! stream of text changes, the extraction client sends a fixed two-message
//! prompt to the provider, and the response applier merges the JSON-shaped
//! answer into the target record and derives a display hint.
//!
//! # Architecture
//!
//! ```text
//! Text changes → Debouncer → FormSession → ChatProvider
//!                                 │
//!                                 └→ apply_response → TargetRecord + hint
//!                                        │
//!                                        └→ watch::Sender<FormSnapshot> → View
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use formfill_extractor::{ExtractorConfig, FormSession, Notifier};
//! use formfill_llm::OpenAiProvider;
//!
//! struct StderrNotifier;
//!
//! impl Notifier for StderrNotifier {
//!     fn alert(&self, message: &str) {
//!         eprintln!("{}", message);
//!     }
//! }
//!
//! # async fn example() {
//! let (mut session, _snapshots) =
//!     FormSession::<OpenAiProvider, _>::new(ExtractorConfig::default(), StderrNotifier);
//!
//! let provider = OpenAiProvider::with_api_key("sk-...").unwrap();
//! session.install_client(provider);
//!
//! let outcome = session
//!     .handle_settled_text("I'm Jane Doe, 123 Main St, Springfield IL 62704")
//!     .await;
//! println!("{:?}: {:?}", outcome, session.record());
//! # }
//! ```

#![warn(missing_docs)]

mod applier;
mod config;
mod debounce;
mod error;
mod extractor;
mod prompt;
mod session;


pub use applier::apply_response;
pub use config::{ExtractorConfig, DEFAULT_MODEL, DEFAULT_QUIET_WINDOW_MS};
pub use debounce::Debouncer;
pub use error::{ApplyError, ExtractionError};
pub use extractor::FormExtractor;
pub use session::{
    ClientSlot, ClientState, CycleOutcome, FormSession, FormSnapshot, Notifier, SessionCommand,
};
