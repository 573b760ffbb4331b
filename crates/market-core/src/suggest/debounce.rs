//! Debounced suggestion driver.
//!
//! Each keystroke aborts the pending computation and starts a new one after
//! the quiet period. A generation counter tags every computation so that a
//! result for a superseded term is dropped on arrival instead of applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::ListingConfig;
use crate::suggest::{SuggestionBackend, SuggestionResult, SynthesizedBackend};

/// Quiet period before a suggestion computation runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the dropdown shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionState {
    /// Term the suggestions were computed for.
    pub term: String,
    pub suggestions: Vec<SuggestionResult>,
    /// A computation is in flight.
    pub loading: bool,
}

/// Runs the backend for the latest term once input has been quiet.
///
/// Must be driven from inside a tokio runtime.
pub struct SuggestionEngine {
    backend: Arc<dyn SuggestionBackend>,
    quiet_period: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: Arc<watch::Sender<SuggestionState>>,
}

impl SuggestionEngine {
    pub fn new(backend: Arc<dyn SuggestionBackend>) -> Self {
        let (tx, _rx) = watch::channel(SuggestionState::default());
        Self {
            backend,
            quiet_period: DEFAULT_DEBOUNCE,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx: Arc::new(tx),
        }
    }

    /// Reference backend with the configured limit and quiet period.
    pub fn from_config(config: &ListingConfig) -> Self {
        let backend = SynthesizedBackend::reference().with_limit(config.suggestion_limit);
        Self::new(Arc::new(backend)).with_quiet_period(config.debounce())
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Receive every applied state.
    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.tx.subscribe()
    }

    /// Latest applied state.
    pub fn current(&self) -> SuggestionState {
        self.tx.borrow().clone()
    }

    /// Feed the full input value after a keystroke.
    ///
    /// A blank term clears the suggestions right away without calling the
    /// backend.
    pub fn input(&mut self, term: impl Into<String>) {
        let term = term.into();
        let generation = self.supersede();

        if term.trim().is_empty() {
            self.tx.send_replace(SuggestionState {
                term,
                suggestions: Vec::new(),
                loading: false,
            });
            return;
        }

        let backend = Arc::clone(&self.backend);
        let current = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);
        let quiet_period = self.quiet_period;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            tx.send_modify(|state| state.loading = true);
            debug!(term = %term, "computing suggestions");

            let suggestions = match backend.suggest(&term).await {
                Ok(suggestions) => suggestions,
                Err(e) => {
                    warn!(term = %term, error = %e, "suggestion backend failed");
                    Vec::new()
                }
            };

            if current.load(Ordering::SeqCst) != generation {
                debug!(term = %term, "discarding stale suggestions");
                return;
            }

            tx.send_replace(SuggestionState {
                term,
                suggestions,
                loading: false,
            });
        }));
    }

    /// Empty the input.
    pub fn clear(&mut self) {
        self.input(String::new());
    }

    /// Drop the pending computation, keeping whatever is shown.
    pub fn cancel(&mut self) {
        self.supersede();
        self.tx.send_modify(|state| state.loading = false);
    }

    /// Whether a computation is scheduled or running.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("cancelling pending suggestion computation");
            }
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Drop for SuggestionEngine {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every term it is asked about and optionally waits first.
    #[derive(Default)]
    struct RecordingBackend {
        terms: Mutex<Vec<String>>,
        latency: Duration,
    }

    impl RecordingBackend {
        fn with_latency(latency: Duration) -> Self {
            Self {
                latency,
                ..Self::default()
            }
        }

        fn terms(&self) -> Vec<String> {
            self.terms.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SuggestionBackend for RecordingBackend {
        async fn suggest(&self, term: &str) -> Result<Vec<SuggestionResult>, MarketError> {
            self.terms.lock().unwrap().push(term.to_string());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            Ok(SynthesizedBackend::reference().suggest_now(term))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl SuggestionBackend for FailingBackend {
        async fn suggest(&self, _term: &str) -> Result<Vec<SuggestionResult>, MarketError> {
            Err(MarketError::SuggestionBackend("timeout".to_string()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_term_is_computed() {
        let backend = Arc::new(RecordingBackend::default());
        let mut engine = SuggestionEngine::new(backend.clone());

        engine.input("iPhone");
        tokio::time::sleep(ms(100)).await;
        engine.input("iPhone 1");
        tokio::time::sleep(ms(400)).await;

        assert_eq!(backend.terms(), vec!["iPhone 1".to_string()]);
        let state = engine.current();
        assert_eq!(state.term, "iPhone 1");
        assert_eq!(state.suggestions.len(), 3);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_runs_before_quiet_period() {
        let backend = Arc::new(RecordingBackend::default());
        let mut engine = SuggestionEngine::new(backend.clone());

        engine.input("desk");
        tokio::time::sleep(ms(299)).await;
        assert!(backend.terms().is_empty());
        assert!(engine.is_pending());

        tokio::time::sleep(ms(2)).await;
        assert_eq!(backend.terms(), vec!["desk".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_result_is_never_applied() {
        let backend = Arc::new(RecordingBackend::with_latency(ms(500)));
        let mut engine = SuggestionEngine::new(backend.clone());
        let mut rx = engine.subscribe();

        engine.input("lamp");
        tokio::time::sleep(ms(350)).await;
        // "lamp" is now inside the backend call
        engine.input("lamps");
        tokio::time::sleep(ms(1000)).await;

        assert_eq!(backend.terms(), vec!["lamp".to_string(), "lamps".to_string()]);
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.term, "lamps");
        assert_eq!(state.suggestions[0].title, "lamps Pro Max");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_becomes_empty_list() {
        let mut engine = SuggestionEngine::new(Arc::new(FailingBackend));
        engine.input("bike");
        tokio::time::sleep(ms(400)).await;

        let state = engine.current();
        assert_eq!(state.term, "bike");
        assert!(state.suggestions.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_clears_immediately() {
        let backend = Arc::new(RecordingBackend::default());
        let mut engine = SuggestionEngine::new(backend.clone());

        engine.input("sofa");
        tokio::time::sleep(ms(400)).await;
        assert_eq!(engine.current().suggestions.len(), 3);

        engine.clear();
        assert!(engine.current().suggestions.is_empty());
        tokio::time::sleep(ms(400)).await;
        assert_eq!(backend.terms().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_shown_suggestions() {
        let backend = Arc::new(RecordingBackend::default());
        let mut engine = SuggestionEngine::new(backend.clone());

        engine.input("tv");
        tokio::time::sleep(ms(400)).await;
        engine.input("tv stand");
        engine.cancel();
        tokio::time::sleep(ms(400)).await;

        assert_eq!(backend.terms(), vec!["tv".to_string()]);
        assert_eq!(engine.current().term, "tv");
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_quiet_period() {
        let config = ListingConfig {
            debounce_ms: 50,
            suggestion_limit: 2,
            ..ListingConfig::default()
        };
        let mut engine = SuggestionEngine::from_config(&config);
        assert_eq!(engine.quiet_period(), ms(50));

        engine.input("chair");
        tokio::time::sleep(ms(60)).await;
        assert_eq!(engine.current().suggestions.len(), 2);
    }
}
