//! Periodic refresh of a single data category.
//!
//! A [`DataPoller`] owns the fetch lifecycle for one [`DataSource`]: it issues
//! one fetch immediately on [`DataPoller::start`], one per interval tick after
//! that, and an extra one on every [`DataPoller::retry`]. Each fetch moves the
//! published [`RefreshState`] through `Loading` to `Ready` or `Error`.
//!
//! # Cancellation
//!
//! Every start/stop cycle runs under an epoch number. Stopping the poller or
//! changing its language bumps the epoch, and a response that resolves under
//! an older epoch is dropped without touching the state. The interval task is
//! aborted on stop and when the poller is dropped.
//!
//! # Overlapping fetches
//!
//! Fetches are never deduplicated or cancelled against each other. Each one
//! carries a generation number. Under [`ResponseOrder::LatestIssued`] only the
//! most recently issued generation may publish, so a slow response can no
//! longer overwrite a newer one. [`ResponseOrder::LastWriteWins`] keeps the
//! original behavior where whichever response resolves last wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::i18n::Language;
use crate::source::{DataSource, FetchError};

pub use crate::source::ErrorKind;

/// Refresh interval used when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// What the UI can render for one data category.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshState<T> {
    Loading,
    Ready {
        data: T,
        fetched_at: DateTime<Utc>,
    },
    Error {
        kind: ErrorKind,
        retryable: bool,
        message: String,
    },
}

impl<T> RefreshState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RefreshState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RefreshState::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => RefreshState::Ready {
                data,
                fetched_at: Utc::now(),
            },
            Err(err) => RefreshState::Error {
                kind: err.kind(),
                retryable: err.is_retryable(),
                message: err.to_string(),
            },
        }
    }
}

/// Which of several overlapping responses may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrder {
    /// Only the most recently issued fetch publishes; older ones are dropped.
    #[default]
    LatestIssued,
    /// Responses publish in resolution order, stale or not.
    LastWriteWins,
}

/// Poller tuning.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub interval: Duration,
    pub order: ResponseOrder,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            order: ResponseOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Scheduled,
    Retry,
}

struct Control {
    language: Language,
    running: bool,
    epoch: u64,
    issued: u64,
    timer: Option<JoinHandle<()>>,
}

struct Shared<S: DataSource> {
    source: S,
    config: PollerConfig,
    state: watch::Sender<RefreshState<S::Output>>,
    control: Mutex<Control>,
}

impl<S: DataSource> Shared<S> {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue one fetch under the current language and epoch.
    fn issue(self: &Arc<Self>, trigger: Trigger) {
        let (generation, epoch, lang) = {
            let mut control = self.control();
            if !control.running {
                return;
            }
            control.issued += 1;
            self.state.send_replace(RefreshState::Loading);
            (control.issued, control.epoch, control.language)
        };

        debug!(
            category = %self.source.category(),
            %lang,
            generation,
            ?trigger,
            "Fetch issued"
        );

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = shared.source.fetch(lang).await;
            shared.apply(generation, epoch, lang, result);
        });
    }

    fn apply(
        &self,
        generation: u64,
        epoch: u64,
        lang: Language,
        result: Result<S::Output, FetchError>,
    ) {
        let category = self.source.category();
        let control = self.control();

        if !control.running || control.epoch != epoch {
            debug!(%category, %lang, generation, "Response from cancelled cycle dropped");
            return;
        }
        if self.config.order == ResponseOrder::LatestIssued && generation != control.issued {
            debug!(
                %category,
                %lang,
                generation,
                latest = control.issued,
                "Stale response dropped"
            );
            return;
        }

        match &result {
            Ok(_) => debug!(%category, %lang, generation, "Fetch completed"),
            Err(err) => warn!(
                %category,
                %lang,
                generation,
                error = %err,
                "Fetch failed"
            ),
        }

        // Published under the lock so a concurrent stop() cannot interleave.
        self.state.send_replace(RefreshState::from_result(result));
    }
}

/// Owns the refresh cycle for one data category.
pub struct DataPoller<S: DataSource> {
    shared: Arc<Shared<S>>,
}

impl<S: DataSource> DataPoller<S> {
    pub fn new(source: S, language: Language, config: PollerConfig) -> Self {
        let (state, _) = watch::channel(RefreshState::Loading);
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                state,
                control: Mutex::new(Control {
                    language,
                    running: false,
                    epoch: 0,
                    issued: 0,
                    timer: None,
                }),
            }),
        }
    }

    /// Begin the refresh cycle: one fetch now, then one per interval.
    ///
    /// Must be called from within a tokio runtime. No-op if already running.
    pub fn start(&self) {
        let mut control = self.shared.control();
        if control.running {
            return;
        }
        control.running = true;

        let shared = Arc::clone(&self.shared);
        let interval = self.shared.config.interval;
        control.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                shared.issue(Trigger::Scheduled);
            }
        }));
    }

    /// Cancel the timer and suppress every in-flight fetch.
    pub fn stop(&self) {
        let mut control = self.shared.control();
        control.running = false;
        control.epoch += 1;
        if let Some(timer) = control.timer.take() {
            timer.abort();
        }
    }

    /// Fetch immediately, outside the interval schedule.
    ///
    /// The interval keeps its own cadence. Ignored while stopped.
    pub fn retry(&self) {
        if !self.is_running() {
            debug!(category = %self.shared.source.category(), "Retry ignored, poller stopped");
            return;
        }
        self.shared.issue(Trigger::Retry);
    }

    /// Switch language, discarding in-flight responses for the old one.
    ///
    /// A running poller restarts its cycle, which fetches immediately.
    pub fn set_language(&self, language: Language) {
        let was_running = {
            let mut control = self.shared.control();
            if control.language == language {
                return;
            }
            control.language = language;
            control.running
        };

        self.stop();
        self.shared.state.send_replace(RefreshState::Loading);
        if was_running {
            self.start();
        }
    }

    /// Stop and start again with fresh state.
    pub fn restart(&self) {
        self.stop();
        self.shared.state.send_replace(RefreshState::Loading);
        self.start();
    }

    pub fn state(&self) -> RefreshState<S::Output> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshState<S::Output>> {
        self.shared.state.subscribe()
    }

    pub fn language(&self) -> Language {
        self.shared.control().language
    }

    pub fn is_running(&self) -> bool {
        self.shared.control().running
    }

    pub fn source(&self) -> &S {
        &self.shared.source
    }
}

impl<S: DataSource> Drop for DataPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
