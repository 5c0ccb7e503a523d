//! Caller-side orchestration of edits into translation calls.
//!
//! A session runs at most one call at a time. Edits that arrive while a call
//! is in flight collapse into a single pending text, and only the latest one
//! is issued once the call finishes. [`Debouncer`] sits in front of the
//! session and turns bursts of edits into one submission.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::debug;

use crate::config::Lang;
use crate::coordinator::{TranslateResponse, TranslationService};
use crate::language::detect_direction;

/// Progress notifications for whoever renders the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        text: String,
        source: Lang,
        target: Lang,
    },
    Finished {
        text: String,
        response: TranslateResponse,
    },
    /// Input became blank; the result area should be emptied
    Cleared,
}

#[derive(Debug, Default)]
struct SessionState {
    in_flight: bool,
    pending: Option<String>,
}

pub struct TranslationSession {
    service: Arc<dyn TranslationService>,
    state: Mutex<SessionState>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl TranslationSession {
    pub fn new(
        service: Arc<dyn TranslationService>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Arc::new(Self {
            service,
            state: Mutex::new(SessionState::default()),
            events,
        });
        (session, rx)
    }

    /// Whether a call is currently running
    pub fn is_busy(&self) -> bool {
        self.lock_state().in_flight
    }

    /// Submit the current input.
    ///
    /// Returns immediately when another call is in flight; that call's task
    /// picks the text up afterwards unless it equals what it just translated.
    pub async fn submit(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.emit(SessionEvent::Cleared);
            return;
        }

        {
            let mut state = self.lock_state();
            if state.in_flight {
                debug!("Call in flight, queueing {} chars", text.chars().count());
                state.pending = Some(text.to_string());
                return;
            }
            state.in_flight = true;
        }

        let mut current = text.to_string();
        loop {
            self.run(&current).await;

            let next = {
                let mut state = self.lock_state();
                match state.pending.take() {
                    Some(next) if next != current => Some(next),
                    _ => {
                        state.in_flight = false;
                        None
                    }
                }
            };

            match next {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    async fn run(&self, text: &str) {
        let (source, target) = detect_direction(text);
        self.emit(SessionEvent::Started {
            text: text.to_string(),
            source: source.clone(),
            target: target.clone(),
        });

        let response = self
            .service
            .translate(text, &source, &target)
            .await
            .into_response();

        self.emit(SessionEvent::Finished {
            text: text.to_string(),
            response,
        });
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine
        let _ = self.events.send(event);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop completed submissions so a long session doesn't accumulate them
fn reap_finished(submissions: &mut JoinSet<()>) -> usize {
    let mut reaped = 0;
    while submissions.try_join_next().is_some() {
        reaped += 1;
    }
    reaped
}

/// Collapses edit bursts into single submissions.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
    handle: tokio::task::JoinHandle<()>,
}

impl Debouncer {
    pub fn spawn(session: Arc<TranslationSession>, window: Duration) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = tokio::spawn(async move {
            let mut submissions = JoinSet::new();
            let mut latest: Option<String> = None;

            loop {
                reap_finished(&mut submissions);

                let next = if latest.is_some() {
                    match timeout(window, rx.recv()).await {
                        Ok(next) => next,
                        Err(_) => {
                            if let Some(text) = latest.take() {
                                let session = Arc::clone(&session);
                                submissions.spawn(async move { session.submit(&text).await });
                            }
                            continue;
                        }
                    }
                } else {
                    rx.recv().await
                };

                match next {
                    Some(text) => latest = Some(text),
                    None => break,
                }
            }

            if let Some(text) = latest.take() {
                let session = Arc::clone(&session);
                submissions.spawn(async move { session.submit(&text).await });
            }
            while submissions.join_next().await.is_some() {}
        });

        Self { tx, handle }
    }

    /// Record an edit; returns false once the debouncer has stopped
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.tx.send(text.into()).is_ok()
    }

    /// Flush the last burst and wait for every submission to complete
    pub async fn finish(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}
