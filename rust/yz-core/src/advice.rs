//! Non-blocking advice fetching.
//!
//! `AdviceFetcher` runs one blocking [`AdviceSource::fetch`] at a time on a
//! background thread. The thread only ever sends its finished text over a
//! channel; the engine picks it up with [`AdviceFetcher::poll_result`] during
//! its own tick. Failures never leave the fetcher: they become the fallback text.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed advice payload: {0}")]
    Malformed(String),
}

/// Blocking producer of one advice string (typically a network call with its own timeout).
pub trait AdviceSource: Send + Sync + 'static {
    fn fetch(&self) -> Result<String, AdviceError>;
}

/// Source that answers from a fixed list, cycling through it. Used offline and in simulations.
#[derive(Debug)]
pub struct StaticAdviceSource {
    lines: Vec<String>,
    next: AtomicUsize,
}

impl StaticAdviceSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl AdviceSource for StaticAdviceSource {
    fn fetch(&self) -> Result<String, AdviceError> {
        if self.lines.is_empty() {
            return Err(AdviceError::Malformed("no advice lines configured".to_string()));
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed) % self.lines.len();
        Ok(self.lines[i].clone())
    }
}

pub struct AdviceFetcher {
    source: Arc<dyn AdviceSource>,
    fallback: String,
    tx: mpsc::Sender<(u64, String)>,
    rx: mpsc::Receiver<(u64, String)>,
    /// Request id + thread of the fetch started last.
    inflight: Option<(u64, JoinHandle<()>)>,
    requests: u64,
}

impl AdviceFetcher {
    pub fn new(source: Arc<dyn AdviceSource>, fallback: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            fallback: fallback.into(),
            tx,
            rx,
            inflight: None,
            requests: 0,
        }
    }

    /// True between `request_fetch` and the moment the fetch thread has produced its result.
    pub fn is_loading(&self) -> bool {
        self.inflight.as_ref().is_some_and(|(_, h)| !h.is_finished())
    }

    /// Number of fetches actually started.
    pub fn requests_started(&self) -> u64 {
        self.requests
    }

    /// Start a fetch unless one is already in flight. Returns whether a fetch was started.
    pub fn request_fetch(&mut self) -> bool {
        if self.is_loading() {
            debug!("advice fetch already in flight; ignoring request");
            return false;
        }
        if self.inflight.is_some() {
            self.reap();
        }

        self.requests += 1;
        let id = self.requests;
        let source = Arc::clone(&self.source);
        let fallback = self.fallback.clone();
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("yz-advice-fetch".to_string())
            .spawn(move || {
                let text = match source.fetch() {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "advice fetch failed; using fallback");
                        fallback
                    }
                };
                // The fetcher may be gone by now; nobody is left to read the result then.
                let _ = tx.send((id, text));
            });

        match spawned {
            Ok(handle) => self.inflight = Some((id, handle)),
            Err(e) => {
                warn!(error = %e, "could not spawn advice thread; using fallback");
                let _ = self.tx.send((id, self.fallback.clone()));
            }
        }
        debug!(request = id, "advice fetch started");
        true
    }

    /// Id of the most recently started fetch (0 before the first one).
    pub fn last_request_id(&self) -> u64 {
        self.requests
    }

    /// Take the most recently completed result, if any. Each result is returned at most once.
    pub fn poll_result(&mut self) -> Option<String> {
        self.poll_tagged().map(|(_, text)| text)
    }

    /// Like [`Self::poll_result`], with the id of the request that produced the text.
    pub fn poll_tagged(&mut self) -> Option<(u64, String)> {
        let mut latest = None;
        while let Ok(msg) = self.rx.try_recv() {
            latest = Some(msg);
        }
        let (id, text) = latest?;
        // The sender of the newest in-flight request has already handed over its result.
        if self.inflight.as_ref().is_some_and(|(cur, _)| *cur == id) {
            self.reap();
        }
        Some((id, text))
    }

    /// Join the last fetch thread. Only called once it has finished or sent its result.
    fn reap(&mut self) {
        if let Some((id, h)) = self.inflight.take() {
            if h.join().is_err() {
                warn!(request = id, "advice thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for AdviceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceFetcher")
            .field("loading", &self.is_loading())
            .field("requests", &self.requests)
            .finish()
    }
}
