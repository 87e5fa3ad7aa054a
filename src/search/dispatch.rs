//! Debounced, ordered dispatch of remote search queries
//!
//! Typing feeds a trailing-edge [`SearchDebouncer`]: a query fires only after
//! the input has been quiet for the debounce interval. Every fired query takes
//! the next number from a shared [`SequenceGuard`], and a response may update
//! visible results only while its number is still the latest issued. Queries
//! run one at a time on the worker's request thread: one superseded while
//! waiting is skipped, and one that finishes after a newer query was issued is
//! discarded by the consumer through the guard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::types::GlobalSearchResponse;
use crate::api::HeaderApi;

/// Trailing-edge debounce state for typed queries
#[derive(Debug)]
pub struct SearchDebouncer {
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(interval: Duration) -> Self {
        SearchDebouncer {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record new input; restarts the quiet period
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now + self.interval));
    }

    /// When the pending query (if any) becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Take the pending query once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(q, _)| q),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Monotonic request counter shared between dispatcher and consumer
#[derive(Debug, Clone, Default)]
pub struct SequenceGuard {
    latest: Arc<AtomicU64>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number; it becomes the only current one
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest()
    }
}

/// What a dispatched query produced
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The service answered
    Results(GlobalSearchResponse),
    /// The query was blank; visible results should be cleared
    Cleared,
    /// The request failed; visible results stay as they were
    Failed(String),
}

/// A response tagged with the sequence number of the request that caused it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub seq: u64,
    pub query: String,
    pub outcome: SearchOutcome,
}

/// Issue a sequence number and run one query to completion (blocking)
pub fn execute_search(api: &dyn HeaderApi, guard: &SequenceGuard, query: &str) -> SearchResponse {
    run_search(api, guard.issue(), query)
}

/// Run one query already tagged with `seq`
fn run_search(api: &dyn HeaderApi, seq: u64, query: &str) -> SearchResponse {
    let trimmed = query.trim();

    let outcome = if trimmed.is_empty() {
        SearchOutcome::Cleared
    } else {
        match api.global_search(trimmed) {
            Ok(response) => SearchOutcome::Results(response),
            Err(e) => {
                warn!(error = %e, seq = seq, "Global search failed");
                SearchOutcome::Failed(e.user_message())
            }
        }
    };

    SearchResponse {
        seq,
        query: trimmed.to_string(),
        outcome,
    }
}

/// Where the session hands queries for remote lookup
pub trait QuerySink {
    /// Debounced: fires after the quiet period unless superseded
    fn schedule(&self, query: &str);
    /// Immediate: bypasses the debounce
    fn dispatch_now(&self, query: &str);
}

enum WorkerCommand {
    Input(String),
    Immediate(String),
}

/// Background dispatcher: debounces input on its own thread and hands fired
/// queries to a single request thread. Responses are delivered over an async
/// channel; consumers filter them with the shared [`SequenceGuard`].
pub struct SearchWorker {
    commands: mpsc::Sender<WorkerCommand>,
    responses: async_channel::Receiver<SearchResponse>,
    guard: SequenceGuard,
}

impl SearchWorker {
    pub fn start(api: Arc<dyn HeaderApi>, interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (req_tx, req_rx) = mpsc::channel::<(u64, String)>();
        let (resp_tx, resp_rx) = async_channel::unbounded::<SearchResponse>();
        let guard = SequenceGuard::new();
        let thread_guard = guard.clone();

        let request_guard = guard.clone();
        std::thread::spawn(move || run_requests(api, request_guard, req_rx, resp_tx));

        std::thread::spawn(move || {
            info!(interval_ms = interval.as_millis() as u64, "Search dispatcher started");
            let mut debouncer = SearchDebouncer::new(interval);

            loop {
                let received = match debouncer.deadline() {
                    Some(due) => {
                        let wait = due.saturating_duration_since(Instant::now());
                        cmd_rx.recv_timeout(wait)
                    }
                    None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                };

                match received {
                    Ok(WorkerCommand::Input(query)) => debouncer.input(query, Instant::now()),
                    Ok(WorkerCommand::Immediate(query)) => {
                        debouncer.cancel();
                        enqueue(&req_tx, &thread_guard, query);
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        if let Some(query) = debouncer.poll(Instant::now()) {
                            enqueue(&req_tx, &thread_guard, query);
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("Search dispatcher exiting");
        });

        SearchWorker {
            commands: cmd_tx,
            responses: resp_rx,
            guard,
        }
    }

    /// Receiver for responses, to be awaited or polled by the UI loop
    pub fn responses(&self) -> &async_channel::Receiver<SearchResponse> {
        &self.responses
    }

    pub fn guard(&self) -> &SequenceGuard {
        &self.guard
    }
}

fn enqueue(requests: &mpsc::Sender<(u64, String)>, guard: &SequenceGuard, query: String) {
    // Numbered in dispatch order, so a newer query supersedes any still queued
    let seq = guard.issue();
    if requests.send((seq, query)).is_err() {
        warn!(seq = seq, "Search request thread is gone");
    }
}

fn run_requests(
    api: Arc<dyn HeaderApi>,
    guard: SequenceGuard,
    requests: mpsc::Receiver<(u64, String)>,
    responses: async_channel::Sender<SearchResponse>,
) {
    for (seq, query) in requests {
        if !guard.is_current(seq) {
            debug!(seq = seq, "Skipping superseded search");
            continue;
        }
        let response = run_search(api.as_ref(), seq, &query);
        debug!(seq = response.seq, "Search request finished");
        if responses.send_blocking(response).is_err() {
            debug!("Search response channel closed");
            break;
        }
    }
}

impl QuerySink for SearchWorker {
    fn schedule(&self, query: &str) {
        if self
            .commands
            .send(WorkerCommand::Input(query.to_string()))
            .is_err()
        {
            warn!("Search dispatcher is gone, dropping query");
        }
    }

    fn dispatch_now(&self, query: &str) {
        if self
            .commands
            .send(WorkerCommand::Immediate(query.to_string()))
            .is_err()
        {
            warn!("Search dispatcher is gone, dropping query");
        }
    }
}
