//! Header search session
//!
//! Owns the typed query, the active result tab, the latest accepted results
//! and the persisted history. Remote lookups go through an injected
//! [`QuerySink`]; responses come back through [`SearchSession::apply_response`]
//! and are accepted only if their sequence number is still current.

use tracing::{debug, info};

use super::dispatch::{QuerySink, SearchOutcome, SearchResponse, SequenceGuard};
use super::history::SearchHistory;
use super::navigation::{search_destination, Selection};
use super::ranking::RankedResults;
use super::storage::KeyValueStore;
use super::types::{SearchResults, SearchTab};
use crate::error::ResultExt;
use crate::logging;

/// Key that confirms the current query
pub const CONFIRM_KEY: &str = "Enter";

pub struct SearchSession<S: KeyValueStore, Q: QuerySink> {
    history: SearchHistory<S>,
    sink: Q,
    guard: SequenceGuard,
    query: String,
    active_tab: SearchTab,
    results: SearchResults,
    dropdown_open: bool,
    last_error: Option<String>,
}

impl<S: KeyValueStore, Q: QuerySink> SearchSession<S, Q> {
    /// Create a session and load persisted history.
    ///
    /// `guard` must be the one the sink numbers its requests with.
    pub fn new(mut history: SearchHistory<S>, sink: Q, guard: SequenceGuard) -> Self {
        history.load();
        SearchSession {
            history,
            sink,
            guard,
            query: String::new(),
            active_tab: SearchTab::All,
            results: SearchResults::default(),
            dropdown_open: false,
            last_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_tab(&self) -> SearchTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: SearchTab) {
        self.active_tab = tab;
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    /// Message of the most recent failed lookup, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn sink(&self) -> &Q {
        &self.sink
    }

    /// Current results ranked against the trimmed query
    pub fn ranked(&self) -> RankedResults {
        RankedResults::rank_all(self.query.trim(), &self.results)
    }

    /// Keystroke in the search box: update the query and schedule a lookup
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.sink.schedule(text);
    }

    /// Apply a dispatcher response; returns false if it was stale and ignored
    pub fn apply_response(&mut self, response: SearchResponse) -> bool {
        if !self.guard.is_current(response.seq) {
            debug!(
                seq = response.seq,
                latest = self.guard.latest(),
                query = %response.query,
                "Discarding superseded search response"
            );
            return false;
        }

        match response.outcome {
            SearchOutcome::Results(body) => {
                // An unsuccessful body is not an update
                if body.success {
                    self.results = body.into();
                    self.dropdown_open = true;
                    self.last_error = None;
                }
            }
            SearchOutcome::Cleared => {
                self.results = SearchResults::default();
                self.dropdown_open = false;
            }
            SearchOutcome::Failed(message) => {
                self.last_error = Some(message);
            }
        }
        true
    }

    /// Choose a result: record it in history, reset the search box and
    /// return where to navigate.
    pub fn select(&mut self, selection: Selection) -> String {
        let text = selection.display_text();
        self.history.save(&text).log_err();

        let destination = selection.destination();
        info!(kind = selection.kind(), destination = %destination, "Search result selected");

        self.dropdown_open = false;
        self.query.clear();
        destination
    }

    /// Confirm key: pick the first ranked item of the active tab, otherwise
    /// search for the raw query text.
    pub fn confirm(&mut self) -> String {
        let ranked = self.ranked();
        let first = match self.active_tab {
            SearchTab::People => ranked.people.into_iter().next().map(Selection::Person),
            SearchTab::Categories => ranked
                .categories
                .into_iter()
                .next()
                .map(Selection::Category),
            SearchTab::Jobs => ranked.jobs.into_iter().next().map(Selection::Job),
            SearchTab::All => None,
        };

        if let Some(selection) = first {
            return self.select(selection);
        }

        self.history.save(&self.query).log_err();
        let destination = search_destination(&self.query);
        self.dropdown_open = false;
        self.query.clear();
        destination
    }

    /// Key press in the search box; only the confirm key navigates
    pub fn on_key(&mut self, key: &str) -> Option<String> {
        if key != CONFIRM_KEY {
            return None;
        }
        logging::log_key_event(key, "confirm_search");
        Some(self.confirm())
    }

    /// Re-run a past search from the history list
    pub fn click_history(&mut self, text: &str) {
        self.query = text.to_string();
        self.sink.schedule(text);
        self.dropdown_open = true;
    }

    /// Jump to a trending hashtag
    pub fn click_trending(&mut self, tag: &str) -> String {
        let tag = tag.trim_start_matches('#');
        self.sink.dispatch_now(tag);
        let destination = self.select(Selection::Hashtag(tag.to_string()));
        // The box keeps showing the tag that was opened
        self.query = format!("#{}", tag);
        destination
    }

    pub fn clear_history(&mut self) {
        self.history.clear().log_err();
    }
}
