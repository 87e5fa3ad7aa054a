//! Search module - Header global search
//!
//! This module provides functionality for:
//! - Ranking categories, people and jobs against the typed query
//! - Persisting a capped, most-recent-first search history
//! - Debouncing keystrokes into remote lookups and discarding stale responses
//! - Resolving a chosen result into a navigation path
//!
//! # Module Structure
//!
//! - `types` - Candidate and result types (Category, Person, Job, etc.)
//! - `ranking` - Relevance scoring and ordering
//! - `storage` - Key-value persistence backends
//! - `history` - Recent-search history over a key-value store
//! - `dispatch` - Debouncer, sequence guard and background search worker
//! - `navigation` - Selection to destination mapping
//! - `session` - The search box state machine tying the above together

mod dispatch;
mod history;
mod navigation;
mod ranking;
mod session;
mod storage;
mod types;

pub use types::{
    Category, GlobalSearchResponse, Job, Person, ScoredCandidate, SearchResults, SearchTab,
};

pub use ranking::{
    comparison_text, rank, score_candidates, text_score, RankedResults, Searchable,
    CATEGORY_KEYS, JOB_KEYS, PERSON_KEYS,
};

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

pub use history::SearchHistory;

pub use dispatch::{
    execute_search, QuerySink, SearchDebouncer, SearchOutcome, SearchResponse, SearchWorker,
    SequenceGuard,
};

pub use navigation::{encode_uri_component, search_destination, Selection};

pub use session::{SearchSession, CONFIRM_KEY};

#[cfg(test)]
#[path = "../search_tests.rs"]
mod tests;
