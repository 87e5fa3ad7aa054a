//! Search candidate and result type definitions
//!
//! Candidates arrive fresh from the global-search endpoint on every query.
//! Missing text fields deserialize to empty strings so ranking can treat
//! them uniformly.

use serde::{Deserialize, Serialize};

/// A category returned by global search
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A person (user profile) returned by global search
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "profileAvatar")]
    pub avatar_url: String,
}

/// A job posting returned by global search
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
}

/// A candidate paired with its relevance score (higher = more relevant)
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCandidate<T> {
    pub item: T,
    pub score: f64,
}

/// Wire shape of `GET /global-search?q=`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Raw (unranked) candidate lists currently held by the header
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    pub categories: Vec<Category>,
    pub people: Vec<Person>,
    pub jobs: Vec<Job>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.people.is_empty() && self.jobs.is_empty()
    }

    pub fn total(&self) -> usize {
        self.categories.len() + self.people.len() + self.jobs.len()
    }
}

impl From<GlobalSearchResponse> for SearchResults {
    fn from(response: GlobalSearchResponse) -> Self {
        SearchResults {
            categories: response.categories,
            people: response.people,
            jobs: response.jobs,
        }
    }
}

/// Result tab selected in the search dropdown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTab {
    #[default]
    All,
    People,
    Categories,
    Jobs,
}
