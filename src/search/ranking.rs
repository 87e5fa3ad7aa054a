//! Heuristic relevance ranking for search candidates
//!
//! Each candidate's searchable fields are space-joined and lower-cased, then
//! scored against the lower-cased query:
//!
//! - +100 when the text equals the query
//! - +50 when the text starts with the query
//! - +20 when the text contains the query
//! - `max(0, 10 - len / 30)` favoring shorter, more specific text
//!
//! The checks are independent and accumulate, so an exact match scores 170
//! and a prefix match 70. Sorting is stable: equal scores keep input order.

use std::cmp::Ordering;

use super::types::{Category, Job, Person, ScoredCandidate, SearchResults};

/// Field keys used for each candidate list
pub const CATEGORY_KEYS: &[&str] = &["name"];
pub const PERSON_KEYS: &[&str] = &["userName", "name"];
pub const JOB_KEYS: &[&str] = &["title", "companyName"];

const EXACT_BONUS: f64 = 100.0;
const PREFIX_BONUS: f64 = 50.0;
const SUBSTRING_BONUS: f64 = 20.0;
const LENGTH_BONUS_MAX: f64 = 10.0;
const LENGTH_BONUS_DIVISOR: f64 = 30.0;

/// Named text fields a candidate exposes to the ranker
pub trait Searchable {
    /// Value of the named field, or None if the candidate has no such field
    fn field(&self, key: &str) -> Option<&str>;
}

impl Searchable for Category {
    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" | "_id" => Some(&self.id),
            "name" => Some(&self.name),
            _ => None,
        }
    }
}

impl Searchable for Person {
    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "userName" => Some(&self.user_name),
            "name" => Some(&self.name),
            _ => None,
        }
    }
}

impl Searchable for Job {
    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" | "_id" => Some(&self.id),
            "title" => Some(&self.title),
            "companyName" => Some(&self.company_name),
            _ => None,
        }
    }
}

/// Build the lower-cased comparison text for a candidate
pub fn comparison_text<T: Searchable + ?Sized>(item: &T, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| item.field(k).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Score lower-cased `text` against lower-cased, non-empty `query`
pub fn text_score(text: &str, query: &str) -> f64 {
    let mut score = 0.0;
    if text == query {
        score += EXACT_BONUS;
    }
    if text.starts_with(query) {
        score += PREFIX_BONUS;
    }
    if text.contains(query) {
        score += SUBSTRING_BONUS;
    }
    let len = text.chars().count() as f64;
    score + (LENGTH_BONUS_MAX - len / LENGTH_BONUS_DIVISOR).max(0.0)
}

/// Score every candidate, ordered by descending score (stable)
///
/// Returns an empty-query pass-through with zero scores in input order.
pub fn score_candidates<'a, T: Searchable>(
    query: &str,
    items: &'a [T],
    keys: &[&str],
) -> Vec<ScoredCandidate<&'a T>> {
    let query = query.trim();
    if query.is_empty() {
        return items
            .iter()
            .map(|item| ScoredCandidate { item, score: 0.0 })
            .collect();
    }

    let query_lower = query.to_lowercase();
    let mut scored: Vec<ScoredCandidate<&T>> = items
        .iter()
        .map(|item| ScoredCandidate {
            item,
            score: text_score(&comparison_text(item, keys), &query_lower),
        })
        .collect();

    // sort_by is stable, ties keep their input order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// Rank candidates by relevance to `query` without mutating the input.
///
/// An empty or whitespace-only query returns the items unchanged.
pub fn rank<T: Searchable + Clone>(query: &str, items: &[T], keys: &[&str]) -> Vec<T> {
    score_candidates(query, items, keys)
        .into_iter()
        .map(|scored| scored.item.clone())
        .collect()
}

/// The three candidate lists, each ranked for the current query
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedResults {
    pub categories: Vec<Category>,
    pub people: Vec<Person>,
    pub jobs: Vec<Job>,
}

impl RankedResults {
    /// Rank every list in `results` using its own field keys
    pub fn rank_all(query: &str, results: &SearchResults) -> Self {
        RankedResults {
            categories: rank(query, &results.categories, CATEGORY_KEYS),
            people: rank(query, &results.people, PERSON_KEYS),
            jobs: rank(query, &results.jobs, JOB_KEYS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn person(user_name: &str, name: &str) -> Person {
        Person {
            user_name: user_name.to_string(),
            name: name.to_string(),
            avatar_url: String::new(),
        }
    }

    fn names(list: &[Category]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let items = vec![category("1", "Zeta"), category("2", "Alpha"), category("3", "Mid")];
        assert_eq!(rank("", &items, CATEGORY_KEYS), items);
        assert_eq!(rank("   ", &items, CATEGORY_KEYS), items);
    }

    #[test]
    fn test_rank_is_permutation() {
        let items = vec![
            category("1", "Logo Design"),
            category("2", "Branding"),
            category("3", "Design Systems"),
            category("4", "Print"),
        ];
        let ranked = rank("design", &items, CATEGORY_KEYS);
        assert_eq!(ranked.len(), items.len());
        for item in &items {
            assert!(ranked.contains(item));
        }
    }

    #[test]
    fn test_exact_beats_prefix_beats_substring() {
        // Equal-length texts so the length bonus can't decide the order
        let exact = text_score("abcd", "abcd");
        let prefix = text_score("abcx", "abc");
        let substring = text_score("xabc", "abc");
        assert!(exact > prefix);
        assert!(prefix > substring);
    }

    #[test]
    fn test_bonuses_accumulate() {
        // exact (100) + prefix (50) + substring (20) + 10 - 3/30
        let score = text_score("abc", "abc");
        assert!((score - (170.0 + 10.0 - 0.1)).abs() < 1e-9);

        // prefix + substring only
        let score = text_score("abcdef", "abc");
        assert!((score - (70.0 + 10.0 - 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_length_bonus_never_negative() {
        let long = "x".repeat(600);
        assert_eq!(text_score(&long, "zzz"), 0.0);
    }

    #[test]
    fn test_ranking_is_case_insensitive() {
        let items = vec![category("1", "Web Design"), category("2", "LOGO")];
        let ranked = rank("logo", &items, CATEGORY_KEYS);
        assert_eq!(names(&ranked), vec!["LOGO", "Web Design"]);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let items = vec![
            category("1", "aaaa"),
            category("2", "bbbb"),
            category("3", "cccc"),
        ];
        // Nothing matches and all lengths are equal
        let ranked = rank("zz", &items, CATEGORY_KEYS);
        assert_eq!(names(&ranked), vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn test_people_use_username_and_name() {
        let items = vec![person("jdoe", "Jane Doe"), person("alice", "Alice Smith")];
        let ranked = rank("alice", &items, PERSON_KEYS);
        assert_eq!(ranked[0].user_name, "alice");

        // Comparison text is "alice alice smith", a prefix match
        assert_eq!(comparison_text(&items[1], PERSON_KEYS), "alice alice smith");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let c = category("1", "Logo");
        assert_eq!(comparison_text(&c, &["name", "nonexistent"]), "logo ");
    }

    #[test]
    fn test_jobs_use_title_and_company() {
        let jobs = vec![
            Job {
                id: "1".into(),
                title: "Graphic Designer".into(),
                company_name: "Kanakavalli".into(),
            },
            Job {
                id: "2".into(),
                title: "Social Media Manager".into(),
                company_name: "Oneiros".into(),
            },
        ];
        let ranked = rank("social", &jobs, JOB_KEYS);
        assert_eq!(ranked[0].id, "2");
    }

    #[test]
    fn test_score_candidates_reports_scores() {
        let items = vec![category("1", "xlogo"), category("2", "logo")];
        let scored = score_candidates("LOGO", &items, CATEGORY_KEYS);
        assert_eq!(scored[0].item.id, "2");
        assert!(scored[0].score > scored[1].score);
        assert!(scored.iter().all(|s| s.score >= 0.0));
    }

    #[test]
    fn test_rank_all_ranks_each_list() {
        let results = SearchResults {
            categories: vec![category("1", "Branding"), category("2", "Logo")],
            people: vec![person("bob", "Bob"), person("logoman", "Logo Man")],
            jobs: vec![],
        };
        let ranked = RankedResults::rank_all("logo", &results);
        assert_eq!(ranked.categories[0].name, "Logo");
        assert_eq!(ranked.people[0].user_name, "logoman");
        assert!(ranked.jobs.is_empty());
    }
}
