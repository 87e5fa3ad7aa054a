//! Mapping from a chosen search result to the text recorded in history and
//! the destination path the router should open.

use super::types::{Category, Job, Person};

/// Something the user picked from the search dropdown
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Person(Person),
    Category(Category),
    Job(Job),
    /// A trending hashtag, without the leading '#'
    Hashtag(String),
    /// Raw query text submitted without choosing a result
    Query(String),
}

impl Selection {
    /// Text recorded into search history for this selection
    pub fn display_text(&self) -> String {
        match self {
            Selection::Person(p) => {
                if p.user_name.is_empty() {
                    p.name.clone()
                } else {
                    p.user_name.clone()
                }
            }
            Selection::Category(c) => c.name.clone(),
            Selection::Job(j) => j.title.clone(),
            Selection::Hashtag(tag) => format!("#{}", tag),
            Selection::Query(text) => text.clone(),
        }
    }

    /// Router path for this selection
    pub fn destination(&self) -> String {
        match self {
            Selection::Person(p) => format!("/user/profile/{}", p.user_name),
            Selection::Category(c) => format!("/category/{}", c.id),
            Selection::Job(j) => format!("/job/view/{}", j.id),
            Selection::Hashtag(tag) => format!("/hashtag/{}", encode_uri_component(tag)),
            Selection::Query(text) => search_destination(text),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Person(_) => "person",
            Selection::Category(_) => "category",
            Selection::Job(_) => "job",
            Selection::Hashtag(_) => "hashtag",
            Selection::Query(_) => "query",
        }
    }
}

/// Generic search-results page for free text
pub fn search_destination(text: &str) -> String {
    format!("/search?q={}", encode_uri_component(text))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// matching how browsers encode a URI component.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_destination_and_text() {
        let sel = Selection::Person(Person {
            user_name: "jdoe".into(),
            name: "Jane Doe".into(),
            avatar_url: String::new(),
        });
        assert_eq!(sel.destination(), "/user/profile/jdoe");
        assert_eq!(sel.display_text(), "jdoe");
    }

    #[test]
    fn test_person_without_username_records_name() {
        let sel = Selection::Person(Person {
            user_name: String::new(),
            name: "Jane Doe".into(),
            avatar_url: String::new(),
        });
        assert_eq!(sel.display_text(), "Jane Doe");
    }

    #[test]
    fn test_category_and_job_destinations() {
        let cat = Selection::Category(Category {
            id: "c1".into(),
            name: "Logo Design".into(),
        });
        assert_eq!(cat.destination(), "/category/c1");
        assert_eq!(cat.display_text(), "Logo Design");

        let job = Selection::Job(Job {
            id: "j9".into(),
            title: "UX/UI Designer".into(),
            company_name: "Acme".into(),
        });
        assert_eq!(job.destination(), "/job/view/j9");
        assert_eq!(job.display_text(), "UX/UI Designer");
    }

    #[test]
    fn test_hashtag_destination_is_encoded() {
        let sel = Selection::Hashtag("c++ tips".into());
        assert_eq!(sel.destination(), "/hashtag/c%2B%2B%20tips");
        assert_eq!(sel.display_text(), "#c++ tips");
    }

    #[test]
    fn test_query_destination() {
        let sel = Selection::Query("ui/ux & more".into());
        assert_eq!(sel.destination(), "/search?q=ui%2Fux%20%26%20more");
    }

    #[test]
    fn test_encode_uri_component_utf8() {
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("a-b_c.d!~*'()"), "a-b_c.d!~*'()");
        assert_eq!(encode_uri_component("#tag"), "%23tag");
    }
}
