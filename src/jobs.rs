//! Jobs board listings and sidebar filters
//!
//! Listings are loaded from a JSON array. The sidebar narrows them by
//! category, country, city, domain slug and free text; every filter left
//! empty matches everything.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

/// Category that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered in the jobs sidebar
pub const JOB_CATEGORIES: &[&str] = &[
    "Logo Design",
    "Branding Services",
    "Social Media Design",
    "Website Design",
    "Illustrations",
    "Packaging Design",
    "Landing Page Design",
    "UI/UX Design",
    "Architecture & Interior Design",
    "Print Design",
    "Motion Graphics",
    "Product Design",
    "Mobile App Design",
    "Email Template Design",
    "Business Cards",
    "Brochure Design",
    "Infographic Design",
    "Character Design",
    "Icon Design",
    "Typography Design",
];

/// Countries offered in the location picker
pub const COUNTRIES: &[&str] = &[
    "India",
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Japan",
];

/// Quick-pick cities shown when India is selected
pub const INDIA_CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Ahmedabad",
];

/// Known domain slugs with hand-written titles
const DOMAIN_TITLES: &[(&str, &str)] = &[
    ("social-media", "Social Media"),
    ("ui-ux-design", "UI/UX Design"),
    ("graphic-design", "Graphic Design"),
    ("product-design", "Product Design"),
    ("video-editing", "Video Editing"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub experience: String,
    /// One-line summary shown on the card
    #[serde(default, alias = "desc")]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub onsite_required: bool,
}

impl JobListing {
    pub fn domain_title(&self) -> String {
        domain_title(&self.domain)
    }

    /// Route of this listing's detail page
    pub fn destination(&self) -> String {
        format!("/job/view/{}", self.id)
    }
}

fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Readable title for a domain slug, e.g. "ui-ux-design" -> "UI/UX Design"
pub fn domain_title(slug: &str) -> String {
    if let Some((_, title)) = DOMAIN_TITLES.iter().find(|(s, _)| *s == slug) {
        return (*title).to_string();
    }
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Sidebar filter state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilter {
    pub category: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub domain: Option<String>,
    pub query: Option<String>,
}

fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl JobFilter {
    pub fn matches(&self, job: &JobListing) -> bool {
        if let Some(category) = active(&self.category) {
            if category != ALL_CATEGORIES.to_lowercase() {
                let title = job.title.to_lowercase();
                let domain = job.domain_title().to_lowercase();
                if !title.contains(&category) && !domain.contains(&category) {
                    return false;
                }
            }
        }

        let location = job.location.to_lowercase();
        if let Some(country) = active(&self.country) {
            if !location.contains(&country) {
                return false;
            }
        }
        if let Some(city) = active(&self.city) {
            if !location.contains(&city) {
                return false;
            }
        }

        if let Some(domain) = active(&self.domain) {
            if job.domain.to_lowercase() != domain {
                return false;
            }
        }

        if let Some(query) = active(&self.query) {
            let haystacks = [&job.title, &job.company, &job.summary, &job.description];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&query)) {
                return false;
            }
        }

        true
    }
}

pub fn filter_jobs<'a>(jobs: &'a [JobListing], filter: &JobFilter) -> Vec<&'a JobListing> {
    let matched: Vec<&JobListing> = jobs.iter().filter(|j| filter.matches(j)).collect();
    debug!(total = jobs.len(), matched = matched.len(), "Filtered job listings");
    matched
}

/// Load listings from a JSON array file
#[instrument]
pub fn load_listings(path: &Path) -> Result<Vec<JobListing>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job listings: {}", path.display()))?;
    let listings: Vec<JobListing> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse job listings: {}", path.display()))?;
    info!(count = listings.len(), "Loaded job listings");
    Ok(listings)
}
