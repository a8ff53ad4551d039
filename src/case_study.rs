use serde::{Deserialize, Serialize};

use crate::parser::{ParsedContent, ProcessStep, ResultMetric};

/// A persisted case study: identity and listing fields owned by the admin,
/// content fields filled from uploaded documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: String,
    pub company: String,
    pub title: String,
    pub tags: Vec<String>,
    pub display_order: i64,
    pub client_snapshot: String,
    pub background: String,
    pub challenge: Vec<String>,
    pub process: Vec<ProcessStep>,
    pub results: Vec<ResultMetric>,
    pub company_size: Option<String>,
    pub timeline: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CaseStudy {
    pub fn new(company: &str, title: &str) -> Self {
        let company = company.trim();
        let title = title.trim();
        CaseStudy {
            id: slugify(&format!("{} {}", company, title)),
            company: company.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Fold freshly parsed content in. Empty extraction results never
    /// overwrite content that is already there.
    pub fn merge(&mut self, parsed: ParsedContent) {
        if !parsed.client_snapshot.is_empty() {
            self.client_snapshot = parsed.client_snapshot;
        }
        if !parsed.background.is_empty() {
            self.background = parsed.background;
        }
        if !parsed.challenge.is_empty() {
            self.challenge = parsed.challenge;
        }
        if !parsed.process.is_empty() {
            self.process = parsed.process;
        }
        if !parsed.results.is_empty() {
            self.results = parsed.results;
        }
        if parsed.company_size.is_some() {
            self.company_size = parsed.company_size;
        }
        if parsed.timeline.is_some() {
            self.timeline = parsed.timeline;
        }
    }

    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() && !self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                self.tags.push(tag.to_string());
            }
        }
    }
}

/// URL-safe id: lower-case ASCII alphanumerics joined by single dashes.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "case-study".to_string()
    } else {
        slug.to_string()
    }
}
