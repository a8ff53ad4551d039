pub mod challenge;
pub mod process;
pub mod profile;
pub mod results;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sections::{find_section, Heading};

/// Fragments at or below this many characters are separator debris.
pub const MIN_ITEM_CHARS: usize = 15;

/// Structured case-study content pulled out of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub client_snapshot: String,
    pub background: String,
    pub challenge: Vec<String>,
    pub process: Vec<ProcessStep>,
    pub results: Vec<ResultMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub phase: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetric {
    pub metric: String,
    pub value: String,
    pub description: String,
}

impl ParsedContent {
    /// True when no section or auxiliary field was found.
    pub fn is_empty(&self) -> bool {
        *self == ParsedContent::default()
    }
}

/// Run every section extractor over already-normalized text.
pub fn extract_all(text: &str) -> ParsedContent {
    let content = ParsedContent {
        client_snapshot: raw_section(text, Heading::ClientSnapshot),
        background: raw_section(text, Heading::Overview),
        challenge: challenge::extract(text),
        process: process::extract(text),
        results: results::extract(text),
        company_size: profile::company_size(text),
        timeline: profile::timeline(text),
    };

    debug!(
        challenge = content.challenge.len(),
        process = content.process.len(),
        results = content.results.len(),
        company_size = ?content.company_size,
        timeline = ?content.timeline,
        "extracted case-study content"
    );
    content
}

fn raw_section(text: &str, heading: Heading) -> String {
    match find_section(text, heading) {
        Some(body) => body.to_string(),
        None => {
            debug!(heading = heading.label(), "section not found");
            String::new()
        }
    }
}

/// Split `body` on `separators`, keeping trimmed fragments longer than
/// [`MIN_ITEM_CHARS`], at most `cap` of them, in order.
pub(crate) fn split_items<'a>(body: &'a str, separators: &Regex, cap: usize) -> Vec<&'a str> {
    separators
        .split(body)
        .map(str::trim)
        .filter(|f| f.chars().count() > MIN_ITEM_CHARS)
        .take(cap)
        .collect()
}

// ── Tests ──
