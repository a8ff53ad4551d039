use std::sync::LazyLock;

use regex::Regex;

static CLIENT_SNAPSHOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)client snapshot").unwrap());
static OVERVIEW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)overview").unwrap());
static CHALLENGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)challenges?").unwrap());
static PROCESS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)the process").unwrap());
static KEY_STATS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)key stats").unwrap());

/// Recognized section headings of a case-study document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    ClientSnapshot,
    Overview,
    Challenge,
    Process,
    KeyStats,
}

impl Heading {
    pub const ALL: [Heading; 5] = [
        Heading::ClientSnapshot,
        Heading::Overview,
        Heading::Challenge,
        Heading::Process,
        Heading::KeyStats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Heading::ClientSnapshot => "Client Snapshot",
            Heading::Overview => "Overview",
            Heading::Challenge => "Challenge",
            Heading::Process => "The Process",
            Heading::KeyStats => "Key Stats",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Heading::ClientSnapshot => &*CLIENT_SNAPSHOT_RE,
            Heading::Overview => &*OVERVIEW_RE,
            Heading::Challenge => &*CHALLENGE_RE,
            Heading::Process => &*PROCESS_RE,
            Heading::KeyStats => &*KEY_STATS_RE,
        }
    }
}

/// Body of the first `heading` section in `text`, trimmed.
///
/// The body starts after the heading token (and any `:`/whitespace run) and
/// stops at the earliest occurrence of any *other* heading, or end of text.
/// A heading may legitimately repeat inside its own body ("Challenge 2"), so
/// only the other labels terminate it.
pub fn find_section(text: &str, heading: Heading) -> Option<&str> {
    let start = heading.pattern().find(text)?.end();
    let rest = &text[start..];

    let end = Heading::ALL
        .iter()
        .filter(|h| **h != heading)
        .filter_map(|h| h.pattern().find(rest).map(|m| m.start()))
        .min()
        .unwrap_or(rest.len());

    Some(
        rest[..end]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_next_heading() {
        let text = "Client Snapshot:\nAlpha\nOverview:\nBeta";
        assert_eq!(find_section(text, Heading::ClientSnapshot), Some("Alpha"));
        assert_eq!(find_section(text, Heading::Overview), Some("Beta"));
    }

    #[test]
    fn case_insensitive_and_newline_terminated() {
        let text = "CLIENT SNAPSHOT\nAlpha corp\nkey stats\n40% growth";
        assert_eq!(find_section(text, Heading::ClientSnapshot), Some("Alpha corp"));
        assert_eq!(find_section(text, Heading::KeyStats), Some("40% growth"));
    }

    #[test]
    fn missing_heading() {
        assert_eq!(find_section("nothing to see here", Heading::Process), None);
        assert_eq!(find_section("", Heading::Overview), None);
    }

    #[test]
    fn own_label_does_not_terminate() {
        let text = "Challenge:\nChallenge 1 legacy billing stack\nChallenge 2 manual reconciliation\nKey Stats: 2x";
        let body = find_section(text, Heading::Challenge).unwrap();
        assert!(body.contains("Challenge 2 manual reconciliation"));
        assert!(!body.contains("2x"));
    }

    #[test]
    fn order_of_headings_irrelevant() {
        let text = "Key Stats: 10% lift\nOverview: Started late";
        assert_eq!(find_section(text, Heading::KeyStats), Some("10% lift"));
        assert_eq!(find_section(text, Heading::Overview), Some("Started late"));
    }

    #[test]
    fn empty_body() {
        let text = "Overview:\nThe Process:\nStep 1 something long enough";
        assert_eq!(find_section(text, Heading::Overview), Some(""));
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = Heading::ALL.iter().map(|h| h.label()).collect();
        assert_eq!(
            labels,
            ["Client Snapshot", "Overview", "Challenge", "The Process", "Key Stats"]
        );
    }
}
