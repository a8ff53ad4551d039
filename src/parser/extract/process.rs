use std::sync::LazyLock;

use regex::Regex;

use super::{split_items, ProcessStep};
use crate::parser::sections::{find_section, Heading};

const MAX_PHASES: usize = 6;

static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|•|-|\*|\d+\.|Step \d+|Phase \d+").unwrap());

/// Phase labels are positional; numbering found in the source is discarded.
pub fn extract(text: &str) -> Vec<ProcessStep> {
    let Some(body) = find_section(text, Heading::Process) else {
        return Vec::new();
    };
    split_items(body, &SPLIT_RE, MAX_PHASES)
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| ProcessStep {
            phase: format!("Phase {}", i + 1),
            description: fragment.to_string(),
        })
        .collect()
}
