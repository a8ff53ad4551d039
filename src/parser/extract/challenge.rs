use std::sync::LazyLock;

use regex::Regex;

use super::split_items;
use crate::parser::sections::{find_section, Heading};

const MAX_CHALLENGES: usize = 6;

static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|•|-|\*|\d+\.|Challenge \d+").unwrap());

pub fn extract(text: &str) -> Vec<String> {
    let Some(body) = find_section(text, Heading::Challenge) else {
        return Vec::new();
    };
    split_items(body, &SPLIT_RE, MAX_CHALLENGES)
        .into_iter()
        .map(str::to_string)
        .collect()
}
