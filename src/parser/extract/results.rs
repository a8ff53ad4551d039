use std::sync::LazyLock;

use regex::Regex;

use super::ResultMetric;
use crate::parser::sections::{find_section, Heading};

const MAX_RESULTS: usize = 3;
const MAX_LINES: usize = 4;
const MIN_LINE_CHARS: usize = 10;
const VALUE_CHARS: usize = 50;
const PLACEHOLDER_DESCRIPTION: &str = "Significant improvement achieved";

static METRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+%|\d+x|\$\d+(?:,\d{3})*|\d+ (?:million|thousand|hours|days|months|weeks)")
        .unwrap()
});
static LINE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n•-]").unwrap());

/// Parse the Key Stats section.
///
/// Metric tokens win: token `i` is paired with candidate line `i`. Without any
/// token the candidate lines themselves become results.
pub fn extract(text: &str) -> Vec<ResultMetric> {
    let Some(body) = find_section(text, Heading::KeyStats) else {
        return Vec::new();
    };

    let metrics: Vec<&str> = METRIC_RE.find_iter(body).map(|m| m.as_str()).collect();
    let lines: Vec<&str> = LINE_SPLIT_RE
        .split(body)
        .map(str::trim)
        .filter(|l| l.chars().count() > MIN_LINE_CHARS)
        .take(MAX_LINES)
        .collect();

    if !metrics.is_empty() {
        return metrics
            .iter()
            .take(MAX_RESULTS)
            .enumerate()
            .map(|(i, metric)| match lines.get(i) {
                Some(line) => ResultMetric {
                    metric: metric.to_string(),
                    value: line.to_string(),
                    description: line.to_string(),
                },
                None => ResultMetric {
                    metric: metric.to_string(),
                    value: format!("Key Result {}", i + 1),
                    description: PLACEHOLDER_DESCRIPTION.to_string(),
                },
            })
            .collect();
    }

    lines
        .iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(i, line)| ResultMetric {
            metric: format!("Result {}", i + 1),
            value: line.chars().take(VALUE_CHARS).collect(),
            description: line.to_string(),
        })
        .collect()
}
