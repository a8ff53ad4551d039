use std::sync::LazyLock;

use regex::Regex;

static COMPANY_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s*(employees|staff|people|team members)").unwrap()
});
static TIMELINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(months?|weeks?|days?)\s*(project|timeline|duration)").unwrap()
});

/// First head-count mention anywhere in the text, always reported as "employees".
pub fn company_size(text: &str) -> Option<String> {
    let caps = COMPANY_SIZE_RE.captures(text)?;
    Some(format!("{} employees", &caps[1]))
}

/// First "<n> <unit> project|timeline|duration" mention, unit pluralized.
pub fn timeline(text: &str) -> Option<String> {
    let caps = TIMELINE_RE.captures(text)?;
    let unit = caps[2].to_lowercase();
    let unit = if unit.starts_with("week") {
        "weeks"
    } else if unit.starts_with("day") {
        "days"
    } else {
        "months"
    };
    Some(format!("{} {}", &caps[1], unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields() {
        let text = "The project had 250 employees and ran for 6 months timeline";
        assert_eq!(company_size(text).as_deref(), Some("250 employees"));
        assert_eq!(timeline(text).as_deref(), Some("6 months"));
    }

    #[test]
    fn size_synonyms_normalized() {
        assert_eq!(company_size("a crew of 35 staff").as_deref(), Some("35 employees"));
        assert_eq!(company_size("over 1,500 People").as_deref(), Some("1,500 employees"));
        assert_eq!(company_size("12 team members").as_deref(), Some("12 employees"));
        assert_eq!(company_size("no headcount given"), None);
    }

    #[test]
    fn timeline_units() {
        assert_eq!(timeline("a 1 week project").as_deref(), Some("1 weeks"));
        assert_eq!(timeline("90 Days Duration").as_deref(), Some("90 days"));
        assert_eq!(timeline("18 month timeline").as_deref(), Some("18 months"));
        assert_eq!(timeline("took 6 months overall"), None);
    }

    #[test]
    fn first_match_wins() {
        let text = "2 week project, later a 3 month project";
        assert_eq!(timeline(text).as_deref(), Some("2 weeks"));
    }
}
