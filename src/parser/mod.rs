pub mod extract;
pub mod sections;

pub use extract::{ParsedContent, ProcessStep, ResultMetric};

/// Two-pass pipeline: raw text → normalized text → structured content.
///
/// Total over every input: missing sections come back as empty fields, never
/// as an error.
pub fn extract(raw: &str) -> ParsedContent {
    let text = normalize_newlines(raw);
    extract::extract_all(&text)
}

/// Fold `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_variants() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn crlf_document_matches_lf_document() {
        let lf = "Client Snapshot:\nAlpha\nOverview:\nBeta\nChallenge:\n- Onboarding took three full weeks\n- Support queue was never triaged";
        let crlf = lf.replace('\n', "\r\n");
        let cr = lf.replace('\n', "\r");
        assert_eq!(extract(&crlf), extract(lf));
        assert_eq!(extract(&cr), extract(lf));
        assert_eq!(extract(lf).client_snapshot, "Alpha");
        assert_eq!(extract(lf).background, "Beta");
        assert_eq!(extract(lf).challenge.len(), 2);
    }
}
