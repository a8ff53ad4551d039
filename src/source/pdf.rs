use super::SourceError;

/// Text of every page, in order, as produced by `pdf-extract`.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, SourceError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| SourceError::Pdf(e.to_string()))
}
