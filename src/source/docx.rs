use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::SourceError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text of a DOCX body, one line per paragraph.
pub fn extract_docx(bytes: &[u8]) -> Result<String, SourceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml).map_err(|source| SourceError::Io {
                path: DOCUMENT_PART.to_string(),
                source,
            })?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(SourceError::MissingPart(DOCUMENT_PART));
        }
        Err(e) => return Err(e.into()),
    }

    document_text(&xml)
}

/// Walk WordprocessingML: `w:t` runs are text, `w:tab` a tab, `w:br`/`w:cr`
/// a line break, and every paragraph ends with a newline.
fn document_text(xml: &str) -> Result<String, SourceError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SourceError::Xml(e.to_string()))?;
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| SourceError::Xml(e.to_string()))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
