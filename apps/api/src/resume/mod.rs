//! Resume text — PDF extraction and whitespace normalization.
//!
//! The matching pipeline assumes normalized text; everything that enters it from an
//! upload goes through `extract_text_from_pdf` or `normalize_text` first.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Characters of resume text forwarded to the prompt as the candidate biography.
pub const RESUME_BIO_CHARS: usize = 1200;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank line pattern is a valid regex"));
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("space pattern is a valid regex"));

#[derive(Debug, Error)]
pub enum ResumeTextError {
    #[error("Failed to read resume PDF: {0}")]
    Pdf(String),

    #[error("Resume PDF contains no extractable text")]
    NoText,
}

/// Extracts and normalizes the text of a PDF resume.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, ResumeTextError> {
    let raw =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ResumeTextError::Pdf(e.to_string()))?;
    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(ResumeTextError::NoText);
    }
    debug!(
        "Extracted {} chars of resume text from {} byte PDF",
        text.chars().count(),
        bytes.len()
    );
    Ok(text)
}

/// Unifies line endings, collapses runs of blank lines to one and runs of spaces or
/// tabs to a single space, then trims.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = BLANK_LINES.replace_all(&unified, "\n\n");
    let collapsed = HORIZONTAL_SPACE.replace_all(&collapsed, " ");
    collapsed.trim().to_string()
}

/// Short biography for the prompt: the normalized opening of the resume.
pub fn resume_bio(resume_text: &str) -> String {
    let head: String = resume_text.chars().take(RESUME_BIO_CHARS).collect();
    normalize_text(&head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unifies_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_collapses_blank_lines_and_spaces() {
        let raw = "  Jane Doe\n\n\n\nSenior   Engineer\t\tRemote \n";
        assert_eq!(normalize_text(raw), "Jane Doe\n\nSenior Engineer Remote");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t "), "");
    }

    #[test]
    fn test_resume_bio_truncates_by_chars() {
        let resume = "é".repeat(RESUME_BIO_CHARS + 50);
        assert_eq!(resume_bio(&resume).chars().count(), RESUME_BIO_CHARS);
        assert_eq!(resume_bio("  Short resume  "), "Short resume");
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = extract_text_from_pdf(b"definitely not a pdf");
        assert!(matches!(result, Err(ResumeTextError::Pdf(_))));
    }
}
