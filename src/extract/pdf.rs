// file: src/extract/pdf.rs
// description: PDF text extraction
// reference: https://docs.rs/pdf-extract

use crate::error::{AssistantError, Result};
use std::path::Path;

/// Extracts the text layer of a PDF already read into memory.
///
/// Scanned PDFs with no text layer come back empty and are rejected by the
/// caller's empty-content check.
pub fn extract_pdf(path: &Path, bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| AssistantError::Extraction {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_pdf_is_an_extraction_error() {
        let err = extract_pdf(Path::new("notes.pdf"), b"not a pdf at all").unwrap_err();
        assert!(matches!(err, AssistantError::Extraction { .. }));
    }
}
