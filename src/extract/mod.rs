// file: src/extract/mod.rs
// description: plain-text extraction from uploaded note files
// reference: dispatches by file extension to format-specific extractors

pub mod markdown;
pub mod pdf;

pub use markdown::{MarkdownNote, extract_markdown};
pub use pdf::extract_pdf;

use crate::error::{AssistantError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Result of running extraction on one file: the display name, the plain
/// text, and the raw file size used for the human-readable size string.
#[derive(Debug, Clone)]
pub struct ExtractedNote {
    pub name: String,
    pub text: String,
    pub byte_size: u64,
}

/// Extracts plain text from a note file on disk.
///
/// PDF goes through `pdf-extract`, Markdown is rendered to plain text (a
/// frontmatter `title:` overrides the file name), and `.txt` is read as-is.
/// Anything else is rejected. Empty extraction output is an error, never an
/// empty document.
pub fn extract_file(path: &Path) -> Result<ExtractedNote> {
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let byte_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let (name, text) = match extension.as_str() {
        "pdf" => {
            let bytes = fs::read(path)?;
            (display_name, extract_pdf(path, &bytes)?)
        }
        "md" | "markdown" => {
            let raw = fs::read_to_string(path)?;
            let note = extract_markdown(&raw);
            let name = note.title.unwrap_or(display_name);
            (name, note.plain_text)
        }
        "txt" => (display_name, fs::read_to_string(path)?),
        other => return Err(AssistantError::UnsupportedFile(other.to_string())),
    };

    if text.trim().is_empty() {
        return Err(AssistantError::Extraction {
            path: path.to_path_buf(),
            message: "no text content found".to_string(),
        });
    }

    debug!("Extracted {} chars from {}", text.len(), path.display());

    Ok(ExtractedNote {
        name,
        text,
        byte_size,
    })
}

/// Extensions accepted by `extract_file`, used by the directory scanner.
pub fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
        Some("pdf") | Some("md") | Some("markdown") | Some("txt")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_txt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "PROTOCOL: check airway first").unwrap();

        let note = extract_file(&path).unwrap();
        assert_eq!(note.name, "notes.txt");
        assert_eq!(note.text, "PROTOCOL: check airway first");
        assert_eq!(note.byte_size, 28);
    }

    #[test]
    fn test_extract_markdown_title_overrides_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sepsis.md");
        fs::write(
            &path,
            "---\ntitle: \"UP 15: Suspected Sepsis\"\n---\n\nSIRS criteria.",
        )
        .unwrap();

        let note = extract_file(&path).unwrap();
        assert_eq!(note.name, "UP 15: Suspected Sepsis");
        assert!(note.text.contains("SIRS criteria"));
    }

    #[test]
    fn test_extract_unsupported_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("slides.pptx");
        fs::write(&path, "binary").unwrap();

        let err = extract_file(&path).unwrap_err();
        assert!(matches!(err, AssistantError::UnsupportedFile(ref ext) if ext == "pptx"));
    }

    #[test]
    fn test_extract_empty_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.txt");
        fs::write(&path, "   \n").unwrap();

        let err = extract_file(&path).unwrap_err();
        assert!(matches!(err, AssistantError::Extraction { .. }));
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a.pdf")));
        assert!(is_supported(Path::new("a.MD")));
        assert!(is_supported(Path::new("a.txt")));
        assert!(!is_supported(Path::new("a.docx")));
        assert!(!is_supported(Path::new("noext")));
    }
}
