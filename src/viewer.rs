// file: src/viewer.rs
// description: terminal rendering of a note document and citation lists

use crate::models::NoteFile;
use crate::utils::truncate_text;
use colored::Colorize;

/// Full-text view of one document plus its metadata. Read-only; the
/// document itself is never touched.
pub fn render_document(doc: &NoteFile) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", doc.name.bold()));
    out.push_str(&format!(
        "{}\n",
        format!("{} | uploaded {} | id {}", doc.size, doc.upload_date, doc.id).dimmed()
    ));
    if let Some(source) = &doc.source {
        out.push_str(&format!("{}\n", format!("source: {}", source.display()).dimmed()));
    }
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&doc.content);
    out.push('\n');

    out
}

/// One-line library listing entry.
pub fn render_listing(doc: &NoteFile, active: bool) -> String {
    let marker = if active { "*" } else { " " };
    format!(
        "{} {:<10} {:<40} {:>8}  {}",
        marker,
        doc.id,
        truncate_text(&doc.name, 40),
        doc.size,
        doc.upload_date
    )
}

/// The source-citation row printed under a finished answer.
pub fn render_source_list(documents: &[&NoteFile]) -> String {
    let names = documents
        .iter()
        .map(|doc| format!("[{}] {}", doc.id, doc.name))
        .collect::<Vec<_>>()
        .join("  ");

    format!("{} {}", "Sources:".dimmed(), names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> NoteFile {
        NoteFile::seeded(
            "up15",
            "UP 15: Suspected Sepsis",
            "142 KB",
            "2025-05-20",
            "ADULT SIRS CRITERIA: Temp >= 100.4F",
        )
    }

    #[test]
    fn test_render_document_includes_metadata_and_content() {
        colored::control::set_override(false);
        let rendered = render_document(&doc());

        assert!(rendered.contains("UP 15: Suspected Sepsis"));
        assert!(rendered.contains("142 KB"));
        assert!(rendered.contains("2025-05-20"));
        assert!(rendered.contains("ADULT SIRS CRITERIA"));
    }

    #[test]
    fn test_render_listing_marks_active() {
        colored::control::set_override(false);
        let d = doc();
        assert!(render_listing(&d, true).starts_with('*'));
        assert!(render_listing(&d, false).starts_with(' '));
    }

    #[test]
    fn test_render_source_list() {
        colored::control::set_override(false);
        let d = doc();
        let rendered = render_source_list(&[&d]);
        assert!(rendered.contains("[up15] UP 15: Suspected Sepsis"));
    }
}
