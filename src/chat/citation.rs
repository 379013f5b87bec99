// file: src/chat/citation.rs
// description: heuristic matching of assistant answers back to source notes
// reference: https://docs.rs/regex

use crate::models::NoteFile;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Trailing citation line the grounding instruction asks the model for,
    // e.g. "Referenced: UP 15" or "Referenced: UP 15, PC 2."
    static ref REFERENCED_TRAILER: Regex = Regex::new(
        r"(?im)^\s*Referenced:\s*(.+?)\.?\s*$"
    ).expect("REFERENCED_TRAILER regex is valid");
}

/// Heuristic citation scan: a document matches when the part of its name
/// before the first colon (lowercased, trimmed) appears as a substring of
/// the lowercased answer text. Returns matches in library order.
///
/// This can over-match (the slug appearing coincidentally) and under-match
/// (the model citing by a different phrasing); it mirrors the product's
/// source-button behaviour, nothing more.
pub fn matching_documents<'a>(text: &str, documents: &'a [NoteFile]) -> Vec<&'a NoteFile> {
    let haystack = text.to_lowercase();

    documents
        .iter()
        .filter(|doc| {
            let slug = doc.slug();
            !slug.is_empty() && haystack.contains(&slug)
        })
        .collect()
}

/// Pulls the model's explicit "Referenced: ..." trailer out of an answer for
/// display emphasis, when it followed the citation rule.
pub fn referenced_trailer(text: &str) -> Option<String> {
    REFERENCED_TRAILER
        .captures_iter(text)
        .last()
        .map(|caps| caps[1].trim().to_string())
}
