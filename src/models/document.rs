// file: src/models/document.rs
// description: core note document model with content hashing
// reference: internal data structures

use crate::utils::format_file_size;
use chrono::Local;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use uuid::Uuid;

/// One extracted note document in the session library.
///
/// Immutable once constructed; the library only ever appends. `source` keeps
/// the path of the raw file for later viewing, when the document came from
/// disk rather than the seed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteFile {
    pub id: String,
    pub name: String,
    pub size: String,
    pub content: String,
    pub content_hash: String,
    pub source: Option<PathBuf>,
    pub upload_date: String,
}

impl NoteFile {
    /// Builds a document from freshly extracted text, stamped with today's
    /// date and a new opaque id.
    pub fn from_extracted(
        name: impl Into<String>,
        content: impl Into<String>,
        byte_size: u64,
        source: Option<PathBuf>,
    ) -> Self {
        let content = content.into();
        let content_hash = Self::compute_hash(&content);

        Self {
            id: generate_id(),
            name: name.into(),
            size: format_file_size(byte_size),
            content,
            content_hash,
            source,
            upload_date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Builds a seed document with a fixed id, display size, and date.
    pub fn seeded(id: &str, name: &str, size: &str, upload_date: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            size: size.to_string(),
            content: content.to_string(),
            content_hash: Self::compute_hash(content),
            source: None,
            upload_date: upload_date.to_string(),
        }
    }

    pub fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Short protocol code used by the citation heuristic: the part of the
    /// name before the first colon, lowercased and trimmed ("UP 15: Suspected
    /// Sepsis" -> "up 15").
    pub fn slug(&self) -> String {
        self.name
            .split(':')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    }
}

fn generate_id() -> String {
    // Nine characters of a v4 uuid, mirroring the short opaque tokens the
    // seed set uses.
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = NoteFile::from_extracted("Notes.pdf", "PROTOCOL: check airway", 2048, None);

        assert_eq!(doc.name, "Notes.pdf");
        assert_eq!(doc.size, "2 KB");
        assert_eq!(doc.content, "PROTOCOL: check airway");
        assert!(!doc.content_hash.is_empty());
        assert_eq!(doc.id.len(), 9);
    }

    #[test]
    fn test_hash_consistency() {
        let hash1 = NoteFile::compute_hash("Test content");
        let hash2 = NoteFile::compute_hash("Test content");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_unique_ids() {
        let a = NoteFile::from_extracted("a", "same", 1, None);
        let b = NoteFile::from_extracted("b", "same", 1, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_slug_from_protocol_name() {
        let doc = NoteFile::seeded("up15", "UP 15: Suspected Sepsis", "142 KB", "2025-05-20", "x");
        assert_eq!(doc.slug(), "up 15");
    }

    #[test]
    fn test_slug_without_colon() {
        let doc = NoteFile::from_extracted("Lecture Notes", "x", 1, None);
        assert_eq!(doc.slug(), "lecture notes");
    }
}
