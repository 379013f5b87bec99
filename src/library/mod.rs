// file: src/library/mod.rs
// description: document library population: seed set, uploads, directory scan
// reference: internal module structure

pub mod scanner;
pub mod seed;

pub use scanner::NoteScanner;
pub use seed::seed_protocols;

use crate::error::Result;
use crate::extract;
use crate::models::NoteFile;
use crate::session::SessionState;
use std::path::Path;
use tracing::info;

/// Upload pipeline: extract the file's text, wrap it into a document, append
/// it to the library, and make it the active selection.
///
/// On extraction failure nothing is added and the session is untouched.
pub fn import_file<'a>(state: &'a mut SessionState, path: &Path) -> Result<&'a NoteFile> {
    let extracted = extract::extract_file(path)?;

    let doc = NoteFile::from_extracted(
        extracted.name,
        extracted.text,
        extracted.byte_size,
        Some(path.to_path_buf()),
    );

    info!("Imported {} ({})", doc.name, doc.size);
    Ok(state.add_document(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_import_file_adds_and_activates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("airway.txt");
        fs::write(&path, "PROTOCOL: open the airway").unwrap();

        let mut state = SessionState::new();
        let id = import_file(&mut state, &path).unwrap().id.clone();

        assert_eq!(state.documents().len(), 1);
        assert_eq!(state.documents()[0].content, "PROTOCOL: open the airway");
        assert_eq!(state.active_doc_id(), Some(id.as_str()));
    }

    #[test]
    fn test_import_failure_leaves_state_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.pdf");
        fs::write(&path, "not a pdf").unwrap();

        let mut state = SessionState::new();
        assert!(import_file(&mut state, &path).is_err());
        assert!(state.documents().is_empty());
        assert_eq!(state.active_doc_id(), None);
    }
}
