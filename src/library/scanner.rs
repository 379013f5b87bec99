// file: src/library/scanner.rs
// description: notes directory walking with filtering and content dedup
// reference: https://docs.rs/walkdir

use crate::config::LibraryConfig;
use crate::error::Result;
use crate::extract;
use crate::models::NoteFile;
use crate::session::SessionState;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct NoteScanner {
    config: LibraryConfig,
}

impl NoteScanner {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    /// Walks the configured notes directory and loads every supported file
    /// into the session library. Files whose extracted content is already
    /// present (by hash) are skipped, as are files matching a skip pattern or
    /// exceeding the size cap. Individual extraction failures are logged and
    /// skipped; they never abort the scan. Returns the number of documents
    /// loaded.
    pub fn scan_into(&self, state: &mut SessionState, root: &Path) -> Result<usize> {
        info!("Scanning notes directory: {}", root.display());
        let mut loaded = 0;

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if !extract::is_supported(path) || self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
                if metadata.len() > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        metadata.len() / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }
            }

            let extracted = match extract::extract_file(path) {
                Ok(extracted) => extracted,
                Err(e) => {
                    warn!("Failed to extract {}: {}", path.display(), e);
                    continue;
                }
            };

            let hash = NoteFile::compute_hash(&extracted.text);
            if state.contains_hash(&hash) {
                debug!("Skipping already loaded note: {}", path.display());
                continue;
            }

            state.load_document(NoteFile::from_extracted(
                extracted.name,
                extracted.text,
                extracted.byte_size,
                Some(path.to_path_buf()),
            ));
            loaded += 1;
        }

        info!("Loaded {} notes from {}", loaded, root.display());
        Ok(loaded)
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if path_str.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if path_str.contains(pattern) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_config() -> LibraryConfig {
        LibraryConfig {
            seed_protocols: false,
            notes_dir: None,
            skip_patterns: vec!["draft".to_string()],
            max_file_size_mb: 10,
        }
    }

    #[test]
    fn test_scan_loads_supported_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("airway.txt"), "PROTOCOL: airway first").unwrap();
        fs::write(temp.path().join("ignored.docx"), "binary").unwrap();

        let mut state = SessionState::new();
        let scanner = NoteScanner::new(test_config());
        let loaded = scanner.scan_into(&mut state, temp.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(state.documents().len(), 1);
        assert_eq!(state.documents()[0].name, "airway.txt");
        // Bulk loading never changes the active selection.
        assert_eq!(state.active_doc_id(), None);
    }

    #[test]
    fn test_scan_dedups_by_content_hash() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "identical protocol text").unwrap();
        fs::write(temp.path().join("b.txt"), "identical protocol text").unwrap();

        let mut state = SessionState::new();
        let scanner = NoteScanner::new(test_config());
        let loaded = scanner.scan_into(&mut state, temp.path()).unwrap();

        assert_eq!(loaded, 1);
    }

    #[test]
    fn test_scan_skips_patterns() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("draft-notes.txt"), "unfinished").unwrap();
        fs::write(temp.path().join("final.txt"), "finished").unwrap();

        let mut state = SessionState::new();
        let scanner = NoteScanner::new(test_config());
        scanner.scan_into(&mut state, temp.path()).unwrap();

        assert_eq!(state.documents().len(), 1);
        assert_eq!(state.documents()[0].content, "finished");
    }

    #[test]
    fn test_scan_survives_bad_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.pdf"), "not really a pdf").unwrap();
        fs::write(temp.path().join("good.txt"), "usable").unwrap();

        let mut state = SessionState::new();
        let scanner = NoteScanner::new(test_config());
        let loaded = scanner.scan_into(&mut state, temp.path()).unwrap();

        assert_eq!(loaded, 1);
    }
}
