// file: src/session.rs
// description: in-memory session state container with named update operations
// reference: internal data structures

use crate::models::{ChatMessage, NoteFile};

/// All state for one assistant session: the document library, the
/// conversation log, the active document selection, and the in-flight flag.
///
/// Built fresh on every run; nothing is persisted. Every mutation goes
/// through a named operation so subordinate components never reach into the
/// fields directly.
#[derive(Debug, Default)]
pub struct SessionState {
    documents: Vec<NoteFile>,
    active_doc_id: Option<String>,
    messages: Vec<ChatMessage>,
    is_processing: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<NoteFile>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn documents(&self) -> &[NoteFile] {
        &self.documents
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn active_doc_id(&self) -> Option<&str> {
        self.active_doc_id.as_deref()
    }

    /// Appends a document without changing the active selection (seed set,
    /// directory scan).
    pub fn load_document(&mut self, doc: NoteFile) -> &NoteFile {
        self.documents.push(doc);
        self.documents.last().expect("document was just pushed")
    }

    /// Appends an uploaded document and makes it the active selection.
    pub fn add_document(&mut self, doc: NoteFile) -> &NoteFile {
        self.active_doc_id = Some(doc.id.clone());
        self.load_document(doc)
    }

    pub fn set_active_document(&mut self, id: Option<String>) {
        self.active_doc_id = id;
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Overwrites the text of the most recent message. Used to fold streamed
    /// fragments into the assistant placeholder; a no-op on an empty log.
    pub fn replace_last_message_text(&mut self, text: impl Into<String>) {
        if let Some(last) = self.messages.last_mut() {
            last.text = text.into();
        }
    }

    pub fn set_processing(&mut self, value: bool) {
        self.is_processing = value;
    }

    /// Looks a document up by exact id, or failing that by case-insensitive
    /// name prefix.
    pub fn find_document(&self, key: &str) -> Option<&NoteFile> {
        let needle = key.trim();
        self.documents
            .iter()
            .find(|doc| doc.id == needle)
            .or_else(|| {
                let lowered = needle.to_lowercase();
                self.documents
                    .iter()
                    .find(|doc| doc.name.to_lowercase().starts_with(&lowered))
            })
    }

    pub fn contains_hash(&self, content_hash: &str) -> bool {
        self.documents
            .iter()
            .any(|doc| doc.content_hash == content_hash)
    }
}
