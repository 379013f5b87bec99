// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod message;

pub use document::NoteFile;
pub use message::{ChatMessage, Role};
