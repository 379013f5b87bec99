// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod chat;
pub mod config;
pub mod error;
pub mod extract;
pub mod library;
pub mod models;
pub mod provider;
pub mod session;
pub mod utils;
pub mod viewer;

pub use chat::{ChatOptions, FALLBACK_REPLY, QueryDispatcher, grounding_instruction, matching_documents};
pub use config::{ChatConfig, Config, LibraryConfig, ProviderConfig};
pub use error::{AssistantError, Result};
pub use extract::{ExtractedNote, extract_file};
pub use library::{NoteScanner, import_file, seed_protocols};
pub use models::{ChatMessage, NoteFile, Role};
pub use provider::{ChatModel, ChatRequest, ChatStream, ChatTurn, GeminiModel, StreamChunk};
pub use session::SessionState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _state = SessionState::with_documents(seed_protocols());
    }
}
