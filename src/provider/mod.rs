// file: src/provider/mod.rs
// description: hosted chat-model abstraction and streaming types
// reference: trait seam over the remote completion API

pub mod client;
pub mod gemini;

pub use gemini::GeminiModel;

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

/// One incremental fragment of model output, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    pub text: String,
}

/// Finite, non-restartable fragment stream. Transport failures surface as
/// `Err` items so the dispatcher's single catch can handle them.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

/// Role-tagged conversation turn forwarded to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// A single streaming completion request: grounding instruction, trailing
/// history plus the new question, and the sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub turns: Vec<ChatTurn>,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;

    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChatStream>;
}
