// file: src/chat/dispatcher.rs
// description: streams grounded answers into the conversation log
// reference: orchestrates the question -> stream -> fold flow

use crate::chat::prompt::grounding_instruction;
use crate::error::{AssistantError, Result};
use crate::models::{ChatMessage, Role};
use crate::provider::{ChatModel, ChatRequest, ChatTurn};
use crate::session::SessionState;
use futures::StreamExt;
use tracing::{debug, warn};

/// Fixed user-facing reply whenever the provider call or its stream fails.
/// Partial fragments are discarded; the whole message becomes this string.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error while searching your class notes.";

#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Sampling temperature; near zero to minimize creative license.
    pub temperature: f32,
    /// Number of trailing history turns forwarded to the model.
    pub history_window: usize,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            history_window: 10,
        }
    }
}

/// Outcome of one dispatched question: the final assistant text and whether
/// the fallback path fired.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub answer: String,
    pub failed: bool,
}

/// Sends one user question to the model, grounded in the full document
/// library, and folds the streamed fragments into the conversation log.
pub struct QueryDispatcher<M: ChatModel> {
    model: M,
    options: ChatOptions,
}

impl<M: ChatModel> QueryDispatcher<M> {
    pub fn new(model: M, options: ChatOptions) -> Self {
        Self { model, options }
    }

    /// Dispatches a question. Appends the user turn and an empty assistant
    /// placeholder, then overwrites the placeholder's text as each fragment
    /// arrives (also forwarding the fragment to `on_fragment` for
    /// incremental rendering). Any failure, at connect time or mid-stream,
    /// is caught here once: the placeholder becomes `FALLBACK_REPLY` and no
    /// partial output survives. `is_processing` covers the whole operation
    /// and is cleared on success and failure alike.
    ///
    /// An empty question, or a call while a response is already in flight,
    /// is rejected without touching the conversation log.
    pub async fn dispatch<F>(
        &self,
        state: &mut SessionState,
        question: &str,
        mut on_fragment: F,
    ) -> Result<DispatchReport>
    where
        F: FnMut(&str),
    {
        if question.trim().is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }
        if state.is_processing() {
            return Err(AssistantError::Busy);
        }

        // Snapshot before this turn's messages are appended: the window is
        // taken over the history as it existed at submission time.
        let history = trailing_history(state, self.options.history_window);
        let request = self.build_request(state, question, history);

        state.append_message(ChatMessage::user(question));
        state.set_processing(true);
        state.append_message(ChatMessage::assistant_placeholder());

        let outcome = self.stream_into(state, &request, &mut on_fragment).await;
        state.set_processing(false);

        let failed = match outcome {
            Ok(()) => false,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                state.replace_last_message_text(FALLBACK_REPLY);
                true
            }
        };

        let answer = state
            .messages()
            .last()
            .map(|m| m.text.clone())
            .unwrap_or_default();

        Ok(DispatchReport { answer, failed })
    }

    fn build_request(
        &self,
        state: &SessionState,
        question: &str,
        history: Vec<ChatTurn>,
    ) -> ChatRequest {
        let mut turns = history;
        turns.push(ChatTurn::user(question));

        ChatRequest {
            system_instruction: grounding_instruction(state.documents()),
            turns,
            temperature: self.options.temperature,
        }
    }

    async fn stream_into<F>(
        &self,
        state: &mut SessionState,
        request: &ChatRequest,
        on_fragment: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        debug!("Dispatching question to {}", self.model.name());
        let mut stream = self.model.stream_chat(request).await?;

        let mut full_text = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if chunk.text.is_empty() {
                continue;
            }

            on_fragment(&chunk.text);
            full_text.push_str(&chunk.text);
            state.replace_last_message_text(full_text.clone());
        }

        Ok(())
    }
}

/// The last `window` conversation turns, oldest first, mapped to provider
/// turns. Older turns are silently dropped; there is no summarization.
fn trailing_history(state: &SessionState, window: usize) -> Vec<ChatTurn> {
    let messages = state.messages();
    let start = messages.len().saturating_sub(window);

    messages[start..]
        .iter()
        .map(|message| match message.role {
            Role::User => ChatTurn::user(&message.text),
            Role::Assistant => ChatTurn::assistant(&message.text),
        })
        .collect()
}
