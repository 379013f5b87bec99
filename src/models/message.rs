// file: src/models/message.rs
// description: conversation turn model for the chat log
// reference: internal data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation log.
///
/// Text is only ever rewritten on the most recent assistant turn, while its
/// response is still streaming in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub source_doc_id: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string()[..9].to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            source_doc_id: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Empty assistant turn appended before the first fragment arrives.
    pub fn assistant_placeholder() -> Self {
        Self::new(Role::Assistant, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = ChatMessage::user("What is the SIRS criteria?");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "What is the SIRS criteria?");

        let assistant = ChatMessage::assistant_placeholder();
        assert_eq!(assistant.role, Role::Assistant);
        assert!(assistant.text.is_empty());
        assert!(assistant.source_doc_id.is_none());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
