// file: src/provider/gemini.rs
// description: Gemini generateContent wire types and streaming chat model
// reference: https://ai.google.dev/api/generate-content

use crate::config::ProviderConfig;
use crate::error::{AssistantError, Result};
use crate::provider::client::ApiClient;
use crate::provider::{ChatModel, ChatRequest, ChatStream, StreamChunk, TurnRole};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Model,
}

impl From<TurnRole> for Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => Role::User,
            TurnRole::Assistant => Role::Model,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct Part {
    text: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: Vec<Part>,
}

impl Content {
    fn turn(role: Role, text: &str) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Clone, Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,

    #[serde(rename = "systemInstruction")]
    system_instruction: Content,

    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl From<&ChatRequest> for GenerateContentRequest {
    fn from(request: &ChatRequest) -> Self {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content::turn(turn.role.into(), &turn.text))
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: Content::system(&request.system_instruction),
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Clone, Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// Streaming chat over the Gemini `streamGenerateContent` endpoint.
pub struct GeminiModel {
    client: ApiClient,
    base_url: String,
    model_name: String,
}

impl GeminiModel {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            AssistantError::Config(
                "no API key configured; set NOTESAGE__PROVIDER__API_KEY or GEMINI_API_KEY"
                    .to_string(),
            )
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        let mut key_value = header::HeaderValue::from_str(api_key)
            .map_err(|_| AssistantError::Config("API key contains invalid characters".to_string()))?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        Ok(Self {
            client: ApiClient::with_headers(headers)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model_name
        );

        let request = GenerateContentRequest::from(request);
        let events = self
            .client
            .post_sse::<_, GenerateContentResponse>(&url, &request)
            .await?;

        Ok(Box::pin(events.map(|event| {
            event.map(|response| StreamChunk {
                text: response.text(),
            })
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ChatTurn;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            system_instruction: "Answer only from the documents.".to_string(),
            turns: vec![ChatTurn::user("What is the SIRS criteria?")],
            temperature: 0.1,
        };

        let wire = GenerateContentRequest::from(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is the SIRS criteria?");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Answer only from the documents."
        );
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        // The system instruction carries no role field.
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_assistant_turns_map_to_model_role() {
        let request = ChatRequest {
            system_instruction: String::new(),
            turns: vec![ChatTurn::assistant("Earlier answer."), ChatTurn::user("Next?")],
            temperature: 0.1,
        };

        let json = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["role"], "user");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Referenced"},{"text":": UP 15"}]}}]}"#,
        )
        .unwrap();

        assert_eq!(response.text(), "Referenced: UP 15");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(response.text(), "");
    }
}
