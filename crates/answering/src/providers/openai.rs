use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shotwire_core::{AnswerRequest, AnswerResponse, ShotError, TextAnswerer};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions answerer.
pub struct OpenAiAnswerer {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiAnswerer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn error(&self, message: impl Into<String>) -> ShotError {
        ShotError::Answerer {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl TextAnswerer for OpenAiAnswerer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ShotError> {
        let start = Instant::now();

        let mut messages = Vec::new();
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: request.system_prompt.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.user_prompt.clone(),
        });

        let body = ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            n: request.n,
            stop: request.stop.clone(),
            temperature: request.temperature,
        };

        debug!(model = %request.model, "sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.error(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.error(format!("{status}: {error_body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.error(format!("failed to parse response: {e}")))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(latency_ms, "chat completion received");

        Ok(AnswerResponse {
            content,
            provider: self.name().to_string(),
            model: request.model.clone(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_choice_content() {
        let raw = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "  B is correct.  " } },
                { "message": { "role": "assistant", "content": "unused" } }
            ]
        }"#;
        let chat: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        assert_eq!(content, "B is correct.");
    }

    #[test]
    fn request_body_omits_absent_stop_sequences() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![],
            max_tokens: 1500,
            n: 1,
            stop: None,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("stop").is_none());
        assert_eq!(json["max_tokens"], 1500);
        assert_eq!(json["n"], 1);
    }
}
