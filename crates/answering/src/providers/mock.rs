use std::sync::Mutex;

use async_trait::async_trait;

use shotwire_core::{AnswerRequest, AnswerResponse, ShotError, TextAnswerer};

/// A canned-response answerer for offline tests.
///
/// Records every prompt it sees so tests can assert whether (and with what)
/// the text branch was invoked.
pub struct MockAnswerer {
    fixed_response: Option<String>,
    fail_with: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockAnswerer {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Make every call fail with a provider error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// User prompts seen so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAnswerer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextAnswerer for MockAnswerer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResponse, ShotError> {
        self.calls.lock().unwrap().push(request.user_prompt.clone());

        if let Some(message) = &self.fail_with {
            return Err(ShotError::Answerer {
                provider: self.name().to_string(),
                message: message.clone(),
            });
        }

        Ok(AnswerResponse {
            content: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock answer".to_string()),
            provider: self.name().to_string(),
            model: request.model.clone(),
            latency_ms: 0,
        })
    }
}
