use super::{GenerationResult, GenerationService, PromptPart};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const MOCK_MODEL: &str = "mock-model";

#[derive(Clone)]
pub struct MockGenerationClient {
    responses: Arc<Mutex<Vec<GenerationResult>>>,
    failure: Option<String>,
    received: Arc<Mutex<Vec<Vec<PromptPart>>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: GenerationResult) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_text_response(self, text: &str) -> Self {
        self.with_response(GenerationResult::from_texts([text]))
    }

    /// Every call fails with `Error::Generation(message)`.
    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Part lists received so far, oldest first.
    pub fn received_parts(&self) -> Vec<Vec<PromptPart>> {
        self.received.lock().unwrap().clone()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(&self, parts: &[PromptPart]) -> Result<GenerationResult> {
        let count = {
            let mut received = self.received.lock().unwrap();
            received.push(parts.to_vec());
            received.len()
        };

        if let Some(message) = &self.failure {
            return Err(Error::Generation(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GenerationResult::default())
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }

    fn model(&self) -> &str {
        MOCK_MODEL
    }
}
