//! AI service integration for multi-part generation
//!
//! Provider-neutral prompt and response types, plus the Gemini REST client
//! that turns them into `generateContent` calls.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiGenerateClient;
pub use mock::MockGenerationClient;

use crate::Result;
use async_trait::async_trait;

/// Binary payload with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// One unit of an outbound prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    InlineData(Blob),
}

/// One fragment of a generated candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    InlineData(Blob),
    /// Function calls, code execution results and anything else without text.
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub candidates: Vec<Candidate>,
}

impl GenerationResult {
    /// Single-candidate result made of text fragments.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: vec![Candidate {
                parts: texts
                    .into_iter()
                    .map(|t| ResponsePart::Text(t.into()))
                    .collect(),
            }],
        }
    }
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit all parts as one user content block.
    async fn generate(&self, parts: &[PromptPart]) -> Result<GenerationResult>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
