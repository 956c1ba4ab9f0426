use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use crate::ai::{
    Blob, Candidate, GenerationResult, GenerationService, PromptPart, ResponsePart,
};
use crate::Result;
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;

/// `GenerationService` backed by Gemini's `generateContent`.
///
/// Holds a pooled `reqwest::Client`; one instance serves every request.
pub struct GeminiGenerateClient {
    http: GeminiHttpClient,
}

impl GeminiGenerateClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn build_request(parts: &[PromptPart]) -> GenerateContentRequest {
        let parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part::Text { text: text.clone() },
                PromptPart::InlineData(blob) => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: blob.mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&blob.data),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }

    fn convert_part(part: Part) -> ResponsePart {
        match part {
            Part::Text { text } => ResponsePart::Text(text),
            Part::InlineData { inline_data } => {
                match base64::engine::general_purpose::STANDARD.decode(&inline_data.data) {
                    Ok(data) => ResponsePart::InlineData(Blob {
                        mime_type: inline_data.mime_type,
                        data,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            "Dropping undecodable inline {} part from Gemini: {}",
                            inline_data.mime_type,
                            e
                        );
                        ResponsePart::Unsupported
                    }
                }
            }
            Part::Other(_) => ResponsePart::Unsupported,
        }
    }

    fn convert_response(response: GenerateContentResponse) -> GenerationResult {
        GenerationResult {
            candidates: response
                .candidates
                .into_iter()
                .map(|c| Candidate {
                    parts: c
                        .content
                        .map(|content| content.parts)
                        .unwrap_or_default()
                        .into_iter()
                        .map(Self::convert_part)
                        .collect(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl GenerationService for GeminiGenerateClient {
    async fn generate(&self, parts: &[PromptPart]) -> Result<GenerationResult> {
        tracing::debug!(
            "Sending {} part(s) to Gemini model {}",
            parts.len(),
            self.http.model()
        );

        let request = Self::build_request(parts);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Ok(Self::convert_response(response))
    }

    fn model(&self) -> &str {
        self.http.model()
    }
}
