//! Translation between the chat payload and multi-part generation requests.
//!
//! Text goes first, then the image. Images that fail to decode are dropped
//! without surfacing an error, so a request may reach the provider with only
//! text, or with no parts at all.

use crate::ai::{Blob, GenerationResult, GenerationService, PromptPart, ResponsePart};
use crate::models::ChatRequest;
use crate::Result;
use base64::Engine as _;

/// Media type attached to every uploaded image, whatever its real encoding.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// Drop a data-URL header (`data:<mime>;base64,`): everything up to and
/// including the first comma.
pub fn strip_data_url_header(image: &str) -> &str {
    image.split_once(',').map_or(image, |(_, payload)| payload)
}

pub fn decode_image(image: &str) -> Option<Vec<u8>> {
    let payload = strip_data_url_header(image);
    match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!("Ignoring undecodable image ({} chars): {}", payload.len(), e);
            None
        }
    }
}

pub fn assemble_parts(request: &ChatRequest) -> Vec<PromptPart> {
    let mut parts = Vec::with_capacity(2);

    if let Some(message) = request.message.as_deref().filter(|m| !m.is_empty()) {
        parts.push(PromptPart::Text(message.to_string()));
    }

    if let Some(data) = request
        .image
        .as_deref()
        .filter(|i| !i.is_empty())
        .and_then(decode_image)
    {
        parts.push(PromptPart::InlineData(Blob {
            mime_type: IMAGE_MIME_TYPE.to_string(),
            data,
        }));
    }

    parts
}

/// Concatenate the text of the first candidate; `""` when there is none.
pub fn reduce_response(result: &GenerationResult) -> String {
    result
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .parts
                .iter()
                .filter_map(|part| match part {
                    ResponsePart::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Assemble, generate, reduce.
pub async fn relay(service: &dyn GenerationService, request: &ChatRequest) -> Result<String> {
    let parts = assemble_parts(request);
    if parts.is_empty() {
        tracing::warn!("Forwarding chat request with no usable parts");
    }

    let result = service.generate(&parts).await?;
    let reply = reduce_response(&result);

    tracing::debug!(
        "Reduced {} candidate(s) to {} chars",
        result.candidates.len(),
        reply.len()
    );
    Ok(reply)
}
