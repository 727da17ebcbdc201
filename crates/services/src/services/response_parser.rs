//! Extracts the generated site from Claude's free-text reply.

use db::models::generated_code::{GeneratedCode, GenerationMetadata};
use serde_json::Value;
use thiserror::Error;
use tracing::error;
use utils::text::preview;

#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("no JSON found in response")]
    NoJson,
    #[error("invalid JSON in response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Greedy brace scan: everything from the first `{` to the last `}`.
///
/// This is not a JSON scanner. Prose after the payload that contains a `}`
/// makes the slice invalid, and the parse then fails.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse Claude's reply into a [`GeneratedCode`]. Missing fields become empty;
/// timing and token counts are left at zero for the caller to fill in.
pub fn parse_generated_code(text: &str) -> Result<GeneratedCode, ResponseParseError> {
    let Some(block) = extract_json_block(text) else {
        error!(response = %preview(text, 200), "No JSON object in Claude response");
        return Err(ResponseParseError::NoJson);
    };

    let parsed: Value = serde_json::from_str(block).map_err(|e| {
        error!(
            json_error = %e,
            response_length = text.len(),
            extracted_json_preview = %preview(block, 500),
            "Failed to parse JSON response from Claude"
        );
        ResponseParseError::InvalidJson(e)
    })?;

    let metadata = &parsed["metadata"];

    Ok(GeneratedCode {
        html: string_field(&parsed["html"]),
        css: string_field(&parsed["css"]),
        javascript: string_field(&parsed["javascript"]),
        metadata: GenerationMetadata {
            category: string_field(&metadata["category"]),
            image_urls: string_list(&metadata["imageUrls"]),
            sections: string_list(&metadata["sections"]),
            ..Default::default()
        },
    })
}

fn string_field(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
