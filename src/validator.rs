//! Static policy checks run before a request leaves the process

use crate::{
    Error, Result,
    error::Feature,
    types::{GenerateContentRequest, ModelVersion, ResponseMimeType},
};

const API_KEY_LENGTH: usize = 39;
const RESERVED_KEY_PREFIX: &str = "AIza";

/// Shallow shape check on an API key. Passing it says nothing about whether the key is accepted.
pub fn is_plausible_api_key(key: &str) -> bool {
    !key.is_empty() && key.len() == API_KEY_LENGTH && !key.starts_with(RESERVED_KEY_PREFIX)
}

pub fn supports_grounding(model: ModelVersion) -> bool {
    matches!(model, ModelVersion::Gemini20Flash)
}

pub fn supports_json_output(model: ModelVersion) -> bool {
    !matches!(model, ModelVersion::Gemini20FlashThinking)
}

/// Fails with [Error::Capability] when `request` needs something `model` cannot do
pub fn ensure_supported(request: &GenerateContentRequest, model: ModelVersion) -> Result<()> {
    let wants_grounding = request.tools.as_ref().is_some_and(|tools| !tools.is_empty());
    if wants_grounding && !supports_grounding(model) {
        return Err(Error::Capability {
            feature: Feature::Grounding,
            model,
        });
    }

    let wants_json = request.generation_config.response_mime_type == ResponseMimeType::Json;
    if wants_json && !supports_json_output(model) {
        return Err(Error::Capability {
            feature: Feature::JsonOutput,
            model,
        });
    }

    Ok(())
}
