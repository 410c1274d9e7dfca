use std::{fmt, path::PathBuf};

use crate::types::{ErrorInfo, ModelVersion};

/// Every failure the library can surface
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected builder or generator input, raised before anything is sent
    #[error("invalid input: {0}")]
    Validation(String),

    /// The chosen model version cannot serve the requested feature
    #[error("{feature} is not supported by {model}")]
    Capability { feature: Feature, model: ModelVersion },

    #[error("image file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported image format `{extension}` for {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("provider error: {0}")]
    Provider(ProviderError),

    /// The response body could not be decoded; `body` keeps the raw text for diagnostics
    #[error("failed to parse response: {cause}")]
    ResponseParse {
        body: String,
        #[source]
        cause: ParseCause,
    },

    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn response_parse(body: &str, cause: impl Into<ParseCause>) -> Self {
        Self::ResponseParse {
            body: body.to_owned(),
            cause: cause.into(),
        }
    }
}

/// Model capabilities gated per [ModelVersion]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Grounding,
    JsonOutput,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feature::Grounding => "grounding",
            Feature::JsonOutput => "JSON output",
        })
    }
}

/// Why a response body was rejected
#[derive(Debug, thiserror::Error)]
pub enum ParseCause {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("response contains no candidates")]
    MissingCandidate,
}

/// Error envelope returned by the API on a non-2xx response
///
/// `status` is `"Undefined"` and `code` is `None` when the body was valid JSON but not an error
/// envelope; `message` then holds the raw body.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub status: String,
    pub code: Option<u16>,
    pub message: String,
    pub details: Vec<ErrorInfo>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({code}): {}", self.status, self.message),
            None => write!(f, "{}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ProviderError {}
