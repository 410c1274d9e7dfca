//! Wire types for the `generateContent` endpoint and the enums they carry

use serde::{Deserialize, Serialize};

use crate::{Error, Result, wire::wire_enum};

wire_enum! {
    /// The producer of the content
    pub enum Role {
        User => "user",
        Model => "model",
    }
}

wire_enum! {
    /// Output format requested through [GenerationConfig::response_mime_type]
    #[derive(Default)]
    pub enum ResponseMimeType {
        Json => "application/json",
        #[default]
        PlainText => "text/plain",
    }
}

wire_enum! {
    /// The category of a rating
    ///
    /// [API Reference](https://ai.google.dev/api/generate-content#harmcategory)
    pub enum HarmCategory {
        /// Dangerous content
        DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
        /// Harassment content
        Harassment => "HARM_CATEGORY_HARASSMENT",
        /// Hate speech and content
        HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
        /// Sexually explicit content
        SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        /// Content that may be used to harm civic integrity
        CivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
    }
}

wire_enum! {
    /// Block at and beyond a specified harm probability
    ///
    /// [API Reference](https://ai.google.dev/api/generate-content#HarmBlockThreshold)
    #[derive(Default)]
    pub enum HarmBlockThreshold {
        /// Block when the probability is low, medium or high
        BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        /// Block when the probability is medium or high
        BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
        /// Content with negligible and low probability will be allowed
        BlockOnlyHigh => "BLOCK_ONLY_HIGH",
        /// Use the default threshold
        Unspecified => "HARM_BLOCK_THRESHOLD_UNSPECIFIED",
        /// Turn off the safety filter
        Off => "OFF",
        /// All content will be allowed
        #[default]
        BlockNone => "BLOCK_NONE",
    }
}

wire_enum! {
    /// Image formats accepted as inline data
    ///
    /// [API Reference](https://ai.google.dev/gemini-api/docs/image-understanding#supported-formats)
    pub enum ImageMimeType {
        Png => "image/png",
        Jpeg => "image/jpeg",
        Webp => "image/webp",
        Heic => "image/heic",
        Heif => "image/heif",
    }
}

impl ImageMimeType {
    /// Maps a file extension, without the dot, to its image type. Case is ignored.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "heic" => Some(Self::Heic),
            "heif" => Some(Self::Heif),
            _ => None,
        }
    }
}

wire_enum! {
    /// Supported model versions, ordered oldest first
    #[derive(Default, PartialOrd, Ord)]
    pub enum ModelVersion {
        Gemini15Flash => "gemini-1.5-flash",
        Gemini15Pro => "gemini-1.5-pro",
        Gemini20FlashLite => "gemini-2.0-flash-lite-preview-02-05",
        Gemini20Pro => "gemini-2.0-pro-exp-02-05",
        Gemini20FlashThinking => "gemini-2.0-flash-thinking-exp-01-21",
        #[default]
        Gemini20Flash => "gemini-2.0-flash",
    }
}

impl ModelVersion {
    /// The highest version in declaration order
    ///
    /// Preview and thinking variants are not filtered out; this relies on the newest stable
    /// release being declared last.
    pub fn latest_stable() -> Self {
        Self::ALL
            .iter()
            .copied()
            .max()
            .unwrap_or(Self::Gemini20Flash)
    }
}

/// Request to generate content from the model
///
/// [API Reference](https://ai.google.dev/api/generate-content#request-body)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
}

/// One conversation turn: a role and its parts
///
/// [API Reference](https://ai.google.dev/api/caching#Content)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Role, text: &str) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
        }
    }
}

/// Either text or inline media, never both
///
/// [API Reference](https://ai.google.dev/api/caching#Part)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: ImageMimeType, data: &str) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.describe().into(),
                data: data.into(),
            },
        }
    }
}

/// Inline media bytes, base64 encoded
///
/// [API Reference](https://ai.google.dev/api/caching#Blob)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Configuration options for model generation and outputs
///
/// [API Reference](https://ai.google.dev/api/generate-content#v1beta.GenerationConfig)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature, within `0.0..=2.0`
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_mime_type: ResponseMimeType,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            response_mime_type: ResponseMimeType::PlainText,
        }
    }
}

impl GenerationConfig {
    pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

    /// Defaults with the given temperature and output format
    pub fn new(temperature: f32, response_mime_type: ResponseMimeType) -> Result<Self> {
        let config = Self {
            temperature,
            response_mime_type,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !Self::TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(Error::validation(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Safety setting, affecting the safety-blocking behavior
///
/// [API Reference](https://ai.google.dev/api/generate-content#safetysetting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// A rule for `category` at the most permissive threshold
    pub fn new(category: HarmCategory) -> Self {
        Self {
            category,
            threshold: HarmBlockThreshold::default(),
        }
    }
}

/// Tool details that the model may use to generate a response
///
/// Only Google Search grounding is exposed; its presence in a request is what enables it.
///
/// [API Reference](https://ai.google.dev/api/caching#Tool)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// [API Reference](https://ai.google.dev/api/caching#GoogleSearch)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoogleSearch {}

/// Response from the model supporting multiple candidate responses
///
/// [API Reference](https://ai.google.dev/api/generate-content#generatecontentresponse)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub model_version: Option<String>,
}

/// A response candidate generated from the model
///
/// [API Reference](https://ai.google.dev/api/generate-content#candidate)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
    pub index: Option<i32>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePart {
    pub text: Option<String>,
    pub inline_data: Option<Blob>,
}

/// Inline media in a response; the API names its fields in camelCase here
///
/// [API Reference](https://ai.google.dev/api/caching#Blob)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: Option<String>,
    pub data: Option<String>,
}

/// Metadata returned to the client when grounding is enabled
///
/// [API Reference](https://ai.google.dev/api/generate-content#GroundingMetadata)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub search_entry_point: Option<SearchEntryPoint>,
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    pub grounding_supports: Vec<GroundingSupport>,
    pub retrieval_metadata: Option<RetrievalMetadata>,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    /// Web content snippet that can be embedded in a web page
    pub rendered_content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// A claim in the response and the chunks backing it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSupport {
    pub segment: Segment,
    #[serde(default)]
    pub grounding_chunk_indices: Vec<u32>,
    #[serde(default)]
    pub confidence_scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_index: Option<u32>,
    pub end_index: Option<u32>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalMetadata {
    pub google_search_dynamic_retrieval_score: Option<f64>,
}

/// Metadata on the generation request's token usage
///
/// [API Reference](https://ai.google.dev/api/generate-content#UsageMetadata)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u64>,
    pub candidates_token_count: Option<u64>,
    pub total_token_count: Option<u64>,
    #[serde(default)]
    pub prompt_tokens_details: Vec<ModalityTokenCount>,
    #[serde(default)]
    pub candidates_tokens_details: Vec<ModalityTokenCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityTokenCount {
    pub modality: Option<String>,
    pub token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    #[serde(rename = "@type", default)]
    pub r#type: String,
    #[serde(default)]
    pub field_violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldViolation {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub description: String,
}
