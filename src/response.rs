use serde::Serialize;

use crate::{
    Error, Result,
    error::{ParseCause, ProviderError},
    types::{ApiError, GenerateContentResponse, GroundingMetadata, UsageMetadata},
};

/// Substituted for the result text when the first candidate carries no content
pub const FALLBACK_TEXT: &str = "Failed to generate content";

const UNDEFINED_STATUS: &str = "Undefined";

/// Simplified result of one `generateContent` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub text: String,
    pub grounding_detail: Option<GroundingDetail>,
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(skip)]
    fallback: bool,
}

impl GeneratedContent {
    /// Whether [FALLBACK_TEXT] was substituted for missing model output
    ///
    /// A model that literally answers with that sentence is not a fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl std::fmt::Display for GeneratedContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Web-search evidence behind a grounded answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingDetail {
    pub rendered_html: Option<String>,
    pub sources: Vec<GroundingSource>,
    /// Supported segments, highest confidence first
    pub reliable_information: Vec<String>,
    pub search_suggestions: Vec<String>,
    /// Response spans backed by a web source, in response order
    pub citations: Vec<Citation>,
}

impl GroundingDetail {
    /// Rewrites every cited span of `text` as a markdown link `[span](url)`
    ///
    /// Citations that overlap an earlier one, fall outside `text` or split a character are left
    /// as plain text.
    pub fn link_citations(&self, text: &str) -> String {
        let mut citations: Vec<&Citation> = self.citations.iter().collect();
        citations.sort_by_key(|citation| citation.start_index);

        let mut linked = String::with_capacity(text.len());
        let mut cursor = 0;
        for citation in citations {
            if citation.start_index < cursor {
                continue;
            }
            let Some(span) = text.get(citation.start_index..citation.end_index) else {
                continue;
            };
            if span.is_empty() {
                continue;
            }
            linked.push_str(&text[cursor..citation.start_index]);
            linked.push('[');
            linked.push_str(span);
            linked.push_str("](");
            linked.push_str(&citation.url);
            linked.push(')');
            cursor = citation.end_index;
        }
        linked.push_str(&text[cursor..]);
        linked
    }
}

/// A byte range of the response text and the first web source supporting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub start_index: usize,
    /// Exclusive
    pub end_index: usize,
    pub url: String,
}

/// A page cited by a grounded answer
///
/// `domain` holds the chunk title as the API reports it, which for web results is usually the
/// site's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroundingSource {
    pub domain: String,
    pub url: String,
}

/// What to derive from grounding metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    pub include_grounding_detail: bool,
    /// Only honored together with `include_grounding_detail`
    pub include_search_entry_point: bool,
}

/// Turns a raw response body into a [GeneratedContent] or an [Error]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseInterpreter {
    options: ResponseOptions,
}

impl ResponseInterpreter {
    pub fn new(options: ResponseOptions) -> Self {
        Self { options }
    }

    /// `is_success` comes from the HTTP status, not from the body
    pub fn interpret(&self, is_success: bool, body: &str) -> Result<GeneratedContent> {
        if is_success {
            self.interpret_success(body)
        } else {
            Err(interpret_failure(body))
        }
    }

    fn interpret_success(&self, body: &str) -> Result<GeneratedContent> {
        let response: GenerateContentResponse =
            serde_json::from_str(body).map_err(|e| Error::response_parse(body, e))?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(Error::response_parse(body, ParseCause::MissingCandidate));
        };

        let text = candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);
        let (text, fallback) = match text {
            Some(text) => (text, false),
            None => {
                tracing::warn!(
                    finish_reason = candidate.finish_reason.as_deref().unwrap_or("unknown"),
                    "candidate has no text content"
                );
                (FALLBACK_TEXT.to_owned(), true)
            }
        };

        let grounding_detail = match &candidate.grounding_metadata {
            Some(metadata) if self.options.include_grounding_detail => Some(grounding_detail(
                metadata,
                self.options.include_search_entry_point,
            )),
            _ => None,
        };

        Ok(GeneratedContent {
            text,
            grounding_detail,
            usage_metadata: response.usage_metadata,
            fallback,
        })
    }
}

fn interpret_failure(body: &str) -> Error {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return Error::response_parse(body, e),
    };

    let error = match serde_json::from_value::<ApiError>(value) {
        Ok(ApiError { error }) => ProviderError {
            status: error
                .status
                .unwrap_or_else(|| UNDEFINED_STATUS.to_owned()),
            code: error.code,
            message: error.message,
            details: error.details,
        },
        Err(_) => ProviderError {
            status: UNDEFINED_STATUS.to_owned(),
            code: None,
            message: body.to_owned(),
            details: Vec::new(),
        },
    };

    tracing::debug!(status = %error.status, code = ?error.code, "provider returned an error");
    Error::Provider(error)
}

fn grounding_detail(metadata: &GroundingMetadata, include_search_entry_point: bool) -> GroundingDetail {
    let mut ranked: Vec<(f64, &str)> = metadata
        .grounding_supports
        .iter()
        .map(|support| {
            let confidence = support
                .confidence_scores
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            (confidence, support.segment.text.as_str())
        })
        .collect();
    // stable, so equal scores keep response order
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    GroundingDetail {
        rendered_html: if include_search_entry_point {
            metadata
                .search_entry_point
                .as_ref()
                .and_then(|entry| entry.rendered_content.clone())
        } else {
            None
        },
        sources: metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| GroundingSource {
                domain: web.title.clone().unwrap_or_default(),
                url: web.uri.clone().unwrap_or_default(),
            })
            .collect(),
        reliable_information: ranked.into_iter().map(|(_, text)| text.to_owned()).collect(),
        search_suggestions: metadata.web_search_queries.clone(),
        citations: citations(metadata),
    }
}

fn citations(metadata: &GroundingMetadata) -> Vec<Citation> {
    metadata
        .grounding_supports
        .iter()
        .filter_map(|support| {
            let url = support.grounding_chunk_indices.iter().find_map(|&index| {
                let chunk = metadata.grounding_chunks.get(index as usize)?;
                chunk.web.as_ref()?.uri.clone()
            })?;
            // the API omits startIndex when it is zero
            Some(Citation {
                start_index: support.segment.start_index.unwrap_or(0) as usize,
                end_index: support.segment.end_index? as usize,
                url,
            })
        })
        .collect()
}
