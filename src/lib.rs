#![warn(unreachable_pub, unused_qualifications)]

//! *A Rust client for the Gemini `generateContent` endpoint.*
//!
//! # Overview
//!
//! Requests are assembled with a [RequestBuilder], checked against the target model's
//! capabilities, sent once through a [Transport], and the reply is reduced to a
//! [GeneratedContent]:
//!
//! - Prompts, system instructions and multi-turn history
//! - Inline images loaded from disk ([ImageAsset])
//! - JSON-structured output
//! - Google Search grounding, with sources ranked by confidence
//! - Safety settings
//!
//! # Authentication
//!
//! Either an API key, passed as the `key` query parameter:
//! - Environment variable: `GEMINI_API_KEY` via [Generator::from_env]
//! - Programmatically: [Generator::new]
//!
//! or a bearer token plus project header through [Generator::with_cloud_project].
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use gemini_request::{Generator, RequestBuilder};
//!
//! #[tokio::main]
//! async fn main() -> gemini_request::Result<()> {
//!     let generator = Generator::from_env()?;
//!     let request = RequestBuilder::new()
//!         .with_prompt("What is Rust's ownership model?")?
//!         .build()?;
//!
//!     let response = generator.generate_content(request).await?;
//!     println!("{response}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Conversations
//!
//! [Chat] keeps the history between turns:
//!
//! - Model selection (`chat.model()`)
//! - Custom generation settings (`chat.config_mut()`)
//! - Safety settings (`chat.safety_settings()`)
//! - System instructions (`chat.system_instruction()`)
//! - Conversation history management (`chat.history_mut()`)

mod builder;
mod chat;
mod config;
mod error;
mod generator;
mod image;
mod response;
mod transport;
pub mod types;
pub mod validator;
mod wire;

#[cfg(test)]
mod testing;

pub type Result<T> = std::result::Result<T, Error>;

pub use builder::{ChatMessage, RequestBuilder};
pub use chat::Chat;
pub use config::{DEFAULT_ENDPOINT_PREFIX, GeneratorConfig};
pub use error::{Error, Feature, ParseCause, ProviderError};
pub use generator::{GenerateContent, Generator};
pub use image::ImageAsset;
pub use response::{
    Citation, FALLBACK_TEXT, GeneratedContent, GroundingDetail, GroundingSource,
    ResponseInterpreter, ResponseOptions,
};
pub use transport::{HttpTransport, RawResponse, Transport};
