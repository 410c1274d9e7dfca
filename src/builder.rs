use std::path::Path;

use crate::{
    Error, Result,
    image::ImageAsset,
    types::{
        Content, GenerateContentRequest, GenerationConfig, HarmCategory, Part, ResponseMimeType,
        Role, SafetySetting, Tool,
    },
};

/// A client-facing conversation turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Content::text(message.role, &message.content)
    }
}

impl From<&ImageAsset> for Content {
    fn from(image: &ImageAsset) -> Self {
        Content {
            role: Role::User,
            parts: vec![Part::inline_data(image.mime_type, &image.base64_data)],
        }
    }
}

/// Fluent builder for a [GenerateContentRequest]
///
/// Setters that can reject their input return `Result<Self>` so a chain reads
/// `RequestBuilder::new().with_prompt("...")?.enable_grounding().build()?`.
/// Contents are always assembled as chat history, then images, then the prompt.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    prompt: Option<String>,
    system_instruction: Option<String>,
    config: Option<GenerationConfig>,
    use_grounding: bool,
    safety_settings: Option<Vec<SafetySetting>>,
    chat_history: Vec<Content>,
    images: Vec<Content>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, prompt: &str) -> Result<Self> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::validation("prompt can't be empty"));
        }
        self.prompt = Some(prompt.to_owned());
        Ok(self)
    }

    pub fn with_system_instruction(mut self, instruction: &str) -> Result<Self> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(Error::validation("system instruction can't be empty"));
        }
        self.system_instruction = Some(instruction.to_owned());
        Ok(self)
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        self.config = Some(config);
        Ok(self)
    }

    /// Default generation settings with the given temperature and output format
    pub fn with_default_generation_config(
        mut self,
        temperature: f32,
        response_mime_type: ResponseMimeType,
    ) -> Result<Self> {
        self.config = Some(GenerationConfig::new(temperature, response_mime_type)?);
        Ok(self)
    }

    /// Attaches the Google Search tool to the request
    pub fn enable_grounding(mut self) -> Self {
        self.use_grounding = true;
        self
    }

    pub fn with_safety_settings(mut self, safety_settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(safety_settings);
        self
    }

    /// One [HarmBlockThreshold::BlockNone](crate::types::HarmBlockThreshold::BlockNone) rule
    /// per harm category
    pub fn disable_all_safety_settings(mut self) -> Self {
        self.safety_settings = Some(
            HarmCategory::ALL
                .iter()
                .copied()
                .map(SafetySetting::new)
                .collect(),
        );
        self
    }

    /// Replaces the history placed before the prompt, keeping the given order
    pub fn with_chat_history(mut self, messages: Vec<ChatMessage>) -> Result<Self> {
        if messages.is_empty() {
            return Err(Error::validation("chat history can't be empty"));
        }
        self.chat_history = messages.iter().map(Content::from).collect();
        Ok(self)
    }

    /// Replaces the images placed between the history and the prompt, one turn per image
    pub fn with_images(mut self, images: Vec<ImageAsset>) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::validation("image list can't be empty"));
        }
        self.images = images.iter().map(Content::from).collect();
        Ok(self)
    }

    /// Loads every path with [ImageAsset::load] and hands the result to [Self::with_images]
    pub fn with_image_paths<I>(self, paths: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let images = paths
            .into_iter()
            .map(ImageAsset::load)
            .collect::<Result<Vec<_>>>()?;
        self.with_images(images)
    }

    pub fn build(&self) -> Result<GenerateContentRequest> {
        if self.prompt.is_none() && self.images.is_empty() {
            return Err(Error::validation(
                "a request needs a prompt or at least one image",
            ));
        }

        let mut contents = Vec::with_capacity(self.chat_history.len() + self.images.len() + 1);
        contents.extend(self.chat_history.iter().cloned());
        contents.extend(self.images.iter().cloned());
        if let Some(prompt) = &self.prompt {
            contents.push(Content::text(Role::User, prompt));
        }

        tracing::trace!(
            history = self.chat_history.len(),
            images = self.images.len(),
            grounding = self.use_grounding,
            "assembled request contents"
        );

        Ok(GenerateContentRequest {
            contents,
            generation_config: self.config.unwrap_or_default(),
            system_instruction: self
                .system_instruction
                .as_deref()
                .map(|instruction| Content::text(Role::User, instruction)),
            tools: self.use_grounding.then(|| vec![Tool::default()]),
            safety_settings: self.safety_settings.clone(),
        })
    }
}
