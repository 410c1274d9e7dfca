use crate::{
    Error, Generator, Result,
    builder::{ChatMessage, RequestBuilder},
    response::GeneratedContent,
    transport::Transport,
    types::{GenerateContentRequest, GenerationConfig, ModelVersion, ResponseMimeType, SafetySetting},
};

/// A conversation that replays its own history on every turn
///
/// Starts on the generator's default model.
pub struct Chat<'g, T> {
    generator: &'g Generator<T>,
    model: ModelVersion,
    system_instruction: Option<Box<str>>,
    safety_settings: Option<Vec<SafetySetting>>,
    history: Vec<ChatMessage>,
    config: Option<GenerationConfig>,
}

impl<'g, T: Transport> Chat<'g, T> {
    pub fn new(generator: &'g Generator<T>) -> Self {
        Self {
            generator,
            model: generator.default_model(),
            system_instruction: None,
            safety_settings: None,
            history: Vec::new(),
            config: None,
        }
    }

    pub fn model(mut self, model: ModelVersion) -> Self {
        self.model = model;
        self
    }

    pub fn config(&self) -> GenerationConfig {
        self.config.unwrap_or_default()
    }

    pub fn config_mut(&mut self) -> &mut GenerationConfig {
        self.config.get_or_insert_default()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut Vec<ChatMessage> {
        &mut self.history
    }

    pub fn safety_settings(&mut self, safety_settings: Vec<SafetySetting>) {
        self.safety_settings = Some(safety_settings);
    }

    pub fn system_instruction(mut self, instruction: &str) -> Self {
        self.system_instruction = Some(Box::from(instruction));
        self
    }

    /// Sends `message` after the history; both turns are recorded only if the call succeeds
    pub async fn send_message(&mut self, message: &str) -> Result<GeneratedContent> {
        let request = self.request(message)?;
        let response = self
            .generator
            .generate_content(request)
            .model(self.model)
            .await?;

        self.history.push(ChatMessage::user(message.trim()));
        if !response.is_fallback() {
            self.history.push(ChatMessage::model(response.text.clone()));
        }
        Ok(response)
    }

    /// Asks for `application/json` output and deserializes the reply into `R`
    pub async fn send_json<R: serde::de::DeserializeOwned>(&mut self, message: &str) -> Result<R> {
        self.config_mut().response_mime_type = ResponseMimeType::Json;
        let response = self.send_message(message).await?;
        serde_json::from_str(&response.text).map_err(|e| Error::response_parse(&response.text, e))
    }

    fn request(&self, message: &str) -> Result<GenerateContentRequest> {
        let mut builder = RequestBuilder::new().with_prompt(message)?;

        if let Some(instruction) = &self.system_instruction {
            builder = builder.with_system_instruction(instruction)?;
        }
        if let Some(config) = self.config {
            builder = builder.with_generation_config(config)?;
        }
        if let Some(safety_settings) = &self.safety_settings {
            builder = builder.with_safety_settings(safety_settings.clone());
        }
        if !self.history.is_empty() {
            builder = builder.with_chat_history(self.history.clone())?;
        }

        builder.build()
    }
}
