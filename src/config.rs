use std::time::Duration;

use crate::{Error, Result, types::ModelVersion};

pub const DEFAULT_ENDPOINT_PREFIX: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub(crate) const API_KEY_VAR: &str = "GEMINI_API_KEY";
const ENDPOINT_VAR: &str = "GEMINI_API_ENDPOINT";
const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

/// Settings shared by every request a [Generator](crate::Generator) sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Everything before `/{model}:generateContent`
    pub endpoint_prefix: String,
    /// Applied to the whole HTTP exchange; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Used when a call does not pick a model
    pub default_model: ModelVersion,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint_prefix: DEFAULT_ENDPOINT_PREFIX.to_owned(),
            timeout: None,
            default_model: ModelVersion::default(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults overridden by `GEMINI_API_ENDPOINT` and `GEMINI_TIMEOUT_SECS` when set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(prefix) = lookup(ENDPOINT_VAR).filter(|prefix| !prefix.trim().is_empty()) {
            config.endpoint_prefix = prefix.trim().trim_end_matches('/').to_owned();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                Error::validation(format!("{TIMEOUT_VAR} must be a whole number of seconds"))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}
