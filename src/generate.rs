//! The generate module talks to an Ollama-compatible text generation backend.

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::endpoint_url;
use crate::constants::{GENERATE_PATH, THINK_STRIPPER};
use crate::error::{Error, Result, Stage, check_status};

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Request body of `POST /api/generate`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct GenerateOptions {
    /// Upper bound on generated tokens.
    pub num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// A backend producing the article text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt` and returns it once complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the request.
    async fn generate(&self, model: &str, prompt: &str, max_tokens: u32) -> Result<String>;
}

/// Non-streaming client for the Ollama generate API.
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl OllamaClient {
    /// Creates a client for the backend at `base`.
    ///
    /// `base` is normally the server address; a value that already points at
    /// `/api/generate` is used as is.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL.
    pub fn new(client: reqwest::Client, base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/');
        let endpoint = if base.ends_with(GENERATE_PATH) {
            Url::parse(base).map_err(|err| Error::InvalidEndpoint(format!("{base}: {err}")))?
        } else {
            endpoint_url(base, GENERATE_PATH)?
        };
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
            },
        };
        debug!("Requesting generation from {} with {model}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(Error::transport(Stage::Generate))?;

        let status = response.status();
        let payload = check_status(Stage::Generate, response)
            .await?
            .text()
            .await
            .map_err(Error::transport(Stage::Generate))?;

        let parsed: GenerateResponse =
            serde_json::from_str(&payload).map_err(|_| Error::Backend {
                stage: Stage::Generate,
                status,
                body: payload.clone(),
            })?;

        parsed.response.ok_or_else(|| Error::Backend {
            stage: Stage::Generate,
            status,
            body: payload,
        })
    }
}

/// Removes `<think>` reasoning blocks and surrounding whitespace from
/// generated text.
#[must_use]
pub fn strip_thinking(text: &str) -> String {
    THINK_STRIPPER_REGEX.replace_all(text, "").trim().to_owned()
}
