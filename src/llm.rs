use std::time::Duration;

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::{LlmConfig, LlmService};

const ARTICLE_PLACEHOLDER: &str = "{article}";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no choices")]
    NoChoices,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Embed the first `max_chars` characters of the article into the template.
pub fn build_prompt(template: &str, article_text: &str, max_chars: usize) -> String {
    let excerpt = match article_text.char_indices().nth(max_chars) {
        Some((end, _)) => &article_text[..end],
        None => article_text,
    };
    template.replace(ARTICLE_PLACEHOLDER, excerpt)
}

/// Turns article text into a blog post draft using the configured backend.
#[derive(Debug)]
pub struct Summarizer {
    client: Client,
    config: LlmConfig,
}

impl Summarizer {
    pub fn new(config: LlmConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    /// Summarize an article with the configured backend.
    ///
    /// Never fails: every backend error is logged and reported as an empty
    /// string, which callers treat as "skip this article".
    pub async fn summarize(&self, article_text: &str) -> String {
        let prompt = build_prompt(
            &self.config.prompt_template,
            article_text,
            self.config.max_article_chars,
        );

        match &self.config.service {
            LlmService::Ollama => match self.ollama_generate(&prompt).await {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    error!("Ollama error: {}", e);
                    String::new()
                }
            },
            LlmService::OpenRouter => match self.openrouter_chat(&prompt).await {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    error!("OpenRouter error: {}", e);
                    String::new()
                }
            },
            LlmService::VertexAi => {
                warn!("Vertex AI support not implemented yet.");
                String::new()
            }
            LlmService::Unknown(name) => {
                error!("Unknown LLM service: {}", name);
                String::new()
            }
        }
    }

    async fn ollama_generate(&self, prompt: &str) -> Result<String, LlmError> {
        let settings = &self.config.ollama;
        let request = GenerateRequest {
            model: &settings.model,
            prompt,
            stream: false,
        };

        debug!("Sending prompt to Ollama model {}", settings.model);
        let response = self
            .client
            .post(&settings.endpoint)
            .json(&request)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }

    async fn openrouter_chat(&self, prompt: &str) -> Result<String, LlmError> {
        let settings = &self.config.openrouter;
        let request = ChatRequest {
            model: &settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        debug!("Sending prompt to OpenRouter model {}", settings.model);
        let response = self
            .client
            .post(&settings.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", settings.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::NoChoices)
    }

    async fn success_body(response: reqwest::Response) -> Result<String, LlmError> {
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status));
        }
        Ok(response.text().await?)
    }
}
