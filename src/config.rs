use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT_TEMPLATE: &str = "Summarize the following article into a concise, human-friendly blog post (250 words, catchy title):\n\nArticle: {article}";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Feed URLs, processed in this order
    pub feeds: Vec<String>,
    /// Directory the Markdown posts are written to
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
    /// Run interval in minutes
    #[serde(default = "default_run_interval")]
    pub run_interval: u64,
    /// Pause between two processed articles, in seconds
    #[serde(default = "default_item_delay")]
    pub item_delay_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("posts")
}

fn default_run_interval() -> u64 {
    60
}

fn default_item_delay() -> u64 {
    1
}

fn default_request_timeout() -> u64 {
    60
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_max_article_chars() -> usize {
    2000
}

/// Which summarization backend handles the articles.
///
/// Unrecognised names are kept as `Unknown` so that a typo in the
/// configuration degrades to skipped articles instead of a startup failure.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum LlmService {
    #[default]
    Ollama,
    OpenRouter,
    VertexAi,
    Unknown(String),
}

impl From<String> for LlmService {
    fn from(name: String) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "OLLAMA" => LlmService::Ollama,
            "OPENROUTER" => LlmService::OpenRouter,
            "VERTEX_AI" => LlmService::VertexAi,
            _ => LlmService::Unknown(name),
        }
    }
}

impl fmt::Display for LlmService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmService::Ollama => write!(f, "OLLAMA"),
            LlmService::OpenRouter => write!(f, "OPENROUTER"),
            LlmService::VertexAi => write!(f, "VERTEX_AI"),
            LlmService::Unknown(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default)]
    pub service: LlmService,
    /// Prompt sent to the model; `{article}` is replaced by the article text
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
    #[serde(default = "default_max_article_chars")]
    pub max_article_chars: usize,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    #[serde(default)]
    pub vertex: VertexConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            service: LlmService::default(),
            prompt_template: default_prompt_template(),
            max_article_chars: default_max_article_chars(),
            ollama: OllamaConfig::default(),
            openrouter: OpenRouterConfig::default(),
            vertex: VertexConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OllamaConfig {
    pub endpoint: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "gemma:2b".to_string(),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "google/gemma-2b-it".to_string(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Settings for the Vertex AI backend, which is not implemented yet.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VertexConfig {
    pub project_id: String,
    pub location: String,
    pub model_id: String,
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            location: String::new(),
            model_id: "gemini-1.0-pro".to_string(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Pick up secrets that are kept out of the config file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                self.llm.openrouter.api_key = key;
            }
        }
    }
}
