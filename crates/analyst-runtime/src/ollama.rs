//! Ollama Translate Provider
//!
//! Implementation of `SummarizeTranslate` backed by local Ollama
//! inference. Builds a Japanese summarize-and-translate prompt and
//! parses the labeled response lines.

use async_trait::async_trait;
use crypto_analyst::error::{AnalystError, Result};
use crypto_analyst::translate::{SummarizeTranslate, TranslatedNews};
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, MessageRole, request::ChatMessageRequest},
};

const TITLE_LABEL: &str = "タイトル:";
const SUMMARY_LABEL: &str = "要約:";

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Model used for translation requests
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            model: "llama3.2".into(),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".into());
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(11434);
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".into());

        Self { host, port, model }
    }
}

/// Ollama-backed summarize/translate capability
pub struct OllamaTranslator {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaTranslator {
    /// Create a new translator with custom host/port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let config = OllamaConfig {
            host: host.into(),
            port,
            ..Default::default()
        };
        Self::from_config(config)
    }

    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Self {
        Self {
            client: Ollama::new(&config.host, config.port),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(OllamaConfig::from_env())
    }

    /// Create with default localhost settings
    pub fn localhost() -> Self {
        Self::from_config(OllamaConfig::default())
    }

    /// Build the Japanese summarize-and-translate prompt. The article
    /// body section is included only when a body was fetched.
    fn build_prompt(title: &str, summary: &str, full_text: Option<&str>) -> String {
        let mut prompt = format!(
            "以下の仮想通貨ニュースを日本語に翻訳し、要約してください。\n\n\
             タイトル: {title}\n\
             内容: {summary}\n"
        );
        if let Some(body) = full_text {
            prompt.push_str(&format!("記事内容: {body}\n"));
        }
        prompt.push_str(
            "\n要求:\n\
             1. タイトルを自然な日本語に翻訳\n\
             2. 内容を2-3文で要約し日本語に翻訳\n\
             3. 仮想通貨の専門用語は適切な日本語に変換\n\
             4. 重要な情報を残しながら簡潔にまとめる\n\n\
             レスポンス形式:\n\
             タイトル: [翻訳されたタイトル]\n\
             要約: [翻訳された要約]\n",
        );
        prompt
    }

    /// Parse the labeled response lines. Unlabeled or missing lines
    /// keep the original text, and `applied` reflects whether any
    /// label was actually found.
    fn parse_response(text: &str, title: &str, summary: &str) -> TranslatedNews {
        let mut translated_title = None;
        let mut translated_summary = None;

        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix(TITLE_LABEL) {
                translated_title = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(SUMMARY_LABEL) {
                translated_summary = Some(rest.trim().to_string());
            }
        }

        let applied = translated_title.is_some() || translated_summary.is_some();
        TranslatedNews {
            title: translated_title.unwrap_or_else(|| title.to_string()),
            summary: translated_summary.unwrap_or_else(|| summary.to_string()),
            applied,
        }
    }
}

#[async_trait]
impl SummarizeTranslate for OllamaTranslator {
    async fn process(
        &self,
        title: &str,
        summary: &str,
        full_text: Option<&str>,
    ) -> Result<TranslatedNews> {
        let prompt = Self::build_prompt(title, summary, full_text);
        let request = ChatMessageRequest::new(
            self.config.model.clone(),
            vec![ChatMessage::new(MessageRole::User, prompt)],
        );

        tracing::debug!(model = %self.config.model, "sending translation request");
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AnalystError::Capability(e.to_string()))?;

        Ok(Self::parse_response(
            &response.message.content,
            title,
            summary,
        ))
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
