use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};

use super::{ChatMessage, ChatModel, ChatReply};

/// Runtime configuration for the chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub model: String,
    pub host: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl From<&ScanConfig> for ChatClientConfig {
    fn from(config: &ScanConfig) -> Self {
        Self {
            model: config.model.clone(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        }
    }
}

pub struct ChatClient {
    config: ChatClientConfig,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(config: ChatClientConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(ScanError::InvalidInput(
                "model host must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn chat_url(&self) -> String {
        let host = self.config.host.trim().trim_end_matches('/');
        // `OLLAMA_HOST` is commonly set as a bare `host:port`
        let host = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        if host.ends_with("/api/chat") {
            host
        } else if host.ends_with("/api") {
            format!("{}/chat", host)
        } else {
            format!("{}/api/chat", host)
        }
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        if messages.is_empty() {
            return Err(ScanError::InvalidInput(
                "chat request requires at least one message".to_string(),
            ));
        }

        let payload = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        let mut request = self.http.post(self.chat_url()).json(&payload);
        if let Some(api_key) = self.config.api_key.as_ref() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScanError::Model(format!(
                    "request timed out after {:?} (model={})",
                    self.config.timeout, self.config.model
                ))
            } else {
                ScanError::Model(format!(
                    "request failed (model={}): {}",
                    self.config.model, e
                ))
            }
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScanError::Model(format!(
                "endpoint returned HTTP {}: {}",
                status,
                truncate_for_error(&body)
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ScanError::Model(format!(
                "invalid JSON from endpoint: {} (body={})",
                e,
                truncate_for_error(&body)
            ))
        })?;

        Ok(parsed.into_reply())
    }
}

fn truncate_for_error(value: &str) -> String {
    const LIMIT: usize = 400;
    match value.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
    #[serde(default)]
    tech_stack: Option<Value>,
    #[serde(default)]
    purpose: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_reply(self) -> ChatReply {
        ChatReply {
            content: self.message.and_then(|m| m.content),
            tech_stack: self.tech_stack.and_then(value_to_text),
            purpose: self.purpose.and_then(value_to_text),
        }
    }
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
