//! Chat-model boundary.
//!
//! The analyzer only depends on [`ChatModel`]; [`ChatClient`] is the HTTP
//! implementation that talks to an Ollama-style `/api/chat` endpoint.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use client::{ChatClient, ChatClientConfig};

/// One message of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Fields extracted from a chat response.
///
/// `tech_stack` and `purpose` are only populated when the service returns
/// them as top-level fields, which chat endpoints normally do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub content: Option<String>,
    pub tech_stack: Option<String>,
    pub purpose: Option<String>,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply>;
}
