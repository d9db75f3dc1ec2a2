use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ChatError;

pub const CHAT_APOLOGY: &str =
    "I'm having trouble connecting to my knowledge base right now. Please try again in a moment.";

const ANTHROPIC_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are an experienced baseball strength and conditioning coach. \
Answer questions about training, throwing mechanics, arm care, recovery and performance. \
Keep answers practical and concise, and recommend seeing a medical professional for pain or injury.";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ChatMessage; 1],
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            url: config.chat_api_url.clone(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
            max_tokens: config.chat_max_tokens,
        }
    }

    pub async fn ask(&self, message: &str) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: [ChatMessage {
                role: "user",
                content: format!(
                    "The user is asking: {}\n\nProvide a helpful, concise response about baseball training, technique, or performance.",
                    message
                ),
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChatError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Chat API error body: {}", text);
            return Err(ChatError::Http {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ChatError::Decode(err.to_string()))?;

        payload
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(ChatError::UnexpectedShape)
    }

    pub async fn reply(&self, message: &str) -> String {
        match self.ask(message).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Chat request failed: {}", err);
                CHAT_APOLOGY.to_string()
            }
        }
    }
}
