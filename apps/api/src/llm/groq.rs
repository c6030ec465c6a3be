//! Secondary provider: Groq's OpenAI-compatible chat completions endpoint.
//!
//! Text-only. The whole prompt (the features pre-flatten any history) is sent
//! as a single user message; image attachments are dropped with a debug note.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionProvider, ImageAttachment, LlmError};

const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct GroqProvider {
    client: Client,
    api_key: String,
    url: String,
}

impl GroqProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            url: GROQ_CHAT_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_url(client: Client, api_key: String, url: String) -> Self {
        Self {
            client,
            api_key,
            url,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, LlmError> {
        if image.is_some() {
            debug!("Secondary provider is text-only; dropping image attachment");
        }

        let request_body = ChatCompletionRequest {
            model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmGateway, GROQ_PREFIX};
    use axum::routing::post;
    use axum::{Json, Router};

    /// Plays the chat-completions endpoint and echoes which model it was asked for.
    async fn fake_chat(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
        let model = body["model"].as_str().unwrap_or("missing").to_string();
        let content = body["messages"][0]["content"].as_str().unwrap_or("").to_string();
        Json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": format!("{model} heard: {content}")}}]
        }))
    }

    #[tokio::test]
    async fn test_groq_selector_strips_prefix_and_parses_reply() {
        let app = Router::new().route("/chat", post(fake_chat));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let gateway =
            LlmGateway::with_groq_url("groq-key".to_string(), format!("http://{addr}/chat"));
        let selector = format!("{GROQ_PREFIX}llama-3.3-70b-versatile");
        let reply = gateway.try_complete("hello", &selector, None).await.unwrap();

        assert_eq!(reply, "llama-3.3-70b-versatile heard: hello");
    }

    #[test]
    fn test_empty_choices_is_empty_content() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .is_none());
    }
}
