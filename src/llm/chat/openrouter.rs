use async_trait::async_trait;
use log::{ debug, error };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ApiMessage, ChatGateway };
use crate::error::ChatError;
use crate::llm::GatewayConfig;

/// Chat-completions client for OpenRouter's OpenAI-compatible API.
pub struct OpenRouterClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ApiMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenRouterClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ChatError::Config(format!("invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

/// Pull the completion text out of the response envelope. A decoded envelope
/// with no choice, message, or content is malformed, not a transport failure.
fn extract_content(envelope: ChatResponse) -> Result<String, ChatError> {
    let choice = envelope.choices
        .into_iter()
        .next()
        .ok_or(ChatError::MalformedResponse("missing choices"))?;
    let message = choice.message.ok_or(ChatError::MalformedResponse("missing message"))?;
    message.content.ok_or(ChatError::MalformedResponse("missing content"))
}

#[async_trait]
impl ChatGateway for OpenRouterClient {
    async fn complete(&self, messages: &[ApiMessage]) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let req = ChatRequest {
            model: &self.model,
            messages,
        };
        debug!("POST {} with {} messages, model {}", url, messages.len(), self.model);

        let resp = self.http
            .post(&url)
            .json(&req)
            .send().await
            .map_err(|e| {
                error!("gateway transport error: {}", e);
                ChatError::Gateway(e.to_string())
            })?
            .error_for_status()
            .map_err(|e| {
                error!("gateway rejected request: {}", e);
                ChatError::Gateway(e.to_string())
            })?;

        let envelope = resp
            .json::<ChatResponse>().await
            .map_err(|e| {
                error!("gateway response body not decodable: {}", e);
                ChatError::Gateway(e.to_string())
            })?;

        extract_content(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_envelope_yields_content() {
        let envelope: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#
        ).unwrap();
        assert_eq!(extract_content(envelope).unwrap(), "Hi there");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let envelope: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = extract_content(envelope).unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse("missing choices")));
    }

    #[test]
    fn choice_without_message_is_malformed() {
        let envelope: ChatResponse = serde_json::from_str(r#"{"choices":[{}]}"#).unwrap();
        let err = extract_content(envelope).unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse("missing message")));
    }

    #[test]
    fn absent_choices_field_is_malformed() {
        let envelope: ChatResponse = serde_json::from_str(r#"{"id":"gen-1"}"#).unwrap();
        let err = extract_content(envelope).unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse("missing choices")));
    }
}
