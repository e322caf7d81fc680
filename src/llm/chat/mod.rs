pub mod openrouter;

use async_trait::async_trait;
use serde::{ Serialize, Deserialize };

use crate::error::ChatError;
use crate::models::chat::Role;

/// One message in the gateway's wire schema. Content is always the
/// multi-part array form, even for plain-text messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: Vec<ApiPart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// The model gateway: hand it an ordered, normalized message list ending in
/// a user message and get back one completion string.
///
/// No streaming and no retries here; a call either completes or fails.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, messages: &[ApiMessage]) -> Result<String, ChatError>;
}
