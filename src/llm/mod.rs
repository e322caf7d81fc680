pub mod chat;

use crate::error::ChatError;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Free-tier model catalog: short display name to full OpenRouter identifier.
pub const FREE_MODELS: &[(&str, &str)] = &[
    ("Llama 4 Maverick", "meta-llama/llama-4-maverick:free"),
    ("Mistral 7B Instruct", "mistralai/mistral-7b-instruct:free"),
    ("Qwen QWQ 32B", "arliai/qwq-32b-arliai-rpr-v1:free"),
    ("Nvidia Nemotron Ultra", "nvidia/llama-3.1-nemotron-ultra-253b-v1:free"),
    ("Deepseek Chat V3", "deepseek/deepseek-chat-v3-0324:free"),
    ("Bytedance UI Tars 72B", "bytedance-research/ui-tars-72b:free"),
    ("Google Gemini 2.0 Flash Exp", "google/gemini-2.0-flash-exp:free"),
    ("Google Gemma 3 27B IT", "google/gemma-3-27b-it:free"),
    ("Qwen 2.5 VL 3B Instruct", "qwen/qwen2.5-vl-3b-instruct:free"),
];

/// Look up a catalog model by its short name, case-insensitively.
pub fn resolve_model(short_name: &str) -> Result<&'static str, ChatError> {
    FREE_MODELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(short_name))
        .map(|(_, id)| *id)
        .ok_or_else(|| {
            let known: Vec<&str> = FREE_MODELS.iter().map(|(name, _)| *name).collect();
            ChatError::Config(
                format!("unknown model '{}'; available: {}", short_name, known.join(", "))
            )
        })
}

/// Execution context for a gateway call. Supplied by the caller, never stored
/// inside the transcript.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    /// Full model identifier, e.g. `meta-llama/llama-4-maverick:free`.
    pub model: String,
    pub base_url: String,
}
