use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// OpenRouter API key. Get a free one at https://openrouter.ai/
    #[arg(long, env = "OPENROUTER_API_KEY", default_value = "")]
    pub api_key: String,

    /// Short name of the free model to chat with (e.g. "Llama 4 Maverick",
    /// "Deepseek Chat V3"). Run with an unknown name to see the full list.
    #[arg(long, env = "CHAT_MODEL", default_value = "Llama 4 Maverick")]
    pub model: String,

    /// Base URL for the OpenRouter-compatible chat completions API.
    #[arg(long, env = "CHAT_BASE_URL", default_value = crate::llm::DEFAULT_BASE_URL)]
    pub base_url: String,
}
