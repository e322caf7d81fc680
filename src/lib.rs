pub mod cli;
pub mod error;
pub mod llm;
pub mod models;
pub mod repl;
pub mod transcript;

use cli::Args;
use error::ChatError;
use llm::chat::openrouter::OpenRouterClient;
use llm::{ resolve_model, GatewayConfig };
use log::info;
use repl::Repl;

pub async fn run(args: Args) -> Result<(), ChatError> {
    if args.api_key.is_empty() {
        return Err(
            ChatError::Config(
                "an OpenRouter API key is required (pass --api-key or set OPENROUTER_API_KEY)".to_string()
            )
        );
    }
    let model = resolve_model(&args.model)?;

    info!("--- Core Configuration ---");
    info!("Model: {} ({})", args.model, model);
    info!("Base URL: {}", args.base_url);
    info!("-------------------------");

    let config = GatewayConfig {
        api_key: args.api_key.clone(),
        model: model.to_string(),
        base_url: args.base_url.clone(),
    };
    let gateway = OpenRouterClient::new(&config)?;

    Repl::new(&gateway).run().await
}
