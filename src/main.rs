use chatflex::cli::Args;
use chatflex::error::ChatError;
use clap::Parser;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), ChatError> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    chatflex::run(args).await
}
