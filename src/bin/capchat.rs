//! capchat interactive terminal binary.
//!
//! Reads one human line per turn from stdin and prints the assistant's final
//! reply, resolving embedded capability requests along the way.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` — API key for the completion endpoint (required)
//! - `OPENAI_BASE_URL` — OpenAI-compatible endpoint base (default: `https://api.openai.com/v1`)
//! - `CAPCHAT_MODEL` — model identifier (default: "gpt-4o-mini")
//! - `RUST_LOG` — tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=... cargo run --bin capchat
//! ```

use anyhow::Context;

use capchat::chat::Chat;
use capchat::identity::IdAllocator;
use capchat::llm::openai::{OpenAiChatModel, DEFAULT_BASE_URL};
use capchat::modules::{clock_module, math_module, social_module};
use capchat::oracle::Oracle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,capchat=debug".into()),
        )
        .init();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    let base_url =
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let model_name = std::env::var("CAPCHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let ids = IdAllocator::new();
    let oracle = Oracle::new(vec![
        math_module(&ids),
        clock_module(&ids),
        social_module(&ids),
    ]);
    tracing::info!(model = %model_name, "capchat starting");

    let model = OpenAiChatModel::with_base_url(api_key, model_name, base_url);
    let mut chat = Chat::new(model, oracle);
    chat.run().await?;
    Ok(())
}
