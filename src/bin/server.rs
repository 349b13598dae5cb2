//! Document Q&A server binary
//!
//! Run with: cargo run --bin local-rag-server

use local_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "local_rag=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = RagConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Generation model: {}", config.llm.generate_model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Chunk overlap: {}", config.chunking.chunk_overlap);
    tracing::info!("  - Retrieval top_k: {}", config.retrieval.top_k);
    tracing::info!("  - Data dir: {}", config.vector_db.data_dir.display());

    // Check Ollama
    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.llm.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!(
                "  2. Pull models: ollama pull {} && ollama pull {}",
                config.llm.embed_model,
                config.llm.generate_model
            );
        }
    }

    // Create and start server
    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /ingest - Index documents from a folder");
    println!("  POST /chat   - Ask questions about them");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
