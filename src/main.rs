use std::sync::Arc;

use ai_news_agent::agent::{start_scheduled_runs, Agent};
use ai_news_agent::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_news_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("AGENT_CONFIG").unwrap_or_else(|_| "agent.toml".to_string());
    let mut config = Config::load(&config_path)?;
    config.apply_env();
    info!(
        "Loaded {} feeds from {}, using {} backend",
        config.feeds.len(),
        config_path,
        config.llm.service
    );

    let agent = Arc::new(Agent::new(&config)?);
    start_scheduled_runs(agent, config.run_interval).await;

    Ok(())
}
