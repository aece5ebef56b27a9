// Forbid unwrap() in production code to prevent panics on bad configuration.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;

use gateway::access::{RuleTable, gallery_rules, load_rules_file};
use gateway::config::ServerConfig;
use gateway::server::{AppState, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: listen_port={}, jwt_algorithm={}, rules_file={:?}",
        config.listen_port,
        config.jwt_config,
        config.rules_file
    );

    // An invalid rule table is fatal: never serve traffic with it.
    let rules = match load_rules(&config) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!("Failed to load access rules: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded {} access rules", rules.len());
    for (index, rule) in rules.rules().iter().enumerate() {
        tracing::debug!("rule {index}: {rule}");
    }

    let cors = match config.cors.clone().into_layer() {
        Ok(cors) => cors,
        Err(e) => {
            tracing::error!("Invalid CORS policy: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        "CORS allowed origins: {}",
        config.cors.allowed_origins.join(", ")
    );

    let state = AppState::new(rules, config.jwt_config);
    let app = router(state, cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}

fn load_rules(config: &ServerConfig) -> Result<RuleTable, Box<dyn std::error::Error>> {
    match &config.rules_file {
        Some(path) => Ok(load_rules_file(path)?),
        None => Ok(gallery_rules()?),
    }
}
