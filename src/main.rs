//! WikiAI Backend server binary.

use anyhow::Result;
use clap::Parser;

use wikiai_backend::config::{CorsConfig, RelayConfig, ServerConfig};
use wikiai_backend::openrouter::OpenRouterConfig;
use wikiai_backend::server;

#[derive(Parser, Debug)]
#[command(name = "wikiai-server")]
#[command(about = "WikiAI Backend - AI-powered encyclopedia article relay")]
struct Args {
    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 5000, env = "PORT")]
    port: u16,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenRouter chat completions URL
    #[arg(
        long,
        env = "OPENROUTER_API_URL",
        default_value = "https://openrouter.ai/api/v1/chat/completions"
    )]
    api_url: String,

    /// Model requested from OpenRouter
    #[arg(
        long,
        env = "OPENROUTER_MODEL",
        default_value = "meta-llama/llama-3.1-70b-instruct"
    )]
    model: String,

    /// Origins allowed by the CORS policy (comma-separated)
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// HTTP-Referer header sent to OpenRouter
    #[arg(long, env = "HTTP_REFERER", default_value = "http://localhost:5000")]
    referer: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 120)]
    upstream_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cors = if args.allowed_origins.is_empty() {
        CorsConfig::default()
    } else {
        CorsConfig {
            allowed_origins: args.allowed_origins,
            ..CorsConfig::default()
        }
    };

    let config = RelayConfig {
        server: ServerConfig {
            host: args.host,
            port: args.port,
            ..ServerConfig::default()
        },
        cors,
        upstream: OpenRouterConfig {
            api_url: args.api_url,
            api_key: args.api_key,
            model: args.model,
            referer: args.referer,
            timeout_secs: args.upstream_timeout_secs,
            ..OpenRouterConfig::default()
        },
    };

    server::run(config).await
}
